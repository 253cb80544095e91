//! 拖放手势状态机
//!
//! 把指针事件（按下、松开、取消）转换为已提交的编辑。
//! 拖动过程中不修改棋盘，只在松开时产生一次 `Edit`。

use tracing::debug;

use crate::board::Board;
use crate::editor::Edit;
use crate::piece::{Piece, Square};

/// 被拖动棋子的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    /// 从棋盘上拿起
    Board { origin: Square, piece: Piece },
    /// 从工具面板拿起（无限供应）
    Palette { piece: Piece },
}

impl DragSource {
    pub fn piece(&self) -> Piece {
        match *self {
            DragSource::Board { piece, .. } | DragSource::Palette { piece } => piece,
        }
    }
}

/// 松开时指针所在位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// 棋盘格子
    Square(Square),
    /// 工具面板
    Palette,
    /// 窗口外或其他区域
    Outside,
}

/// 拖放手势
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragGesture {
    #[default]
    Idle,
    Dragging { source: DragSource },
}

impl DragGesture {
    /// 从棋盘格子开始拖动，空格不开始
    ///
    /// 已在拖动中时忽略。返回是否开始了拖动。
    pub fn begin_from_board(&mut self, square: Square, board: &Board) -> bool {
        if self.is_dragging() {
            return false;
        }
        match board.get(square) {
            Some(piece) => {
                debug!("从 {} 拿起 {:?}", square, piece);
                *self = DragGesture::Dragging {
                    source: DragSource::Board {
                        origin: square,
                        piece,
                    },
                };
                true
            }
            None => false,
        }
    }

    /// 从工具面板开始拖动
    pub fn begin_from_palette(&mut self, piece: Piece) -> bool {
        if self.is_dragging() {
            return false;
        }
        debug!("从面板拿起 {:?}", piece);
        *self = DragGesture::Dragging {
            source: DragSource::Palette { piece },
        };
        true
    }

    /// 松开，按落点生成编辑并回到空闲状态
    ///
    /// | 来源 | 落在格子 s | 落在面板 | 窗口外 |
    /// |------|-----------|---------|--------|
    /// | 棋盘 | Move(origin, s)，s == origin 时无操作 | Remove(origin) | 放弃 |
    /// | 面板 | Place(s, piece) | 放弃 | 放弃 |
    pub fn drop_on(&mut self, target: DropTarget) -> Option<Edit> {
        let DragGesture::Dragging { source } = std::mem::take(self) else {
            return None;
        };

        let edit = match (source, target) {
            (DragSource::Board { origin, .. }, DropTarget::Square(to)) if to == origin => None,
            (DragSource::Board { origin, .. }, DropTarget::Square(to)) => {
                Some(Edit::Move { from: origin, to })
            }
            (DragSource::Board { origin, .. }, DropTarget::Palette) => {
                Some(Edit::Remove { square: origin })
            }
            (DragSource::Palette { piece }, DropTarget::Square(square)) => {
                Some(Edit::Place { square, piece })
            }
            (_, _) => None,
        };

        debug!("落在 {:?}，提交 {:?}", target, edit);
        edit
    }

    /// 取消拖动，不产生编辑
    pub fn cancel(&mut self) {
        if self.is_dragging() {
            debug!("取消拖动");
        }
        *self = DragGesture::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragGesture::Dragging { .. })
    }

    /// 正在拖动的棋子
    pub fn dragged_piece(&self) -> Option<Piece> {
        match self {
            DragGesture::Dragging { source } => Some(source.piece()),
            DragGesture::Idle => None,
        }
    }

    /// 拖动起点格子（仅棋盘来源）
    pub fn origin(&self) -> Option<Square> {
        match self {
            DragGesture::Dragging {
                source: DragSource::Board { origin, .. },
            } => Some(*origin),
            _ => None,
        }
    }
}
