//! 窗口像素布局
//!
//! 棋盘在左（8x8 格），工具面板在右。所有 UI 节点都按这里的像素位置绝对定位，
//! 因此拖放时可以直接用光标位置命中测试，不依赖 UI 交互状态。

use bevy::prelude::*;
use board_core::{Color as Side, DropTarget, Piece, PieceKind, Square};

/// 面板按钮
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelButton {
    LoadFen,
    ExportFen,
    LoadPgn,
    ExportPgn,
    Prev,
    Next,
    ToggleLock,
    Clear,
    Start,
}

impl PanelButton {
    /// 全部按钮（生成顺序）
    pub const ALL: [PanelButton; 9] = [
        PanelButton::LoadFen,
        PanelButton::ExportFen,
        PanelButton::LoadPgn,
        PanelButton::ExportPgn,
        PanelButton::Prev,
        PanelButton::Next,
        PanelButton::ToggleLock,
        PanelButton::Clear,
        PanelButton::Start,
    ];

    /// 按钮文字
    pub fn label(&self) -> &'static str {
        match self {
            PanelButton::LoadFen => "Load FEN",
            PanelButton::ExportFen => "Export FEN",
            PanelButton::LoadPgn => "Load PGN",
            PanelButton::ExportPgn => "Export PGN",
            PanelButton::Prev => "Prev",
            PanelButton::Next => "Next",
            PanelButton::ToggleLock => "Lock",
            PanelButton::Clear => "Clear",
            PanelButton::Start => "Start",
        }
    }

    /// 在面板网格中的位置（行，列），ToggleLock 独占一行
    fn cell(&self) -> (usize, Option<usize>) {
        match self {
            PanelButton::LoadFen => (0, Some(0)),
            PanelButton::ExportFen => (0, Some(1)),
            PanelButton::LoadPgn => (1, Some(0)),
            PanelButton::ExportPgn => (1, Some(1)),
            PanelButton::Prev => (2, Some(0)),
            PanelButton::Next => (2, Some(1)),
            PanelButton::ToggleLock => (3, None),
            PanelButton::Clear => (4, Some(0)),
            PanelButton::Start => (4, Some(1)),
        }
    }
}

/// 光标命中结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// 棋盘格子
    Square(Square),
    /// 面板中的棋子图标
    Palette(Piece),
    /// 面板其他区域（按钮、状态栏、空白）
    Panel,
    /// 窗口外
    Outside,
}

impl Hit {
    /// 作为拖放落点
    pub fn drop_target(self) -> DropTarget {
        match self {
            Hit::Square(square) => DropTarget::Square(square),
            Hit::Palette(_) | Hit::Panel => DropTarget::Palette,
            Hit::Outside => DropTarget::Outside,
        }
    }
}

/// 编辑器布局配置
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct EditorLayout {
    /// 格子边长
    pub square_size: f32,
    /// 工具面板宽度
    pub panel_width: f32,
    /// 面板内边距
    pub padding: f32,
    /// 状态栏高度
    pub status_height: f32,
    /// 按钮高度
    pub button_height: f32,
    /// 按钮行距
    pub button_pitch: f32,
    /// 按钮区顶部
    pub buttons_top: f32,
    /// 棋子图标区顶部
    pub palette_top: f32,
}

impl Default for EditorLayout {
    fn default() -> Self {
        Self {
            square_size: 80.0,
            panel_width: 200.0,
            padding: 10.0,
            status_height: 110.0,
            button_height: 30.0,
            button_pitch: 40.0,
            buttons_top: 130.0,
            palette_top: 330.0,
        }
    }
}

impl EditorLayout {
    /// 棋盘边长
    pub fn board_size(&self) -> f32 {
        self.square_size * 8.0
    }

    /// 窗口尺寸
    pub fn window_size(&self) -> Vec2 {
        Vec2::new(self.board_size() + self.panel_width, self.board_size())
    }

    /// 格子左上角（窗口坐标，y 向下）
    pub fn square_origin(&self, square: Square) -> Vec2 {
        Vec2::new(
            square.file() as f32 * self.square_size,
            (7 - square.rank()) as f32 * self.square_size,
        )
    }

    /// 窗口坐标转格子
    pub fn screen_to_square(&self, pos: Vec2) -> Option<Square> {
        if pos.x < 0.0 || pos.y < 0.0 {
            return None;
        }
        let file = (pos.x / self.square_size).floor() as i32;
        let row = (pos.y / self.square_size).floor() as i32;

        if (0..8).contains(&file) && (0..8).contains(&row) {
            Square::new(file as u8, 7 - row as u8)
        } else {
            None
        }
    }

    /// 面板区域
    pub fn panel_rect(&self) -> Rect {
        let size = self.window_size();
        Rect::new(self.board_size(), 0.0, size.x, size.y)
    }

    /// 状态栏区域
    pub fn status_rect(&self) -> Rect {
        let left = self.board_size() + self.padding;
        Rect::new(
            left,
            self.padding,
            left + self.panel_width - self.padding * 2.0,
            self.padding + self.status_height,
        )
    }

    /// 按钮区域
    pub fn button_rect(&self, button: PanelButton) -> Rect {
        let (row, column) = button.cell();
        let left = self.board_size() + self.padding;
        let top = self.buttons_top + row as f32 * self.button_pitch;
        let full_width = self.panel_width - self.padding * 2.0;
        let half_width = (full_width - self.padding) / 2.0;

        let (x, width) = match column {
            None => (left, full_width),
            Some(0) => (left, half_width),
            Some(_) => (left + half_width + self.padding, half_width),
        };
        Rect::new(x, top, x + width, top + self.button_height)
    }

    /// 棋子图标行高（六行平分剩余高度）
    pub fn palette_row_height(&self) -> f32 {
        ((self.board_size() - self.palette_top - self.padding) / PieceKind::ALL.len() as f32)
            .floor()
    }

    /// 面板中的全部棋子图标（白方在左列，黑方在右列）
    pub fn palette_slots(&self) -> impl Iterator<Item = (Piece, Rect)> + '_ {
        let column_width = self.panel_width / 2.0;
        let row_height = self.palette_row_height();
        PieceKind::ALL
            .into_iter()
            .enumerate()
            .flat_map(move |(row, kind)| {
                [Side::White, Side::Black]
                    .into_iter()
                    .enumerate()
                    .map(move |(column, side)| {
                        let x = self.board_size() + column as f32 * column_width;
                        let y = self.palette_top + row as f32 * row_height;
                        (
                            Piece::new(kind, side),
                            Rect::new(x, y, x + column_width, y + row_height),
                        )
                    })
            })
    }

    /// 命中测试；光标不在窗口内时传 None
    pub fn hit_test(&self, pos: Option<Vec2>) -> Hit {
        let Some(pos) = pos else {
            return Hit::Outside;
        };
        if let Some(square) = self.screen_to_square(pos) {
            return Hit::Square(square);
        }
        if !self.panel_rect().contains(pos) {
            return Hit::Outside;
        }
        self.palette_slots()
            .find(|(_, rect)| rect.contains(pos))
            .map_or(Hit::Panel, |(piece, _)| Hit::Palette(piece))
    }
}
