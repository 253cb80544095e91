//! 棋盘编辑模型
//!
//! 持有唯一的局面状态，处理放置、移除、移动、复位四种编辑，
//! 并在每次编辑后使攻击计数缓存失效。

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::attacks::{self, AttackCounts, SquareSet};
use crate::board::{Board, BoardState};
use crate::piece::{Color, Piece, Square};

/// 复位方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetMode {
    /// 空棋盘
    Empty,
    /// 标准开局
    StandardStart,
}

/// 已提交的编辑操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edit {
    Place { square: Square, piece: Piece },
    Remove { square: Square },
    Move { from: Square, to: Square },
    Reset(ResetMode),
}

/// 棋盘编辑器
#[derive(Debug, Clone)]
pub struct BoardEditor {
    state: BoardState,
    /// 攻击计数缓存，任何修改后清空
    counts: OnceLock<AttackCounts>,
}

impl BoardEditor {
    /// 以指定方式创建
    pub fn new(mode: ResetMode) -> Self {
        let mut editor = Self {
            state: BoardState::empty(),
            counts: OnceLock::new(),
        };
        editor.reset(mode);
        editor
    }

    /// 从已有局面创建
    pub fn from_state(state: BoardState) -> Self {
        Self {
            state,
            counts: OnceLock::new(),
        }
    }

    /// 当前棋盘
    pub fn board(&self) -> &Board {
        &self.state.board
    }

    /// 当前局面（含 FEN 附加字段）
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// 放置棋子，覆盖原有棋子
    pub fn place(&mut self, square: Square, piece: Piece) {
        self.state.board.set(square, Some(piece));
        self.invalidate();
    }

    /// 移除棋子，空格不做任何事
    pub fn remove(&mut self, square: Square) {
        if self.state.board.is_occupied(square) {
            self.state.board.set(square, None);
            self.invalidate();
        }
    }

    /// 移动棋子，起点为空或起点等于终点时不做任何事
    pub fn move_piece(&mut self, from: Square, to: Square) {
        if from == to || !self.state.board.is_occupied(from) {
            return;
        }
        self.state.board.move_piece(from, to);
        self.invalidate();
    }

    /// 整盘复位
    pub fn reset(&mut self, mode: ResetMode) {
        self.state = match mode {
            ResetMode::Empty => BoardState::empty(),
            ResetMode::StandardStart => BoardState::standard(),
        };
        self.invalidate();
    }

    /// 整体替换局面（载入 FEN 或棋谱时使用）
    pub fn load_state(&mut self, state: BoardState) {
        self.state = state;
        self.invalidate();
    }

    /// 应用一次已提交的编辑
    pub fn apply(&mut self, edit: Edit) {
        trace!("应用编辑: {:?}", edit);
        match edit {
            Edit::Place { square, piece } => self.place(square, piece),
            Edit::Remove { square } => self.remove(square),
            Edit::Move { from, to } => self.move_piece(from, to),
            Edit::Reset(mode) => self.reset(mode),
        }
    }

    /// 每格的白方、黑方攻击数
    ///
    /// 结果按需计算并缓存，直到下一次修改。
    pub fn attack_counts(&self) -> &AttackCounts {
        self.counts.get_or_init(|| AttackCounts::compute(&self.state.board))
    }

    /// 攻击指定格子的某一方棋子所在格
    pub fn attackers(&self, square: Square, color: Color) -> SquareSet {
        attacks::attackers(&self.state.board, square, color)
    }

    fn invalidate(&mut self) {
        self.counts = OnceLock::new();
    }
}

impl Default for BoardEditor {
    fn default() -> Self {
        Self::new(ResetMode::StandardStart)
    }
}
