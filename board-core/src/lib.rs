//! 国际象棋棋盘编辑器核心库
//!
//! 包含:
//! - 棋子、格子、棋盘等核心数据结构
//! - 按棋子种类查表的攻击模式与每格攻击计数
//! - 棋盘编辑模型 (BoardEditor) 与拖放手势状态机 (DragGesture)
//! - 棋谱格式 (FEN, PGN) 与编辑会话 (EditorSession)

mod attacks;
mod board;
mod constants;
mod drag;
mod editor;
mod error;
mod fen;
mod pgn;
mod piece;
mod session;

pub use attacks::{
    attackers, attacks_from, pattern_for, AttackCounts, AttackPattern, SquareAttacks, SquareSet,
    ATTACK_TABLE,
};
pub use board::{Board, BoardState};
pub use constants::*;
pub use drag::{DragGesture, DragSource, DropTarget};
pub use editor::{BoardEditor, Edit, ResetMode};
pub use error::{EditorError, Result};
pub use fen::Fen;
pub use pgn::{format_tag, LoadedGame};
pub use piece::{Color, Piece, PieceKind, Square};
pub use session::EditorSession;
