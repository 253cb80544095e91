//! 棋盘常量定义

/// 棋盘边长（列数 = 行数）
pub const BOARD_SIZE: usize = 8;

/// 格子总数
pub const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// 标准开局 FEN
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// 空棋盘 FEN
pub const EMPTY_FEN: &str = "8/8/8/8/8/8/8/8 w - - 0 1";
