//! 错误类型定义

use thiserror::Error;

/// 棋盘编辑器错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// 坐标越界
    #[error("Invalid square: file {file}, rank {rank}")]
    InvalidSquare { file: u8, rank: u8 },

    /// 无效的格子名称（如 "i9"）
    #[error("Invalid square name: {name}")]
    InvalidSquareName { name: String },

    /// 无效的 FEN 字符串
    #[error("Invalid FEN string: {reason}")]
    InvalidFen { reason: String },

    /// 无效的 PGN 文本
    #[error("Invalid PGN: {reason}")]
    InvalidPgn { reason: String },

    /// 棋谱中的非法着法
    #[error("Illegal move {san} at ply {ply}")]
    IllegalMove { san: String, ply: usize },

    /// 尚未载入棋谱
    #[error("No game loaded")]
    NoGameLoaded,
}

/// 编辑器操作结果类型
pub type Result<T> = std::result::Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EditorError::InvalidSquare { file: 8, rank: 0 };
        assert_eq!(err.to_string(), "Invalid square: file 8, rank 0");

        let err = EditorError::IllegalMove { san: "Ke3".to_string(), ply: 4 };
        assert_eq!(err.to_string(), "Illegal move Ke3 at ply 4");
    }
}
