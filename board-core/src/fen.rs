//! FEN 格式解析和生成
//!
//! 国际象棋 FEN 格式：
//! `<棋盘> <走子方> <易位权> <吃过路兵格> <50 步计数> <回合数>`
//!
//! 示例：
//! `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1`
//!
//! 编辑器允许任意局面，因此解析时只要求棋盘部分合法。
//! 易位权和吃过路兵格在解析时忽略，生成时由棋子位置推导。

use crate::board::{Board, BoardState};
use crate::constants::{BOARD_SIZE, STARTING_FEN};
use crate::error::{EditorError, Result};
use crate::piece::{Color, Piece, PieceKind, Square};

/// FEN 格式处理
pub struct Fen;

impl Fen {
    /// 解析 FEN 字符串为局面状态
    pub fn parse(fen: &str) -> Result<BoardState> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.is_empty() {
            return Err(EditorError::InvalidFen {
                reason: "Empty FEN string".to_string(),
            });
        }
        if parts.len() > 6 {
            return Err(EditorError::InvalidFen {
                reason: format!("Expected at most 6 fields, got {}", parts.len()),
            });
        }

        let board = Self::parse_board(parts[0])?;

        // 走子方（默认白方）
        let side_to_move = match parts.get(1) {
            Some(field) => parse_side(field)?,
            None => Color::White,
        };

        // parts[2] 易位权、parts[3] 吃过路兵格：忽略

        let halfmove_clock = match parts.get(4) {
            Some(field) => parse_number(field, "halfmove clock")?,
            None => 0,
        };

        let fullmove_number = match parts.get(5) {
            Some(field) => parse_number(field, "fullmove number")?.max(1),
            None => 1,
        };

        Ok(BoardState {
            board,
            side_to_move,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// 解析棋盘部分
    pub fn parse_board(board_str: &str) -> Result<Board> {
        let mut board = Board::empty();
        let rows: Vec<&str> = board_str.split('/').collect();

        if rows.len() != BOARD_SIZE {
            return Err(EditorError::InvalidFen {
                reason: format!("Expected 8 rows, got {}", rows.len()),
            });
        }

        // FEN 从上到下是第 8 行到第 1 行
        for (row_idx, row) in rows.iter().enumerate() {
            let rank = (BOARD_SIZE - 1 - row_idx) as u8;
            let mut file = 0u8;

            for c in row.chars() {
                if let Some(empty_count) = c.to_digit(10) {
                    if empty_count == 0 {
                        return Err(EditorError::InvalidFen {
                            reason: format!("Row {} contains a zero", row_idx),
                        });
                    }
                    file += empty_count as u8;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    let square = Square::new(file, rank).ok_or_else(|| EditorError::InvalidFen {
                        reason: format!("Row {} has too many columns", row_idx),
                    })?;
                    board.set(square, Some(piece));
                    file += 1;
                } else {
                    return Err(EditorError::InvalidFen {
                        reason: format!("Invalid piece character: {}", c),
                    });
                }

                if file as usize > BOARD_SIZE {
                    return Err(EditorError::InvalidFen {
                        reason: format!("Row {} has too many columns", row_idx),
                    });
                }
            }

            if file as usize != BOARD_SIZE {
                return Err(EditorError::InvalidFen {
                    reason: format!("Row {} has {} columns, expected 8", row_idx, file),
                });
            }
        }

        Ok(board)
    }

    /// 将局面状态转换为 FEN 字符串
    pub fn to_string(state: &BoardState) -> String {
        format!(
            "{} {} {} - {} {}",
            Self::board_to_string(&state.board),
            state.side_to_move.to_fen_char(),
            Self::castling_rights(&state.board),
            state.halfmove_clock,
            state.fullmove_number
        )
    }

    /// 将棋盘转换为 FEN 棋盘部分
    pub fn board_to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(BOARD_SIZE);

        for rank in (0..BOARD_SIZE as u8).rev() {
            let mut row = String::new();
            let mut empty_count = 0;

            for file in 0..BOARD_SIZE as u8 {
                if let Some(piece) = board.get(Square::from_coords(file, rank)) {
                    if empty_count > 0 {
                        row.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    row.push(piece.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                row.push_str(&empty_count.to_string());
            }

            rows.push(row);
        }

        rows.join("/")
    }

    /// 由王和车是否在原位推导易位权，全部缺失时为 "-"
    pub fn castling_rights(board: &Board) -> String {
        let mut rights = String::new();

        for color in [Color::White, Color::Black] {
            let rank = match color {
                Color::White => 0,
                Color::Black => 7,
            };
            let has = |file: u8, kind: PieceKind| {
                board.get(Square::from_coords(file, rank)) == Some(Piece::new(kind, color))
            };
            if !has(4, PieceKind::King) {
                continue;
            }
            if has(7, PieceKind::Rook) {
                rights.push(PieceKind::King.to_fen_char(color));
            }
            if has(0, PieceKind::Rook) {
                rights.push(PieceKind::Queen.to_fen_char(color));
            }
        }

        if rights.is_empty() {
            rights.push('-');
        }
        rights
    }

    /// 标准开局
    pub fn initial() -> BoardState {
        Self::parse(STARTING_FEN).unwrap_or_else(|_| BoardState::standard())
    }
}

fn parse_side(field: &str) -> Result<Color> {
    let mut chars = field.chars();
    match (chars.next().and_then(Color::from_fen_char), chars.next()) {
        (Some(color), None) => Ok(color),
        _ => Err(EditorError::InvalidFen {
            reason: format!("Invalid side to move: {}", field),
        }),
    }
}

fn parse_number(field: &str, name: &str) -> Result<u32> {
    field.parse().map_err(|_| EditorError::InvalidFen {
        reason: format!("Invalid {}: {}", name, field),
    })
}
