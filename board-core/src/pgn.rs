//! PGN 棋谱载入与导出
//!
//! 用 pgn-reader 读取第一盘棋的主线，用 shakmaty 逐步重放 SAN 着法，
//! 保存每一步之后的局面以便前后翻看。变着和注释被跳过。

use std::io::Cursor;
use std::ops::ControlFlow;

use pgn_reader::{RawTag, SanPlus, Skip, Visitor};
use shakmaty::fen::Fen as ShakmatyFen;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Position};
use tracing::debug;

use crate::board::{Board, BoardState};
use crate::error::{EditorError, Result};

/// 导出时每行的最大宽度
const LINE_WIDTH: usize = 80;

/// 已载入的棋谱
#[derive(Debug, Clone)]
pub struct LoadedGame {
    /// 标签（按出现顺序）
    tags: Vec<(String, String)>,
    /// 主线着法（SAN）
    moves: Vec<String>,
    /// positions[i] 为走完前 i 步后的局面，长度 = moves.len() + 1
    positions: Vec<Chess>,
}

impl LoadedGame {
    /// 解析 PGN 文本中的第一盘棋
    pub fn parse(text: &str) -> Result<Self> {
        let mut reader = pgn_reader::Reader::new(Cursor::new(text.as_bytes()));
        let mut visitor = GameReplay;

        match reader.read_game(&mut visitor) {
            Ok(Some(game)) => {
                let game = game?;
                debug!("载入棋谱: {} 步", game.plies());
                Ok(game)
            }
            Ok(None) => Err(EditorError::InvalidPgn {
                reason: "No game found".to_string(),
            }),
            Err(e) => Err(EditorError::InvalidPgn {
                reason: e.to_string(),
            }),
        }
    }

    /// 主线半回合数
    pub fn plies(&self) -> usize {
        self.moves.len()
    }

    /// 主线着法
    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    /// 全部标签
    pub fn tags(&self) -> &[(String, String)] {
        &self.tags
    }

    /// 按名称查找标签
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// 对局结果，缺省为 "*"
    pub fn result(&self) -> &str {
        self.tag("Result").unwrap_or("*")
    }

    /// 走完前 `ply` 步后的局面
    pub fn position_at(&self, ply: usize) -> Option<&Chess> {
        self.positions.get(ply)
    }

    /// 走完前 `ply` 步后的局面状态
    pub fn board_at(&self, ply: usize) -> Option<BoardState> {
        self.position_at(ply).map(|position| BoardState {
            board: Board::from_shakmaty(position.board()),
            side_to_move: position.turn().into(),
            halfmove_clock: position.halfmoves(),
            fullmove_number: position.fullmoves().get(),
        })
    }

    /// 走完前 `ply` 步后局面的 FEN
    pub fn fen_at(&self, ply: usize) -> Option<String> {
        self.position_at(ply)
            .map(|position| ShakmatyFen::from_position(position, EnPassantMode::Legal).to_string())
    }

    /// 导出标签和前 `upto` 步着法
    ///
    /// 没有走到最后一步时结果记为 "*"。
    pub fn to_pgn(&self, upto: usize) -> String {
        let upto = upto.min(self.plies());
        let result = if upto == self.plies() {
            self.result()
        } else {
            "*"
        };

        let mut out = String::new();
        let mut has_result_tag = false;
        for (name, value) in &self.tags {
            let value = if name == "Result" {
                has_result_tag = true;
                result
            } else {
                value.as_str()
            };
            out.push_str(&format_tag(name, value));
            out.push('\n');
        }
        if !has_result_tag {
            out.push_str(&format_tag("Result", result));
            out.push('\n');
        }
        out.push('\n');

        let mut tokens = Vec::with_capacity(upto * 3 / 2 + 1);
        for (ply, san) in self.moves[..upto].iter().enumerate() {
            let before = &self.positions[ply];
            let number = before.fullmoves().get();
            match before.turn() {
                shakmaty::Color::White => tokens.push(format!("{}.", number)),
                shakmaty::Color::Black if ply == 0 => tokens.push(format!("{}...", number)),
                shakmaty::Color::Black => {}
            }
            tokens.push(san.clone());
        }
        tokens.push(result.to_string());

        out.push_str(&wrap_tokens(&tokens));
        out.push('\n');
        out
    }
}

/// 单个 PGN 标签行
pub fn format_tag(name: &str, value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("[{} \"{}\"]", name, escaped)
}

fn wrap_tokens(tokens: &[String]) -> String {
    let mut out = String::new();
    let mut line_len = 0;
    for token in tokens {
        if line_len > 0 && line_len + 1 + token.len() > LINE_WIDTH {
            out.push('\n');
            line_len = 0;
        } else if line_len > 0 {
            out.push(' ');
            line_len += 1;
        }
        out.push_str(token);
        line_len += token.len();
    }
    out
}

/// 标签阶段的状态
#[derive(Default)]
struct ReplayTags {
    tags: Vec<(String, String)>,
    fen: Option<String>,
}

/// 着法阶段的状态
struct ReplayMoves {
    tags: Vec<(String, String)>,
    moves: Vec<String>,
    positions: Vec<Chess>,
}

/// 重放主线的 Visitor
struct GameReplay;

impl Visitor for GameReplay {
    type Tags = ReplayTags;
    type Movetext = ReplayMoves;
    type Output = Result<LoadedGame>;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        ControlFlow::Continue(ReplayTags::default())
    }

    fn tag(
        &mut self,
        tags: &mut Self::Tags,
        name: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        let name = String::from_utf8_lossy(name).to_string();
        let value = value.decode_utf8_lossy().to_string();
        if name == "FEN" {
            tags.fen = Some(value.clone());
        }
        tags.tags.push((name, value));
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, tags: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        let start = match tags.fen.as_deref() {
            Some(fen) => match start_position(fen) {
                Ok(position) => position,
                Err(e) => return ControlFlow::Break(Err(e)),
            },
            None => Chess::default(),
        };

        ControlFlow::Continue(ReplayMoves {
            tags: tags.tags,
            moves: Vec::new(),
            positions: vec![start],
        })
    }

    fn san(&mut self, movetext: &mut Self::Movetext, san: SanPlus) -> ControlFlow<Self::Output> {
        let ply = movetext.moves.len() + 1;
        let illegal = || EditorError::IllegalMove {
            san: san.to_string(),
            ply,
        };

        let Some(current) = movetext.positions.last() else {
            return ControlFlow::Break(Err(illegal()));
        };
        let next = match san.san.to_move(current) {
            Ok(m) => current.clone().play(m).map_err(|_| illegal()),
            Err(_) => Err(illegal()),
        };

        match next {
            Ok(position) => {
                movetext.moves.push(san.to_string());
                movetext.positions.push(position);
                ControlFlow::Continue(())
            }
            Err(e) => ControlFlow::Break(Err(e)),
        }
    }

    fn begin_variation(
        &mut self,
        _movetext: &mut Self::Movetext,
    ) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn end_game(&mut self, movetext: Self::Movetext) -> Self::Output {
        if movetext.tags.is_empty() && movetext.moves.is_empty() {
            return Err(EditorError::InvalidPgn {
                reason: "No game found".to_string(),
            });
        }
        Ok(LoadedGame {
            tags: movetext.tags,
            moves: movetext.moves,
            positions: movetext.positions,
        })
    }
}

/// 由 `[FEN]` 标签得到起始局面
fn start_position(fen: &str) -> Result<Chess> {
    let setup: ShakmatyFen = fen.parse().map_err(|e| EditorError::InvalidFen {
        reason: format!("{}", e),
    })?;
    setup
        .into_position(CastlingMode::Standard)
        .map_err(|e| EditorError::InvalidFen {
            reason: format!("{}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::STARTING_FEN;
    use crate::piece::{Color, Piece, PieceKind, Square};

    const SAMPLE_PGN: &str = r#"[Event "Test"]
[White "Alice"]
[Black "Bob"]
[Result "1-0"]

1. e4 e5 2. Nf3 (2. f4 exf4) Nc6 {main line} 3. Bb5 1-0
"#;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_parse_main_line() {
        let game = LoadedGame::parse(SAMPLE_PGN).unwrap();

        assert_eq!(game.plies(), 5);
        assert_eq!(game.moves(), &["e4", "e5", "Nf3", "Nc6", "Bb5"]);
        assert_eq!(game.tag("White"), Some("Alice"));
        assert_eq!(game.result(), "1-0");
        assert_eq!(game.tags().len(), 4);
    }

    #[test]
    fn test_positions_along_main_line() {
        let game = LoadedGame::parse(SAMPLE_PGN).unwrap();

        assert_eq!(game.fen_at(0).as_deref(), Some(STARTING_FEN));
        assert_eq!(game.board_at(0), Some(BoardState::standard()));

        let after_e4 = game.board_at(1).unwrap();
        assert_eq!(after_e4.side_to_move, Color::Black);
        assert_eq!(
            after_e4.board.get(sq("e4")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );

        let last = game.board_at(5).unwrap();
        assert_eq!(
            last.board.get(sq("b5")),
            Some(Piece::new(PieceKind::Bishop, Color::White))
        );
        assert_eq!(last.fullmove_number, 3);
        assert!(game.board_at(6).is_none());
    }

    #[test]
    fn test_fen_tag_start() {
        let pgn = r#"[FEN "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"]
[SetUp "1"]

1. e4 Kd7 *
"#;
        let game = LoadedGame::parse(pgn).unwrap();
        assert_eq!(game.plies(), 2);
        assert_eq!(game.board_at(0).unwrap().board.piece_count(), 3);
        assert_eq!(
            game.board_at(2).unwrap().board.get(sq("d7")),
            Some(Piece::new(PieceKind::King, Color::Black))
        );
        assert_eq!(game.result(), "*");
    }

    #[test]
    fn test_illegal_move_rejected() {
        let pgn = "1. e4 e5 2. Ke3 *\n";
        assert_eq!(
            LoadedGame::parse(pgn).unwrap_err(),
            EditorError::IllegalMove {
                san: "Ke3".to_string(),
                ply: 3
            }
        );
    }

    #[test]
    fn test_invalid_fen_tag_rejected() {
        let pgn = "[FEN \"not a fen\"]\n\n1. e4 *\n";
        assert!(matches!(
            LoadedGame::parse(pgn),
            Err(EditorError::InvalidFen { .. })
        ));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(
            LoadedGame::parse(""),
            Err(EditorError::InvalidPgn { .. })
        ));
    }

    #[test]
    fn test_export_up_to_ply() {
        let game = LoadedGame::parse(SAMPLE_PGN).unwrap();

        let full = game.to_pgn(game.plies());
        assert_eq!(
            full,
            "[Event \"Test\"]\n[White \"Alice\"]\n[Black \"Bob\"]\n[Result \"1-0\"]\n\n1. e4 e5 2. Nf3 Nc6 3. Bb5 1-0\n"
        );

        let partial = game.to_pgn(3);
        assert!(partial.contains("[Result \"*\"]"));
        assert!(partial.ends_with("\n1. e4 e5 2. Nf3 *\n"));

        let none = game.to_pgn(0);
        assert!(none.ends_with("\n\n*\n"));
    }

    #[test]
    fn test_export_black_to_move_start() {
        let pgn = r#"[FEN "4k3/8/8/8/8/8/4P3/4K3 b - - 0 12"]

12... Kd7 13. e4 *
"#;
        let game = LoadedGame::parse(pgn).unwrap();
        let exported = game.to_pgn(2);
        assert!(exported.ends_with("\n12... Kd7 13. e4 *\n"));
        // 缺少 Result 标签时补上
        assert!(exported.contains("[Result \"*\"]"));
    }

    #[test]
    fn test_exported_pgn_reloads() {
        let game = LoadedGame::parse(SAMPLE_PGN).unwrap();
        let reloaded = LoadedGame::parse(&game.to_pgn(4)).unwrap();
        assert_eq!(reloaded.plies(), 4);
        assert_eq!(reloaded.fen_at(4), game.fen_at(4));
    }

    #[test]
    fn test_format_tag_escapes() {
        assert_eq!(format_tag("Event", "a \"b\""), "[Event \"a \\\"b\\\"\"]");
    }

    #[test]
    fn test_wrap_long_movetext() {
        let tokens: Vec<String> = (0..40).map(|i| format!("{}.", i)).collect();
        let wrapped = wrap_tokens(&tokens);
        assert!(wrapped.lines().count() > 1);
        assert!(wrapped.lines().all(|line| line.len() <= LINE_WIDTH));
    }
}
