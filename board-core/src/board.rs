//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::attacks::SquareSet;
use crate::constants::SQUARE_COUNT;
use crate::piece::{Color, Piece, PieceKind, Square};

/// 底线棋子排列（a 到 h）
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// 棋盘
///
/// 每格最多一个棋子，不做任何合法性约束（可以没有王、兵在底线等）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// 8x8 棋盘，索引为 rank * 8 + file，使用 Vec 以支持 serde
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: vec![None; SQUARE_COUNT],
        }
    }

    /// 创建标准开局棋盘
    pub fn standard() -> Self {
        let mut board = Self::empty();

        for (file, kind) in BACK_RANK.into_iter().enumerate() {
            let file = file as u8;
            board.set(Square::from_coords(file, 0), Some(Piece::new(kind, Color::White)));
            board.set(
                Square::from_coords(file, 1),
                Some(Piece::new(PieceKind::Pawn, Color::White)),
            );
            board.set(
                Square::from_coords(file, 6),
                Some(Piece::new(PieceKind::Pawn, Color::Black)),
            );
            board.set(Square::from_coords(file, 7), Some(Piece::new(kind, Color::Black)));
        }

        board
    }

    /// 获取指定格子的棋子
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// 设置指定格子的棋子
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index()] = piece;
    }

    /// 格子是否有棋子
    pub fn is_occupied(&self, square: Square) -> bool {
        self.get(square).is_some()
    }

    /// 所有有棋子的格子（滑行棋子的阻挡）
    pub fn occupied(&self) -> SquareSet {
        Square::all().filter(|sq| self.is_occupied(*sq)).collect()
    }

    /// 移动棋子（不检查规则），返回被覆盖的棋子
    ///
    /// 起点为空或起点等于终点时不做任何修改。
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        if from == to {
            return None;
        }
        let piece = self.get(from)?;
        let captured = self.get(to);
        self.set(from, None);
        self.set(to, Some(piece));
        captured
    }

    /// 清空棋盘
    pub fn clear(&mut self) {
        self.squares.iter_mut().for_each(|sq| *sq = None);
    }

    /// 获取指定阵营的所有棋子位置
    pub fn pieces(&self, color: Color) -> Vec<(Square, Piece)> {
        self.all_pieces()
            .into_iter()
            .filter(|(_, piece)| piece.color == color)
            .collect()
    }

    /// 获取所有棋子
    pub fn all_pieces(&self) -> Vec<(Square, Piece)> {
        Square::all()
            .filter_map(|sq| self.get(sq).map(|piece| (sq, piece)))
            .collect()
    }

    /// 棋子总数
    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|sq| sq.is_some()).count()
    }

    /// 是否为空棋盘
    pub fn is_empty(&self) -> bool {
        self.piece_count() == 0
    }

    /// 从 shakmaty 棋盘转换
    pub fn from_shakmaty(board: &shakmaty::Board) -> Self {
        let mut result = Self::empty();
        for square in Square::all() {
            let piece = board.piece_at(square.into()).map(Piece::from);
            result.set(square, piece);
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

/// 完整的局面状态（棋盘 + FEN 附加字段）
///
/// 编辑操作只修改棋盘，附加字段只在载入 FEN 或复位时改变。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// 棋盘
    pub board: Board,
    /// 当前走子方
    pub side_to_move: Color,
    /// 50 步规则计数
    pub halfmove_clock: u32,
    /// 回合数
    pub fullmove_number: u32,
}

impl BoardState {
    /// 创建空局面
    pub fn empty() -> Self {
        Self::from_board(Board::empty(), Color::White)
    }

    /// 创建标准开局
    pub fn standard() -> Self {
        Self::from_board(Board::standard(), Color::White)
    }

    /// 从棋盘创建状态
    pub fn from_board(board: Board, side_to_move: Color) -> Self {
        Self {
            board,
            side_to_move,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_standard_board() {
        let board = Board::standard();
        assert_eq!(board.piece_count(), 32);

        assert_eq!(board.get(sq("e1")), Some(Piece::new(PieceKind::King, Color::White)));
        assert_eq!(board.get(sq("d8")), Some(Piece::new(PieceKind::Queen, Color::Black)));
        assert_eq!(board.get(sq("a1")), Some(Piece::new(PieceKind::Rook, Color::White)));
        assert_eq!(board.get(sq("g8")), Some(Piece::new(PieceKind::Knight, Color::Black)));
        assert_eq!(board.get(sq("c2")), Some(Piece::new(PieceKind::Pawn, Color::White)));
        assert_eq!(board.get(sq("f7")), Some(Piece::new(PieceKind::Pawn, Color::Black)));
        assert_eq!(board.get(sq("e4")), None);

        assert_eq!(board.pieces(Color::White).len(), 16);
        assert_eq!(board.pieces(Color::Black).len(), 16);
    }

    #[test]
    fn test_empty_board() {
        let board = Board::empty();
        assert!(board.is_empty());
        assert!(Square::all().all(|s| board.get(s).is_none()));
    }

    #[test]
    fn test_move_piece() {
        let mut board = Board::standard();

        let captured = board.move_piece(sq("g1"), sq("f3"));
        assert!(captured.is_none());
        assert!(board.get(sq("g1")).is_none());
        assert_eq!(board.get(sq("f3")), Some(Piece::new(PieceKind::Knight, Color::White)));

        // 覆盖对方棋子
        let captured = board.move_piece(sq("d1"), sq("d7"));
        assert_eq!(captured, Some(Piece::new(PieceKind::Pawn, Color::Black)));
        assert_eq!(board.get(sq("d7")), Some(Piece::new(PieceKind::Queen, Color::White)));
        assert_eq!(board.piece_count(), 31);
    }

    #[test]
    fn test_move_piece_noops() {
        let mut board = Board::standard();

        // 起点为空
        assert!(board.move_piece(sq("e4"), sq("e5")).is_none());
        assert_eq!(board, Board::standard());

        // 起点等于终点
        assert!(board.move_piece(sq("e2"), sq("e2")).is_none());
        assert_eq!(board, Board::standard());
    }

    #[test]
    fn test_clear() {
        let mut board = Board::standard();
        board.clear();
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn test_occupied() {
        let occupied = Board::standard().occupied();
        assert_eq!(occupied.len(), 32);
        assert!(occupied.contains(Square::from_coords(4, 0)));
        assert!(!occupied.contains(Square::from_coords(4, 3)));
        assert!(Board::empty().occupied().is_empty());
    }

    #[test]
    fn test_from_shakmaty() {
        let board = Board::from_shakmaty(&shakmaty::Board::default());
        assert_eq!(board, Board::standard());
    }

    #[test]
    fn test_board_state_defaults() {
        let state = BoardState::standard();
        assert_eq!(state.side_to_move, Color::White);
        assert_eq!(state.halfmove_clock, 0);
        assert_eq!(state.fullmove_number, 1);
        assert!(BoardState::empty().board.is_empty());
    }
}
