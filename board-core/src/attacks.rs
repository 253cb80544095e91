//! 攻击计数
//!
//! 按棋子种类查表得到攻击模式函数，统计每个格子被白方、黑方多少个棋子攻击。
//! 只看几何攻击模式：不考虑走子方、将军和牵制，棋盘可以是任意非法局面。
//! 各种棋子的攻击格由 shakmaty 的攻击表给出，滑行棋子按当前占位计算阻挡。

use serde::{Deserialize, Serialize};
use shakmaty::{attacks, Bitboard};

use crate::board::Board;
use crate::constants::SQUARE_COUNT;
use crate::piece::{Color, PieceKind, Square};

/// 格子集合（64 位位棋盘）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SquareSet(u64);

impl SquareSet {
    /// 空集合
    pub const EMPTY: SquareSet = SquareSet(0);

    /// 加入格子
    pub fn insert(&mut self, square: Square) {
        self.0 |= 1u64 << square.index();
    }

    /// 是否包含格子
    pub fn contains(&self, square: Square) -> bool {
        self.0 & (1u64 << square.index()) != 0
    }

    /// 格子数量
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// 按索引升序遍历
    pub fn iter(&self) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(move |sq| self.contains(*sq))
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        for square in iter {
            set.insert(square);
        }
        set
    }
}

impl From<Bitboard> for SquareSet {
    fn from(bitboard: Bitboard) -> Self {
        SquareSet(bitboard.0)
    }
}

impl From<SquareSet> for Bitboard {
    fn from(set: SquareSet) -> Self {
        Bitboard(set.0)
    }
}

/// 攻击模式函数：给定棋盘、棋子所在格和阵营，返回其攻击到的格子
pub type AttackPattern = fn(&Board, Square, Color) -> SquareSet;

/// 攻击模式表，按 `PieceKind::index()` 排列
pub const ATTACK_TABLE: [AttackPattern; 6] = [
    pawn_attacks,
    knight_attacks,
    bishop_attacks,
    rook_attacks,
    queen_attacks,
    king_attacks,
];

/// 查表获取指定种类的攻击模式
pub fn pattern_for(kind: PieceKind) -> AttackPattern {
    ATTACK_TABLE[kind.index()]
}

/// 兵：只攻击前方两个斜格
fn pawn_attacks(_board: &Board, from: Square, color: Color) -> SquareSet {
    attacks::pawn_attacks(color.into(), from.into()).into()
}

fn knight_attacks(_board: &Board, from: Square, _color: Color) -> SquareSet {
    attacks::knight_attacks(from.into()).into()
}

fn bishop_attacks(board: &Board, from: Square, _color: Color) -> SquareSet {
    attacks::bishop_attacks(from.into(), board.occupied().into()).into()
}

fn rook_attacks(board: &Board, from: Square, _color: Color) -> SquareSet {
    attacks::rook_attacks(from.into(), board.occupied().into()).into()
}

fn queen_attacks(board: &Board, from: Square, _color: Color) -> SquareSet {
    attacks::queen_attacks(from.into(), board.occupied().into()).into()
}

fn king_attacks(_board: &Board, from: Square, _color: Color) -> SquareSet {
    attacks::king_attacks(from.into()).into()
}

/// 指定格子上的棋子攻击到的格子；空格返回空集合
pub fn attacks_from(board: &Board, from: Square) -> SquareSet {
    match board.get(from) {
        Some(piece) => pattern_for(piece.kind)(board, from, piece.color),
        None => SquareSet::EMPTY,
    }
}

/// 攻击目标格的指定阵营棋子所在格
pub fn attackers(board: &Board, target: Square, color: Color) -> SquareSet {
    board
        .pieces(color)
        .into_iter()
        .filter(|(sq, piece)| pattern_for(piece.kind)(board, *sq, piece.color).contains(target))
        .map(|(sq, _)| sq)
        .collect()
}

/// 单个格子的攻击数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareAttacks {
    pub white: u8,
    pub black: u8,
}

impl SquareAttacks {
    /// 按阵营取值
    pub fn for_color(&self, color: Color) -> u8 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
}

/// 全盘攻击计数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackCounts {
    counts: Vec<SquareAttacks>,
}

impl AttackCounts {
    /// 对整个棋盘重新计数
    pub fn compute(board: &Board) -> Self {
        let mut counts = vec![SquareAttacks::default(); SQUARE_COUNT];

        for (from, piece) in board.all_pieces() {
            let targets = pattern_for(piece.kind)(board, from, piece.color);
            for target in targets.iter() {
                let entry = &mut counts[target.index()];
                match piece.color {
                    Color::White => entry.white += 1,
                    Color::Black => entry.black += 1,
                }
            }
        }

        Self { counts }
    }

    /// 获取指定格子的攻击数
    pub fn get(&self, square: Square) -> SquareAttacks {
        self.counts[square.index()]
    }

    /// 遍历所有格子
    pub fn iter(&self) -> impl Iterator<Item = (Square, SquareAttacks)> + '_ {
        Square::all().map(move |sq| (sq, self.get(sq)))
    }

    /// 是否所有格子都未被攻击
    pub fn is_zero(&self) -> bool {
        self.counts.iter().all(|c| c.white == 0 && c.black == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;
    use shakmaty::{fen::Fen, CastlingMode, Chess, Position};

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn board_with(pieces: &[(&str, PieceKind, Color)]) -> Board {
        let mut board = Board::empty();
        for &(name, kind, color) in pieces {
            board.set(sq(name), Some(Piece::new(kind, color)));
        }
        board
    }

    /// 用 shakmaty 的 attacks_to 做对照
    fn assert_matches_shakmaty(fen: &str) {
        let setup: Fen = fen.parse().unwrap();
        let position: Chess = setup.into_position(CastlingMode::Standard).unwrap();
        let board = Board::from_shakmaty(position.board());
        let counts = AttackCounts::compute(&board);

        for square in Square::all() {
            let target: shakmaty::Square = square.into();
            let occupied = position.board().occupied();
            let white = position
                .board()
                .attacks_to(target, shakmaty::Color::White, occupied)
                .count();
            let black = position
                .board()
                .attacks_to(target, shakmaty::Color::Black, occupied)
                .count();
            assert_eq!(counts.get(square).white as usize, white, "white on {}", square);
            assert_eq!(counts.get(square).black as usize, black, "black on {}", square);
        }
    }

    #[test]
    fn test_table_is_indexed_by_kind() {
        let board = board_with(&[("d4", PieceKind::Rook, Color::White)]);
        let rook = ATTACK_TABLE[PieceKind::Rook.index()](&board, sq("d4"), Color::White);
        assert_eq!(rook.len(), 14);
        let knight = ATTACK_TABLE[PieceKind::Knight.index()](&board, sq("d4"), Color::White);
        assert_eq!(knight.len(), 8);
    }

    #[test]
    fn test_pawn_attacks_forward_diagonals() {
        let board = board_with(&[
            ("e4", PieceKind::Pawn, Color::White),
            ("d5", PieceKind::Pawn, Color::Black),
        ]);

        let white = attacks_from(&board, sq("e4"));
        assert_eq!(white.len(), 2);
        assert!(white.contains(sq("d5")));
        assert!(white.contains(sq("f5")));
        // 兵不攻击正前方
        assert!(!white.contains(sq("e5")));

        let black = attacks_from(&board, sq("d5"));
        assert!(black.contains(sq("c4")));
        assert!(black.contains(sq("e4")));
    }

    #[test]
    fn test_pawn_on_edge_file() {
        let board = board_with(&[("a2", PieceKind::Pawn, Color::White)]);
        let set = attacks_from(&board, sq("a2"));
        assert_eq!(set.len(), 1);
        assert!(set.contains(sq("b3")));
    }

    #[test]
    fn test_pawn_on_last_rank_attacks_nothing() {
        let board = board_with(&[("e8", PieceKind::Pawn, Color::White)]);
        assert!(attacks_from(&board, sq("e8")).is_empty());
    }

    #[test]
    fn test_knight_attacks() {
        let board = board_with(&[("d4", PieceKind::Knight, Color::White)]);
        assert_eq!(attacks_from(&board, sq("d4")).len(), 8);

        let board = board_with(&[("a1", PieceKind::Knight, Color::Black)]);
        let set = attacks_from(&board, sq("a1"));
        assert_eq!(set.len(), 2);
        assert!(set.contains(sq("b3")));
        assert!(set.contains(sq("c2")));
    }

    #[test]
    fn test_knight_jumps_over_pieces() {
        let board = Board::standard();
        let set = attacks_from(&board, sq("g1"));
        assert!(set.contains(sq("f3")));
        assert!(set.contains(sq("h3")));
        assert!(set.contains(sq("e2")));
    }

    #[test]
    fn test_king_attacks() {
        let board = board_with(&[("e4", PieceKind::King, Color::White)]);
        assert_eq!(attacks_from(&board, sq("e4")).len(), 8);

        let board = board_with(&[("h8", PieceKind::King, Color::Black)]);
        assert_eq!(attacks_from(&board, sq("h8")).len(), 3);
    }

    #[test]
    fn test_rook_on_empty_board() {
        let board = board_with(&[("d4", PieceKind::Rook, Color::White)]);
        assert_eq!(attacks_from(&board, sq("d4")).len(), 14);
    }

    #[test]
    fn test_bishop_on_empty_board() {
        let board = board_with(&[("d4", PieceKind::Bishop, Color::White)]);
        assert_eq!(attacks_from(&board, sq("d4")).len(), 13);
    }

    #[test]
    fn test_queen_on_empty_board() {
        let board = board_with(&[("d4", PieceKind::Queen, Color::Black)]);
        assert_eq!(attacks_from(&board, sq("d4")).len(), 27);
    }

    #[test]
    fn test_ray_stops_at_blocker_and_includes_it() {
        let board = board_with(&[
            ("a1", PieceKind::Rook, Color::White),
            ("a4", PieceKind::Pawn, Color::White),
        ]);
        let set = attacks_from(&board, sq("a1"));
        assert!(set.contains(sq("a2")));
        assert!(set.contains(sq("a3")));
        // 己方棋子也算被攻击（保护）
        assert!(set.contains(sq("a4")));
        assert!(!set.contains(sq("a5")));
        // 横向不受影响
        assert!(set.contains(sq("h1")));
    }

    #[test]
    fn test_attacks_from_empty_square() {
        let board = Board::standard();
        assert!(attacks_from(&board, sq("e4")).is_empty());
    }

    #[test]
    fn test_attackers() {
        let board = Board::standard();

        // f3 被 e2、g2 两个兵和 g1 马攻击
        let set = attackers(&board, sq("f3"), Color::White);
        assert_eq!(set.len(), 3);
        assert!(set.contains(sq("e2")));
        assert!(set.contains(sq("g2")));
        assert!(set.contains(sq("g1")));

        assert!(attackers(&board, sq("f3"), Color::Black).is_empty());
    }

    #[test]
    fn test_piece_does_not_attack_own_square() {
        let board = board_with(&[("d4", PieceKind::Queen, Color::White)]);
        let counts = AttackCounts::compute(&board);
        assert_eq!(counts.get(sq("d4")), SquareAttacks::default());
    }

    #[test]
    fn test_standard_start_reference_counts() {
        let counts = AttackCounts::compute(&Board::standard());

        // 中心格 e4/d5 开局无人攻击
        assert_eq!(counts.get(sq("e4")), SquareAttacks { white: 0, black: 0 });

        // 第三行：f3 = e2 + g2 + g1，c6 = b7 + d7 + b8
        assert_eq!(counts.get(sq("f3")), SquareAttacks { white: 3, black: 0 });
        assert_eq!(counts.get(sq("c6")), SquareAttacks { white: 0, black: 3 });
        // d3 = c2 + e2
        assert_eq!(counts.get(sq("d3")), SquareAttacks { white: 2, black: 0 });

        // 角落车所在格：对方 0，己方 0（无人能够到 a1）
        assert_eq!(counts.get(sq("a1")), SquareAttacks { white: 0, black: 0 });
        assert_eq!(counts.get(sq("h8")), SquareAttacks { white: 0, black: 0 });

        // e2 = e1 王 + d1 后 + f1 象 + g1 马
        assert_eq!(counts.get(sq("e2")), SquareAttacks { white: 4, black: 0 });
    }

    #[test]
    fn test_empty_board_has_no_attacks() {
        assert!(AttackCounts::compute(&Board::empty()).is_zero());
    }

    #[test]
    fn test_both_colors_counted_simultaneously() {
        let board = board_with(&[
            ("d1", PieceKind::Rook, Color::White),
            ("d8", PieceKind::Rook, Color::Black),
            ("c3", PieceKind::Knight, Color::Black),
        ]);
        let counts = AttackCounts::compute(&board);
        assert_eq!(counts.get(sq("d5")), SquareAttacks { white: 1, black: 2 });
        assert_eq!(counts.get(sq("d4")).for_color(Color::White), 1);
        assert_eq!(counts.get(sq("d4")).for_color(Color::Black), 1);
    }

    #[test]
    fn test_matches_shakmaty_standard() {
        assert_matches_shakmaty("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    }

    #[test]
    fn test_matches_shakmaty_middlegame() {
        assert_matches_shakmaty(
            "r1bq1rk1/pp2bppp/2n1pn2/3p4/2PP4/2N1PN2/PP1B1PPP/R2QKB1R w KQ - 0 8",
        );
        assert_matches_shakmaty("8/2k5/3p4/p2P1p2/P2P1P2/8/5K2/8 w - - 0 1");
    }

    #[test]
    fn test_sliders_use_current_occupancy() {
        let mut board = board_with(&[
            ("d4", PieceKind::Queen, Color::White),
            ("d6", PieceKind::Knight, Color::Black),
            ("f6", PieceKind::Pawn, Color::White),
        ]);
        let set = attacks_from(&board, sq("d4"));
        assert!(set.contains(sq("d6")));
        assert!(!set.contains(sq("d7")));
        assert!(set.contains(sq("f6")));
        assert!(!set.contains(sq("g7")));

        board.set(sq("d6"), None);
        let set = attacks_from(&board, sq("d4"));
        assert!(set.contains(sq("d7")));
        assert!(set.contains(sq("d8")));
    }

    #[test]
    fn test_square_set_bitboard_conversion() {
        let set: SquareSet = [sq("a1"), sq("e4")].into_iter().collect();
        let bitboard = Bitboard::from(set);
        assert!(bitboard.contains(shakmaty::Square::A1));
        assert!(bitboard.contains(shakmaty::Square::E4));
        assert_eq!(bitboard.count(), 2);
        assert_eq!(SquareSet::from(bitboard), set);
    }

    #[test]
    fn test_square_set() {
        let set: SquareSet = [sq("a1"), sq("h8"), sq("a1")].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(sq("h8")));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![sq("a1"), sq("h8")]);
        assert!(SquareSet::EMPTY.is_empty());
    }
}
