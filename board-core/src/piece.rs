//! 棋子与格子定义

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, SQUARE_COUNT};
use crate::error::{EditorError, Result};

/// 棋子种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// 兵
    Pawn,
    /// 马
    Knight,
    /// 象
    Bishop,
    /// 车
    Rook,
    /// 后
    Queen,
    /// 王
    King,
}

impl PieceKind {
    /// 全部棋子种类（面板顺序）
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// 在攻击表中的下标
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// 获取 FEN 字符（白方大写，黑方小写）
    pub fn to_fen_char(self, color: Color) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<(PieceKind, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, color))
    }
}

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// 白方（先手，在下方）
    White,
    /// 黑方（后手，在上方）
    Black,
}

impl Color {
    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Color> {
        match c {
            'w' | 'W' => Some(Color::White),
            'b' | 'B' => Some(Color::Black),
            _ => None,
        }
    }
}

/// 棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    /// 创建新棋子
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// 获取棋子的 Unicode 符号
    pub fn glyph(&self) -> char {
        match (self.kind, self.color) {
            (PieceKind::Pawn, Color::White) => '♙',
            (PieceKind::Knight, Color::White) => '♘',
            (PieceKind::Bishop, Color::White) => '♗',
            (PieceKind::Rook, Color::White) => '♖',
            (PieceKind::Queen, Color::White) => '♕',
            (PieceKind::King, Color::White) => '♔',
            (PieceKind::Pawn, Color::Black) => '♟',
            (PieceKind::Knight, Color::Black) => '♞',
            (PieceKind::Bishop, Color::Black) => '♝',
            (PieceKind::Rook, Color::Black) => '♜',
            (PieceKind::Queen, Color::Black) => '♛',
            (PieceKind::King, Color::Black) => '♚',
        }
    }

    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        self.kind.to_fen_char(self.color)
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Piece> {
        PieceKind::from_fen_char(c).map(|(kind, color)| Piece { kind, color })
    }
}

/// 棋盘格子，索引 = rank * 8 + file（a1 = 0，h8 = 63）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square(u8);

impl Square {
    /// 创建格子，越界返回 None
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if (file as usize) < BOARD_SIZE && (rank as usize) < BOARD_SIZE {
            Some(Self(rank * BOARD_SIZE as u8 + file))
        } else {
            None
        }
    }

    /// 创建格子，越界返回 `InvalidSquare` 错误
    pub fn try_new(file: u8, rank: u8) -> Result<Self> {
        Self::new(file, rank).ok_or(EditorError::InvalidSquare { file, rank })
    }

    /// 用于常量和字面量，越界直接 panic
    pub const fn from_coords(file: u8, rank: u8) -> Self {
        assert!(file < 8 && rank < 8, "square coordinates out of range");
        Self(rank * 8 + file)
    }

    /// 全部 64 个格子（a1, b1, ..., h8）
    pub fn all() -> impl Iterator<Item = Square> {
        (0..SQUARE_COUNT as u8).map(Square)
    }

    /// 列 (0-7，对应 a-h)
    pub const fn file(&self) -> u8 {
        self.0 % 8
    }

    /// 行 (0-7，对应 1-8)
    pub const fn rank(&self) -> u8 {
        self.0 / 8
    }

    /// 转换为数组索引
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// 是否为浅色格
    pub fn is_light(&self) -> bool {
        (self.file() + self.rank()) % 2 == 1
    }

    /// 代数记谱名称，如 "e4"
    pub fn name(&self) -> String {
        format!("{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Square {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || EditorError::InvalidSquareName { name: s.to_string() };
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Square::new(file, rank).ok_or_else(invalid)
    }
}

impl From<Color> for shakmaty::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::White => shakmaty::Color::White,
            Color::Black => shakmaty::Color::Black,
        }
    }
}

impl From<shakmaty::Color> for Color {
    fn from(color: shakmaty::Color) -> Self {
        match color {
            shakmaty::Color::White => Color::White,
            shakmaty::Color::Black => Color::Black,
        }
    }
}

impl From<shakmaty::Piece> for Piece {
    fn from(piece: shakmaty::Piece) -> Self {
        let kind = match piece.role {
            shakmaty::Role::Pawn => PieceKind::Pawn,
            shakmaty::Role::Knight => PieceKind::Knight,
            shakmaty::Role::Bishop => PieceKind::Bishop,
            shakmaty::Role::Rook => PieceKind::Rook,
            shakmaty::Role::Queen => PieceKind::Queen,
            shakmaty::Role::King => PieceKind::King,
        };
        Piece::new(kind, piece.color.into())
    }
}

impl From<Square> for shakmaty::Square {
    fn from(square: Square) -> Self {
        shakmaty::Square::new(square.index() as u32)
    }
}
