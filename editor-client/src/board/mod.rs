//! 棋盘渲染模块
//!
//! 负责格子、棋子、攻击计数和拖动中棋子的显示

mod render;

pub use render::*;

use bevy::prelude::*;

use crate::EditorSet;

/// 棋盘插件
pub struct BoardPlugin;

impl Plugin for BoardPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_board).add_systems(
            Update,
            (update_pieces, update_attack_counts, update_drag_ghost).in_set(EditorSet::Render),
        );
    }
}

/// 棋盘根节点标记
#[derive(Component)]
pub struct BoardMarker;

/// 格子
#[derive(Component, Debug, Clone, Copy)]
pub struct SquareCell(pub board_core::Square);

/// 格子上的棋子圆盘
#[derive(Component, Debug, Clone, Copy)]
pub struct PieceDisc(pub board_core::Square);

/// 棋子文字
#[derive(Component, Debug, Clone, Copy)]
pub struct PieceLabel(pub board_core::Square);

/// 攻击计数文字（白方在左上角，黑方在右上角）
#[derive(Component, Debug, Clone, Copy)]
pub struct CountLabel {
    pub square: board_core::Square,
    pub color: board_core::Color,
}

/// 跟随光标的拖动棋子
#[derive(Component)]
pub struct DragGhost;

/// 拖动棋子的圆盘
#[derive(Component)]
pub struct DragGhostDisc;

/// 拖动棋子的文字
#[derive(Component)]
pub struct DragGhostLabel;

/// 棋子字体
#[derive(Resource, Clone, Debug, Default)]
pub struct PieceFont {
    pub handle: Handle<Font>,
    /// 是否使用 Unicode 棋子符号（需要字体支持）
    pub glyphs: bool,
}

impl PieceFont {
    /// 棋子显示文字
    pub fn label(&self, piece: board_core::Piece) -> String {
        if self.glyphs {
            piece.glyph().to_string()
        } else {
            piece.to_fen_char().to_string()
        }
    }
}
