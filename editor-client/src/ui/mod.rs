//! UI 模块
//!
//! 右侧工具面板：状态栏、按钮、棋子图标

mod panel;

pub use panel::*;

use bevy::prelude::*;

use crate::board::setup_board;
use crate::EditorSet;

/// UI 插件
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_panel.after(setup_board))
            .add_systems(Update, handle_panel_buttons.in_set(EditorSet::Input))
            .add_systems(
                Update,
                (update_status_text, update_lock_button_text).in_set(EditorSet::Render),
            );
    }
}

/// 面板标记
#[derive(Component)]
pub struct PanelMarker;

/// 状态栏文字
#[derive(Component)]
pub struct StatusText;

/// 锁定按钮文字（随锁定状态切换）
#[derive(Component)]
pub struct LockButtonText;

/// 面板中的棋子图标
#[derive(Component, Debug, Clone, Copy)]
pub struct PaletteIcon(pub board_core::Piece);
