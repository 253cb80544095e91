//! 国际象棋棋盘编辑器客户端
//!
//! 使用 Bevy 引擎实现的棋盘编辑器：拖放摆子，实时显示每个格子被双方攻击的次数

pub mod board;
pub mod editor;
pub mod layout;
pub mod settings;
pub mod storage;
pub mod theme;
pub mod ui;

use bevy::prelude::*;

/// 配置和数据目录名
pub const APP_DIR_NAME: &str = "chess-board-editor";

/// 每帧的系统顺序：输入 → 执行命令 → 刷新显示
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorSet {
    Input,
    Apply,
    Render,
}

/// 客户端插件
pub struct EditorClientPlugin;

impl Plugin for EditorClientPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<layout::EditorLayout>()
            .configure_sets(
                Update,
                (EditorSet::Input, EditorSet::Apply, EditorSet::Render).chain(),
            )
            .add_systems(Startup, spawn_camera)
            .add_plugins((
                settings::SettingsPlugin,
                theme::ThemePlugin,
                editor::EditorPlugin,
                board::BoardPlugin,
                ui::UiPlugin,
            ));
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
