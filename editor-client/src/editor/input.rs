//! 输入处理

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::{BoardSession, DragState, EditorCommand};
use crate::layout::{EditorLayout, Hit};

/// 处理鼠标拖放
///
/// 左键按下开始拖动（棋盘上的棋子或面板图标），松开时按落点提交编辑。
pub fn handle_drag_input(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    layout: Res<EditorLayout>,
    session: Res<BoardSession>,
    mut drag: ResMut<DragState>,
    mut events: MessageWriter<EditorCommand>,
) {
    let cursor = windows
        .single()
        .ok()
        .and_then(|window| window.cursor_position());

    if mouse_button.just_pressed(MouseButton::Left) && !drag.is_dragging() {
        match layout.hit_test(cursor) {
            Hit::Square(square) => {
                drag.begin_from_board(square, session.board());
            }
            Hit::Palette(piece) => {
                drag.begin_from_palette(piece);
            }
            Hit::Panel | Hit::Outside => {}
        }
    }

    if mouse_button.just_released(MouseButton::Left) && drag.is_dragging() {
        let target = layout.hit_test(cursor).drop_target();
        if let Some(edit) = drag.drop_on(target) {
            events.write(EditorCommand::Apply(edit));
        }
    }
}

/// ESC 或右键取消拖动
pub fn cancel_drag_on_escape(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut drag: ResMut<DragState>,
) {
    if !drag.is_dragging() {
        return;
    }
    if keyboard.just_pressed(KeyCode::Escape) || mouse_button.just_pressed(MouseButton::Right) {
        drag.cancel();
    }
}
