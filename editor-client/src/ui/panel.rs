//! 工具面板

use bevy::prelude::*;

use super::{LockButtonText, PaletteIcon, PanelMarker, StatusText};
use crate::board::PieceFont;
use crate::editor::{BoardSession, EditorCommand, StatusLine};
use crate::layout::{EditorLayout, PanelButton};
use crate::theme::ColorTheme;

/// 错误信息颜色
const ERROR_TEXT: Color = Color::srgb(0.8, 0.1, 0.1);
/// 图标圆盘占行高的比例
const ICON_SCALE: f32 = 0.8;

/// 生成工具面板
pub fn setup_panel(
    mut commands: Commands,
    layout: Res<EditorLayout>,
    theme: Res<ColorTheme>,
    piece_font: Res<PieceFont>,
) {
    let panel = layout.panel_rect();

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(panel.min.x),
                top: Val::Px(panel.min.y),
                width: Val::Px(panel.width()),
                height: Val::Px(panel.height()),
                ..default()
            },
            BackgroundColor(theme.panel_background),
            PanelMarker,
        ))
        .with_children(|parent| {
            // 状态栏
            let status = layout.status_rect();
            parent.spawn((
                absolute_node(status, panel.min),
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(theme.status_text),
                StatusText,
            ));

            for button in PanelButton::ALL {
                spawn_panel_button(parent, &layout, &theme, button, panel.min);
            }

            for (piece, rect) in layout.palette_slots() {
                spawn_palette_icon(parent, &theme, &piece_font, piece, rect, panel.min);
            }
        });
}

/// 按窗口坐标矩形生成相对面板的绝对定位节点
fn absolute_node(rect: Rect, origin: Vec2) -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(rect.min.x - origin.x),
        top: Val::Px(rect.min.y - origin.y),
        width: Val::Px(rect.width()),
        height: Val::Px(rect.height()),
        ..default()
    }
}

/// 生成面板按钮
fn spawn_panel_button(
    parent: &mut ChildSpawnerCommands,
    layout: &EditorLayout,
    theme: &ColorTheme,
    button: PanelButton,
    origin: Vec2,
) {
    let node = Node {
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..absolute_node(layout.button_rect(button), origin)
    };

    parent
        .spawn((
            Button,
            node,
            BackgroundColor(theme.button),
            BorderRadius::all(Val::Px(4.0)),
            button,
        ))
        .with_children(|parent| {
            let mut label = parent.spawn((
                Text::new(button.label()),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(theme.button_text),
            ));
            if button == PanelButton::ToggleLock {
                label.insert(LockButtonText);
            }
        });
}

/// 生成棋子图标（可拖到棋盘上）
fn spawn_palette_icon(
    parent: &mut ChildSpawnerCommands,
    theme: &ColorTheme,
    piece_font: &PieceFont,
    piece: board_core::Piece,
    rect: Rect,
    origin: Vec2,
) {
    let diameter = rect.height() * ICON_SCALE;
    let (fill, text_fill) = theme.piece_colors(piece.color);
    let node = Node {
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..absolute_node(rect, origin)
    };

    parent
        .spawn((node, PaletteIcon(piece)))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Px(diameter),
                        height: Val::Px(diameter),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(fill),
                    BorderColor::all(theme.piece_border),
                    BorderRadius::all(Val::Px(diameter / 2.0)),
                ))
                .with_children(|parent| {
                    parent.spawn((
                        Text::new(piece_font.label(piece)),
                        TextFont {
                            font: piece_font.handle.clone(),
                            font_size: diameter * 0.7,
                            ..default()
                        },
                        TextColor(text_fill),
                    ));
                });
        });
}

/// 处理面板按钮
pub fn handle_panel_buttons(
    mut interaction_query: Query<
        (&Interaction, &mut BackgroundColor, &PanelButton),
        (Changed<Interaction>, With<Button>),
    >,
    theme: Res<ColorTheme>,
    mut events: MessageWriter<EditorCommand>,
) {
    for (interaction, mut color, button) in &mut interaction_query {
        match *interaction {
            Interaction::Pressed => {
                *color = theme.button_pressed.into();
                tracing::debug!("按钮: {:?}", button);
                events.write(button_command(*button));
            }
            Interaction::Hovered => {
                *color = theme.button_hovered.into();
            }
            Interaction::None => {
                *color = theme.button.into();
            }
        }
    }
}

/// 按钮对应的编辑命令
pub fn button_command(button: PanelButton) -> EditorCommand {
    match button {
        PanelButton::LoadFen => EditorCommand::LoadFen,
        PanelButton::ExportFen => EditorCommand::ExportFen,
        PanelButton::LoadPgn => EditorCommand::LoadPgn,
        PanelButton::ExportPgn => EditorCommand::ExportPgn,
        PanelButton::Prev => EditorCommand::Prev,
        PanelButton::Next => EditorCommand::Next,
        PanelButton::ToggleLock => EditorCommand::ToggleLock,
        PanelButton::Clear => EditorCommand::Clear,
        PanelButton::Start => EditorCommand::Start,
    }
}

/// 更新状态栏
pub fn update_status_text(
    session: Res<BoardSession>,
    status: Res<StatusLine>,
    theme: Res<ColorTheme>,
    mut query: Query<(&mut Text, &mut TextColor), With<StatusText>>,
) {
    if !session.is_changed() && !status.is_changed() {
        return;
    }

    for (mut text, mut color) in &mut query {
        **text = status_text(&session, &status);
        *color = if status.is_error {
            TextColor(ERROR_TEXT)
        } else {
            TextColor(theme.status_text)
        };
    }
}

/// 状态栏内容：锁定状态和最近一次操作结果
pub fn status_text(session: &board_core::EditorSession, status: &StatusLine) -> String {
    let summary = StatusLine::lock_summary(session);
    if status.message.is_empty() {
        summary
    } else {
        format!("{}\n{}", summary, status.message)
    }
}

/// 锁定按钮文字
pub fn update_lock_button_text(
    session: Res<BoardSession>,
    mut query: Query<&mut Text, With<LockButtonText>>,
) {
    if !session.is_changed() {
        return;
    }

    let label = if session.is_locked() { "Unlock" } else { "Lock" };
    for mut text in &mut query {
        if **text != label {
            **text = label.to_string();
        }
    }
}
