//! 棋盘渲染

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use board_core::{Color as Side, Square};

use super::{
    BoardMarker, CountLabel, DragGhost, DragGhostDisc, DragGhostLabel, PieceDisc, PieceFont,
    PieceLabel, SquareCell,
};
use crate::editor::{BoardSession, DragState};
use crate::layout::EditorLayout;
use crate::settings::EditorSettings;
use crate::theme::ColorTheme;

/// 棋子圆盘占格子的比例
const PIECE_SCALE: f32 = 0.8;
/// 攻击计数到格子边缘的距离
const COUNT_MARGIN: f32 = 5.0;

/// 生成棋盘
pub fn setup_board(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    layout: Res<EditorLayout>,
    theme: Res<ColorTheme>,
    settings: Res<EditorSettings>,
) {
    let piece_font = match &settings.piece_font {
        Some(path) => {
            tracing::info!("棋子字体: {}", path);
            PieceFont {
                handle: asset_server.load(path.clone()),
                glyphs: true,
            }
        }
        None => PieceFont::default(),
    };

    let board_size = layout.board_size();
    commands
        .spawn((
            Node {
                width: Val::Px(board_size),
                height: Val::Px(board_size),
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                ..default()
            },
            BoardMarker,
        ))
        .with_children(|parent| {
            for square in Square::all() {
                spawn_square(parent, square, &layout, &theme, &piece_font);
            }
        });

    spawn_drag_ghost(&mut commands, &layout, &piece_font);
    commands.insert_resource(piece_font);
}

/// 生成单个格子（底色、棋子、两个攻击计数）
fn spawn_square(
    parent: &mut ChildSpawnerCommands,
    square: Square,
    layout: &EditorLayout,
    theme: &ColorTheme,
    piece_font: &PieceFont,
) {
    let origin = layout.square_origin(square);
    let count_size = layout.square_size / 3.0;

    parent
        .spawn((
            Node {
                width: Val::Px(layout.square_size),
                height: Val::Px(layout.square_size),
                position_type: PositionType::Absolute,
                left: Val::Px(origin.x),
                top: Val::Px(origin.y),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(theme.square_color(square)),
            SquareCell(square),
        ))
        .with_children(|parent| {
            spawn_piece_disc(
                parent,
                layout.square_size,
                piece_font,
                (PieceDisc(square), PieceLabel(square)),
            );

            for color in [Side::White, Side::Black] {
                let mut node = Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(COUNT_MARGIN),
                    padding: UiRect::horizontal(Val::Px(2.0)),
                    ..default()
                };
                match color {
                    Side::White => node.left = Val::Px(COUNT_MARGIN),
                    Side::Black => node.right = Val::Px(COUNT_MARGIN),
                }

                parent.spawn((
                    node,
                    Text::new(""),
                    TextFont {
                        font_size: count_size,
                        ..default()
                    },
                    TextColor(theme.count_color(color)),
                    BackgroundColor(theme.count_background),
                    BorderRadius::all(Val::Px(3.0)),
                    Visibility::Hidden,
                    CountLabel { square, color },
                ));
            }
        });
}

/// 生成棋子圆盘，`markers` 分别加在圆盘和文字上
fn spawn_piece_disc<D: Bundle, L: Bundle>(
    parent: &mut ChildSpawnerCommands,
    square_size: f32,
    piece_font: &PieceFont,
    markers: (D, L),
) {
    let (disc_marker, label_marker) = markers;
    let diameter = square_size * PIECE_SCALE;

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
            BackgroundColor(Color::NONE),
            BorderColor::all(Color::NONE),
            BorderRadius::all(Val::Px(diameter / 2.0)),
            Visibility::Hidden,
            disc_marker,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font: piece_font.handle.clone(),
                    font_size: diameter * 0.7,
                    ..default()
                },
                TextColor(Color::NONE),
                label_marker,
            ));
        });
}

/// 生成拖动中的棋子（默认隐藏，显示在最上层）
fn spawn_drag_ghost(commands: &mut Commands, layout: &EditorLayout, piece_font: &PieceFont) {
    commands
        .spawn((
            Node {
                width: Val::Px(layout.square_size),
                height: Val::Px(layout.square_size),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            GlobalZIndex(10),
            Visibility::Hidden,
            DragGhost,
        ))
        .with_children(|parent| {
            spawn_piece_disc(
                parent,
                layout.square_size,
                piece_font,
                (DragGhostDisc, DragGhostLabel),
            );
        });
}

/// 更新棋盘上的棋子
///
/// 拖动棋盘上的棋子时，起点格暂时不显示该棋子。
pub fn update_pieces(
    session: Res<BoardSession>,
    drag: Res<DragState>,
    theme: Res<ColorTheme>,
    piece_font: Res<PieceFont>,
    mut discs: Query<(&PieceDisc, &mut BackgroundColor, &mut BorderColor, &mut Visibility)>,
    mut labels: Query<(&PieceLabel, &mut Text, &mut TextColor)>,
) {
    if !session.is_changed() && !drag.is_changed() {
        return;
    }

    let hidden = drag.origin();
    let piece_at = |square: Square| {
        session
            .board()
            .get(square)
            .filter(|_| hidden != Some(square))
    };

    for (disc, mut background, mut border, mut visibility) in &mut discs {
        match piece_at(disc.0) {
            Some(piece) => {
                let (fill, _) = theme.piece_colors(piece.color);
                *background = BackgroundColor(fill);
                *border = BorderColor::all(theme.piece_border);
                *visibility = Visibility::Inherited;
            }
            None => *visibility = Visibility::Hidden,
        }
    }

    for (label, mut text, mut text_color) in &mut labels {
        match piece_at(label.0) {
            Some(piece) => {
                **text = piece_font.label(piece);
                *text_color = TextColor(theme.piece_colors(piece.color).1);
            }
            None => {
                **text = String::new();
                *text_color = TextColor(Color::NONE);
            }
        }
    }
}

/// 更新攻击计数，只显示非零值
pub fn update_attack_counts(
    session: Res<BoardSession>,
    settings: Res<EditorSettings>,
    mut labels: Query<(&CountLabel, &mut Text, &mut Visibility)>,
) {
    if !session.is_changed() && !settings.is_changed() {
        return;
    }

    let counts = session.attack_counts();
    for (label, mut text, mut visibility) in &mut labels {
        let count = counts.get(label.square).for_color(label.color);
        if settings.show_attack_counts && count > 0 {
            **text = count.to_string();
            *visibility = Visibility::Inherited;
        } else {
            *visibility = Visibility::Hidden;
        }
    }
}

/// 拖动中的棋子跟随光标
pub fn update_drag_ghost(
    drag: Res<DragState>,
    windows: Query<&Window, With<PrimaryWindow>>,
    layout: Res<EditorLayout>,
    theme: Res<ColorTheme>,
    piece_font: Res<PieceFont>,
    mut ghost: Query<(&mut Node, &mut Visibility), With<DragGhost>>,
    mut ghost_disc: Query<
        (&mut BackgroundColor, &mut BorderColor, &mut Visibility),
        (With<DragGhostDisc>, Without<DragGhost>),
    >,
    mut ghost_label: Query<(&mut Text, &mut TextColor), With<DragGhostLabel>>,
) {
    let Ok((mut node, mut visibility)) = ghost.single_mut() else {
        return;
    };

    let cursor = windows
        .single()
        .ok()
        .and_then(|window| window.cursor_position());

    let (Some(piece), Some(cursor)) = (drag.dragged_piece(), cursor) else {
        if *visibility != Visibility::Hidden {
            *visibility = Visibility::Hidden;
        }
        return;
    };

    let half = layout.square_size / 2.0;
    node.left = Val::Px(cursor.x - half);
    node.top = Val::Px(cursor.y - half);
    *visibility = Visibility::Inherited;

    if !drag.is_changed() {
        return;
    }

    let (fill, text_fill) = theme.piece_colors(piece.color);
    for (mut background, mut border, mut disc_visibility) in &mut ghost_disc {
        *background = BackgroundColor(fill);
        *border = BorderColor::all(theme.piece_border);
        *disc_visibility = Visibility::Inherited;
    }
    for (mut text, mut text_color) in &mut ghost_label {
        **text = piece_font.label(piece);
        *text_color = TextColor(text_fill);
    }
}
