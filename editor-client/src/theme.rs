//! 主题和配色方案
//!
//! 定义棋盘、攻击计数、工具面板的颜色配置

use bevy::prelude::*;

use crate::settings::EditorSettings;

/// 主题插件
pub struct ThemePlugin;

impl Plugin for ThemePlugin {
    fn build(&self, app: &mut App) {
        let high_contrast = app
            .world()
            .get_resource::<EditorSettings>()
            .is_some_and(|settings| settings.high_contrast);

        let theme = if high_contrast {
            ColorTheme::high_contrast()
        } else {
            ColorTheme::classic()
        };
        tracing::debug!("使用配色: {}", theme.name);
        app.insert_resource(theme);
    }
}

/// 颜色主题配置
#[derive(Resource, Clone, Debug)]
pub struct ColorTheme {
    pub name: String,

    // 棋盘
    pub light_square: Color,
    pub dark_square: Color,

    // 棋子（圆形底 + 文字）
    pub white_piece_background: Color,
    pub white_piece_text: Color,
    pub black_piece_background: Color,
    pub black_piece_text: Color,
    pub piece_border: Color,

    // 攻击计数
    pub white_count_text: Color,
    pub black_count_text: Color,
    pub count_background: Color,

    // 工具面板
    pub panel_background: Color,
    pub button: Color,
    pub button_hovered: Color,
    pub button_pressed: Color,
    pub button_text: Color,
    pub status_text: Color,
}

impl ColorTheme {
    /// 经典木质配色
    pub fn classic() -> Self {
        Self {
            name: "经典木质".to_string(),

            light_square: Color::srgb_u8(240, 217, 181), // #F0D9B5
            dark_square: Color::srgb_u8(181, 136, 99),   // #B58863

            white_piece_background: Color::srgb_u8(255, 248, 231), // #FFF8E7 象牙白
            white_piece_text: Color::srgb_u8(33, 33, 33),
            black_piece_background: Color::srgb_u8(33, 33, 33), // #212121 墨黑色
            black_piece_text: Color::srgb_u8(255, 248, 231),
            piece_border: Color::srgb_u8(78, 52, 46), // #4E342E 深棕色

            white_count_text: Color::srgb_u8(255, 255, 255),
            black_count_text: Color::srgb_u8(0, 0, 0),
            count_background: Color::srgba_u8(128, 128, 128, 160), // 半透明灰

            panel_background: Color::srgb_u8(200, 200, 200), // #C8C8C8
            button: Color::srgb_u8(150, 150, 150),
            button_hovered: Color::srgb_u8(170, 170, 170),
            button_pressed: Color::srgb_u8(120, 120, 120),
            button_text: Color::srgb_u8(0, 0, 0),
            status_text: Color::srgb_u8(33, 33, 33),
        }
    }

    /// 高对比度配色
    pub fn high_contrast() -> Self {
        Self {
            name: "高对比度".to_string(),

            light_square: Color::srgb_u8(255, 255, 255),
            dark_square: Color::srgb_u8(90, 90, 90),

            white_piece_background: Color::srgb_u8(255, 255, 255),
            white_piece_text: Color::srgb_u8(0, 0, 0),
            black_piece_background: Color::srgb_u8(0, 0, 0),
            black_piece_text: Color::srgb_u8(255, 235, 59), // #FFEB3B 亮黄
            piece_border: Color::srgb_u8(213, 0, 0),

            white_count_text: Color::srgb_u8(255, 235, 59),
            black_count_text: Color::srgb_u8(213, 0, 0), // #D50000 纯红
            count_background: Color::srgba_u8(0, 0, 0, 200),

            panel_background: Color::srgb_u8(230, 230, 230),
            button: Color::srgb_u8(60, 60, 60),
            button_hovered: Color::srgb_u8(90, 90, 90),
            button_pressed: Color::srgb_u8(30, 30, 30),
            button_text: Color::srgb_u8(255, 255, 255),
            status_text: Color::srgb_u8(0, 0, 0),
        }
    }

    /// 格子底色
    pub fn square_color(&self, square: board_core::Square) -> Color {
        if square.is_light() {
            self.light_square
        } else {
            self.dark_square
        }
    }

    /// 棋子的底色和文字颜色
    pub fn piece_colors(&self, color: board_core::Color) -> (Color, Color) {
        match color {
            board_core::Color::White => (self.white_piece_background, self.white_piece_text),
            board_core::Color::Black => (self.black_piece_background, self.black_piece_text),
        }
    }

    /// 攻击计数文字颜色
    pub fn count_color(&self, color: board_core::Color) -> Color {
        match color {
            board_core::Color::White => self.white_count_text,
            board_core::Color::Black => self.black_count_text,
        }
    }
}
