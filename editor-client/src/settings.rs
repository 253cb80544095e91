//! 编辑器设置模块
//!
//! 提供设置数据结构、持久化和 Bevy Resource 集成

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// EnvFilter 指令中使用的级别名
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// 启动时的棋盘
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StartPosition {
    /// 空棋盘
    Empty,
    /// 标准开局
    #[default]
    Standard,
}

impl StartPosition {
    pub fn reset_mode(self) -> board_core::ResetMode {
        match self {
            StartPosition::Empty => board_core::ResetMode::Empty,
            StartPosition::Standard => board_core::ResetMode::StandardStart,
        }
    }
}

/// 编辑器设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct EditorSettings {
    // === 棋盘 ===
    /// 启动时的棋盘
    pub start_position: StartPosition,
    /// 显示攻击计数
    pub show_attack_counts: bool,
    /// 棋子字体（assets 下的相对路径，需包含国际象棋符号）
    ///
    /// 未设置时用 FEN 字母显示棋子。
    pub piece_font: Option<String>,

    // === 显示 ===
    /// 高对比度配色
    pub high_contrast: bool,

    // === 文件 ===
    /// FEN/PGN 交换文件目录，未设置时使用系统数据目录
    pub exchange_dir: Option<PathBuf>,

    // === 高级设置 ===
    /// 日志级别
    pub log_level: LogLevel,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            start_position: StartPosition::default(),
            show_attack_counts: true,
            piece_font: None,
            high_contrast: false,
            exchange_dir: None,
            log_level: LogLevel::default(),
        }
    }
}

impl EditorSettings {
    /// 获取设置文件路径
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push(crate::APP_DIR_NAME);
            path.push("settings.json");
            path
        })
    }

    /// 从默认位置加载设置
    ///
    /// 首次运行时写出一份默认设置，供手动编辑。
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            tracing::warn!("无法获取配置目录，使用默认设置");
            return Self::default();
        };
        Self::load_or_create(&path)
    }

    /// 加载设置；文件不存在时保存默认设置
    pub fn load_or_create(path: &Path) -> Self {
        let settings = Self::load_from(path);
        if !path.exists() {
            if let Err(e) = settings.save_to(path) {
                tracing::warn!("{}", e);
            }
        }
        settings
    }

    /// 从指定文件加载设置，失败时使用默认设置
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!("设置文件不存在，使用默认设置");
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => {
                    tracing::info!("已加载设置: {:?}", path);
                    settings
                }
                Err(e) => {
                    tracing::warn!("设置文件格式无效: {}，使用默认设置", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("无法读取设置文件: {}，使用默认设置", e);
                Self::default()
            }
        }
    }

    /// 保存设置到指定文件
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        // 确保目录存在
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                return Err(format!("无法创建配置目录: {}", e));
            }
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("序列化设置失败: {}", e))?;

        std::fs::write(path, content).map_err(|e| format!("写入设置文件失败: {}", e))?;

        tracing::info!("设置已保存: {:?}", path);
        Ok(())
    }

    /// 日志过滤指令，如 "info,wgpu=error"
    pub fn log_filter(&self) -> String {
        format!("{},wgpu=error,naga=warn", self.log_level.as_filter())
    }
}

/// 设置插件
pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        // main 中可能已提前载入（用于初始化日志）
        if !app.world().contains_resource::<EditorSettings>() {
            app.insert_resource(EditorSettings::load());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = EditorSettings::default();
        assert_eq!(settings.start_position, StartPosition::Standard);
        assert!(settings.show_attack_counts);
        assert!(settings.piece_font.is_none());
        assert_eq!(settings.log_level, LogLevel::Info);
        assert_eq!(settings.log_filter(), "info,wgpu=error,naga=warn");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("settings.json");

        let settings = EditorSettings {
            start_position: StartPosition::Empty,
            show_attack_counts: false,
            piece_font: Some("fonts/DejaVuSans.ttf".to_string()),
            log_level: LogLevel::Debug,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();

        assert_eq!(EditorSettings::load_from(&path), settings);
    }

    #[test]
    fn test_missing_and_invalid_files_fall_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        assert_eq!(EditorSettings::load_from(&path), EditorSettings::default());

        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(EditorSettings::load_from(&path), EditorSettings::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "log_level": "Trace" }"#).unwrap();

        let settings = EditorSettings::load_from(&path);
        assert_eq!(settings.log_level, LogLevel::Trace);
        assert!(settings.show_attack_counts);
    }

    #[test]
    fn test_first_run_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("chess-board-editor").join("settings.json");

        let settings = EditorSettings::load_or_create(&path);
        assert_eq!(settings, EditorSettings::default());
        assert!(path.exists());

        // 已有文件不会被覆盖
        std::fs::write(&path, r#"{ "high_contrast": true }"#).unwrap();
        assert!(EditorSettings::load_or_create(&path).high_contrast);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"{ "high_contrast": true }"#
        );
    }

    #[test]
    fn test_start_position_mode() {
        assert_eq!(
            StartPosition::Empty.reset_mode(),
            board_core::ResetMode::Empty
        );
        assert_eq!(
            StartPosition::Standard.reset_mode(),
            board_core::ResetMode::StandardStart
        );
    }
}
