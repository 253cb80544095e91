//! FEN/PGN 交换文件
//!
//! 载入按钮读取交换文件，导出按钮写入交换文件，便于和其他程序互相粘贴局面与棋谱。

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bevy::prelude::*;

/// 局面交换文件名
pub const FEN_FILE_NAME: &str = "position.fen";

/// 棋谱交换文件名
pub const PGN_FILE_NAME: &str = "game.pgn";

/// 交换文件管理器
#[derive(Resource, Debug, Clone)]
pub struct ExchangeFiles {
    dir: PathBuf,
}

impl ExchangeFiles {
    /// 使用指定目录，不存在时创建
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir).with_context(|| format!("无法创建交换目录: {:?}", dir))?;
        }
        Ok(Self { dir })
    }

    /// 使用系统数据目录
    pub fn in_data_dir() -> Result<Self> {
        Self::new(get_exchange_directory()?)
    }

    /// 读取局面文件
    pub fn read_fen(&self) -> Result<String> {
        let text = self.read(FEN_FILE_NAME)?;
        // 只取第一个非空行
        text.lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .with_context(|| format!("局面文件为空: {:?}", self.fen_path()))
    }

    /// 写入局面文件
    pub fn write_fen(&self, fen: &str) -> Result<PathBuf> {
        self.write(FEN_FILE_NAME, &format!("{}\n", fen))
    }

    /// 读取棋谱文件
    pub fn read_pgn(&self) -> Result<String> {
        self.read(PGN_FILE_NAME)
    }

    /// 写入棋谱文件
    pub fn write_pgn(&self, pgn: &str) -> Result<PathBuf> {
        self.write(PGN_FILE_NAME, pgn)
    }

    pub fn fen_path(&self) -> PathBuf {
        self.dir.join(FEN_FILE_NAME)
    }

    pub fn pgn_path(&self) -> PathBuf {
        self.dir.join(PGN_FILE_NAME)
    }

    /// 获取交换目录路径
    pub fn directory(&self) -> &Path {
        &self.dir
    }

    fn read(&self, name: &str) -> Result<String> {
        let filepath = self.dir.join(name);

        if !filepath.exists() {
            anyhow::bail!("文件不存在: {:?}", filepath);
        }

        fs::read_to_string(&filepath).with_context(|| format!("读取文件失败: {:?}", filepath))
    }

    fn write(&self, name: &str, content: &str) -> Result<PathBuf> {
        let filepath = self.dir.join(name);
        fs::write(&filepath, content).with_context(|| format!("写入文件失败: {:?}", filepath))?;
        tracing::info!("已写入: {:?}", filepath);
        Ok(filepath)
    }
}

/// 获取跨平台交换目录
fn get_exchange_directory() -> Result<PathBuf> {
    let app_data_dir = dirs::data_dir().context("无法获取应用数据目录")?;

    Ok(app_data_dir.join(crate::APP_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_files() -> (ExchangeFiles, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let files = ExchangeFiles::new(temp_dir.path().join("exchange")).unwrap();
        (files, temp_dir)
    }

    #[test]
    fn test_creates_directory() {
        let (files, _temp_dir) = create_test_files();
        assert!(files.directory().is_dir());
        assert!(files.fen_path().ends_with(FEN_FILE_NAME));
    }

    #[test]
    fn test_fen_roundtrip() {
        let (files, _temp_dir) = create_test_files();
        let fen = board_core::STARTING_FEN;

        let path = files.write_fen(fen).unwrap();
        assert_eq!(path, files.fen_path());
        assert_eq!(files.read_fen().unwrap(), fen);
    }

    #[test]
    fn test_read_fen_skips_blank_lines() {
        let (files, _temp_dir) = create_test_files();
        fs::write(files.fen_path(), "\n\n  8/8/8/8/8/8/8/8 w - - 0 1  \nsecond\n").unwrap();
        assert_eq!(files.read_fen().unwrap(), "8/8/8/8/8/8/8/8 w - - 0 1");
    }

    #[test]
    fn test_empty_fen_file_is_error() {
        let (files, _temp_dir) = create_test_files();
        fs::write(files.fen_path(), "\n   \n").unwrap();
        assert!(files.read_fen().is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let (files, _temp_dir) = create_test_files();
        let err = files.read_pgn().unwrap_err();
        assert!(err.to_string().contains("文件不存在"));
    }

    #[test]
    fn test_pgn_roundtrip() {
        let (files, _temp_dir) = create_test_files();
        let pgn = "[Event \"Test\"]\n\n1. e4 e5 *\n";
        files.write_pgn(pgn).unwrap();
        assert_eq!(files.read_pgn().unwrap(), pgn);
    }
}
