//! 编辑会话
//!
//! 把棋盘编辑模型和已载入的棋谱组合在一起：
//! 锁定时棋盘显示棋谱中光标处的局面，可以前后翻看；任何编辑都会解除锁定。

use tracing::{debug, info, warn};

use crate::attacks::AttackCounts;
use crate::board::Board;
use crate::editor::{BoardEditor, Edit, ResetMode};
use crate::error::{EditorError, Result};
use crate::fen::Fen;
use crate::pgn::{format_tag, LoadedGame};

/// 编辑会话
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    editor: BoardEditor,
    game: Option<LoadedGame>,
    /// 当前显示的棋谱步数（0 为起始局面）
    cursor: usize,
    locked: bool,
}

impl EditorSession {
    /// 以指定方式创建
    pub fn new(mode: ResetMode) -> Self {
        Self {
            editor: BoardEditor::new(mode),
            game: None,
            cursor: 0,
            locked: false,
        }
    }

    pub fn editor(&self) -> &BoardEditor {
        &self.editor
    }

    pub fn board(&self) -> &Board {
        self.editor.board()
    }

    pub fn attack_counts(&self) -> &AttackCounts {
        self.editor.attack_counts()
    }

    pub fn game(&self) -> Option<&LoadedGame> {
        self.game.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// 应用一次编辑，锁定状态下自动解锁（棋谱保留）
    pub fn apply(&mut self, edit: Edit) {
        if self.locked {
            info!("编辑棋盘，解除棋谱锁定");
            self.locked = false;
        }
        self.editor.apply(edit);
    }

    /// 清空棋盘
    pub fn clear(&mut self) {
        self.reset(ResetMode::Empty);
    }

    /// 摆成标准开局
    pub fn start(&mut self) {
        self.reset(ResetMode::StandardStart);
    }

    fn reset(&mut self, mode: ResetMode) {
        debug!("复位棋盘: {:?}", mode);
        self.editor.reset(mode);
        self.drop_game();
    }

    fn drop_game(&mut self) {
        self.game = None;
        self.cursor = 0;
        self.locked = false;
    }

    /// 载入 FEN，失败时棋盘不变
    pub fn load_fen(&mut self, text: &str) -> Result<()> {
        let state = Fen::parse(text.trim())?;
        self.editor.load_state(state);
        self.drop_game();
        info!("已载入 FEN");
        Ok(())
    }

    /// 导出当前局面的 FEN
    pub fn export_fen(&self) -> String {
        if self.locked {
            if let Some(fen) = self.game.as_ref().and_then(|g| g.fen_at(self.cursor)) {
                return fen;
            }
        }
        Fen::to_string(self.editor.state())
    }

    /// 载入 PGN 棋谱并锁定在起始局面，失败时会话不变
    pub fn load_pgn(&mut self, text: &str) -> Result<()> {
        let game = LoadedGame::parse(text)?;
        info!("已载入棋谱: {} 步", game.plies());
        self.game = Some(game);
        self.cursor = 0;
        self.locked = true;
        self.show_cursor();
        Ok(())
    }

    /// 导出 PGN
    ///
    /// 锁定时导出棋谱标签和光标之前的着法，否则只导出当前局面的 FEN 标签。
    pub fn export_pgn(&self) -> String {
        match (&self.game, self.locked) {
            (Some(game), true) => game.to_pgn(self.cursor),
            _ => format!("{}\n\n", format_tag("FEN", &self.export_fen())),
        }
    }

    /// 前进一步，返回光标是否移动
    pub fn next(&mut self) -> bool {
        let Some(plies) = self.locked_plies() else {
            return false;
        };
        if self.cursor >= plies {
            return false;
        }
        self.cursor += 1;
        self.show_cursor();
        true
    }

    /// 后退一步，返回光标是否移动
    pub fn prev(&mut self) -> bool {
        if self.locked_plies().is_none() || self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.show_cursor();
        true
    }

    /// 切换锁定
    ///
    /// 加锁需要已载入棋谱，并把棋盘恢复到光标处的局面。
    pub fn toggle_lock(&mut self) -> Result<bool> {
        if self.locked {
            self.locked = false;
            debug!("解除锁定");
            return Ok(false);
        }
        if self.game.is_none() {
            warn!("没有载入棋谱，无法锁定");
            return Err(EditorError::NoGameLoaded);
        }
        self.locked = true;
        self.show_cursor();
        debug!("锁定在第 {} 步", self.cursor);
        Ok(true)
    }

    fn locked_plies(&self) -> Option<usize> {
        match (&self.game, self.locked) {
            (Some(game), true) => Some(game.plies()),
            _ => None,
        }
    }

    fn show_cursor(&mut self) {
        if let Some(state) = self.game.as_ref().and_then(|g| g.board_at(self.cursor)) {
            self.editor.load_state(state);
        }
    }
}
