//! 客户端编辑器状态

use bevy::prelude::*;
use board_core::{DragGesture, EditorSession, ResetMode};

/// 编辑会话（唯一的棋盘实例）
#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct BoardSession(pub EditorSession);

impl BoardSession {
    pub fn new(mode: ResetMode) -> Self {
        Self(EditorSession::new(mode))
    }
}

/// 当前拖放手势
#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct DragState(pub DragGesture);

/// 状态栏文字（最近一次操作的结果）
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    pub message: String,
    pub is_error: bool,
}

impl StatusLine {
    pub fn info(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.is_error = false;
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.is_error = true;
    }

    /// 锁定状态描述，如 "Locked 3/10"
    pub fn lock_summary(session: &EditorSession) -> String {
        match session.game() {
            Some(game) if session.is_locked() => {
                format!("Locked {}/{}", session.cursor(), game.plies())
            }
            Some(game) => format!("Unlocked ({} plies loaded)", game.plies()),
            None => "Unlocked".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_summary() {
        let mut session = EditorSession::default();
        assert_eq!(StatusLine::lock_summary(&session), "Unlocked");

        session.load_pgn("1. e4 e5 2. Nf3 *").unwrap();
        session.next();
        assert_eq!(StatusLine::lock_summary(&session), "Locked 1/3");

        session.toggle_lock().unwrap();
        assert_eq!(
            StatusLine::lock_summary(&session),
            "Unlocked (3 plies loaded)"
        );
    }

    #[test]
    fn test_status_line() {
        let mut status = StatusLine::default();
        status.error("bad");
        assert!(status.is_error);
        status.info("ok");
        assert_eq!(status.message, "ok");
        assert!(!status.is_error);
    }
}
