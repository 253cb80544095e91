//! 编辑器逻辑模块
//!
//! 管理编辑会话，把拖放和按钮转换为编辑命令

mod input;
mod state;

pub use input::*;
pub use state::*;

use anyhow::{Context, Result};
use bevy::prelude::*;
use board_core::{Edit, EditorSession};

use crate::settings::EditorSettings;
use crate::storage::ExchangeFiles;
use crate::EditorSet;

/// 编辑器插件
pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        let settings = app
            .world()
            .get_resource::<EditorSettings>()
            .cloned()
            .unwrap_or_default();

        let files = match &settings.exchange_dir {
            Some(dir) => ExchangeFiles::new(dir),
            None => ExchangeFiles::in_data_dir(),
        };
        match files {
            Ok(files) => {
                tracing::info!("交换文件目录: {:?}", files.directory());
                app.insert_resource(files);
            }
            Err(e) => tracing::error!("交换文件不可用: {:#}", e),
        }

        app.insert_resource(BoardSession::new(settings.start_position.reset_mode()))
            .init_resource::<DragState>()
            .init_resource::<StatusLine>()
            .add_message::<EditorCommand>()
            .add_systems(
                Update,
                (
                    (handle_drag_input, cancel_drag_on_escape).in_set(EditorSet::Input),
                    handle_editor_commands.in_set(EditorSet::Apply),
                ),
            );
    }
}

/// 编辑命令
#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub enum EditorCommand {
    /// 拖放提交的编辑
    Apply(Edit),
    /// 清空棋盘
    Clear,
    /// 标准开局
    Start,
    /// 从交换文件载入 FEN
    LoadFen,
    /// 导出 FEN 到交换文件
    ExportFen,
    /// 从交换文件载入 PGN
    LoadPgn,
    /// 导出 PGN 到交换文件
    ExportPgn,
    /// 棋谱后退一步
    Prev,
    /// 棋谱前进一步
    Next,
    /// 切换锁定
    ToggleLock,
}

/// 处理编辑命令
fn handle_editor_commands(
    mut events: MessageReader<EditorCommand>,
    mut session: ResMut<BoardSession>,
    files: Option<Res<ExchangeFiles>>,
    mut status: ResMut<StatusLine>,
) {
    for command in events.read() {
        match run_command(command, &mut session, files.as_deref()) {
            Ok(Some(message)) => status.info(message),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("{:?} 失败: {:#}", command, e);
                status.error(format!("{:#}", e));
            }
        }
    }
}

/// 执行一条命令，返回需要显示的状态信息
pub fn run_command(
    command: &EditorCommand,
    session: &mut EditorSession,
    files: Option<&ExchangeFiles>,
) -> Result<Option<String>> {
    match command {
        EditorCommand::Apply(edit) => {
            session.apply(*edit);
            Ok(None)
        }
        EditorCommand::Clear => {
            session.clear();
            Ok(Some("Board cleared".to_string()))
        }
        EditorCommand::Start => {
            session.start();
            Ok(Some("Standard start".to_string()))
        }
        EditorCommand::LoadFen => {
            let files = require_files(files)?;
            let fen = files.read_fen()?;
            session.load_fen(&fen).context("载入 FEN 失败")?;
            Ok(Some(format!("Loaded {:?}", files.fen_path())))
        }
        EditorCommand::ExportFen => {
            let files = require_files(files)?;
            let fen = session.export_fen();
            tracing::info!("FEN: {}", fen);
            let path = files.write_fen(&fen)?;
            Ok(Some(format!("Exported {:?}", path)))
        }
        EditorCommand::LoadPgn => {
            let files = require_files(files)?;
            let pgn = files.read_pgn()?;
            session.load_pgn(&pgn).context("载入 PGN 失败")?;
            Ok(Some(format!("Loaded {:?}", files.pgn_path())))
        }
        EditorCommand::ExportPgn => {
            let files = require_files(files)?;
            let path = files.write_pgn(&session.export_pgn())?;
            Ok(Some(format!("Exported {:?}", path)))
        }
        EditorCommand::Prev => {
            session.prev();
            Ok(None)
        }
        EditorCommand::Next => {
            session.next();
            Ok(None)
        }
        EditorCommand::ToggleLock => {
            let locked = session.toggle_lock()?;
            Ok(Some(if locked { "Locked" } else { "Unlocked" }.to_string()))
        }
    }
}

fn require_files(files: Option<&ExchangeFiles>) -> Result<&ExchangeFiles> {
    files.context("交换文件目录不可用")
}
