//! Running commands against the board files

use crate::cli::{ArchiveAction, BoardAction, Commands, OutputFormat, TaskAction};
use crate::config::TrellisConfig;
use crate::confirm::Confirmation;
use crate::error::{CliError, CliResult};
use crate::exit_codes::{EXIT_ERROR, EXIT_WARNING};
use crate::render;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::{debug, info, warn};
use trellis_kanban::{
    archive::{ClearArchive, JsonlArchive, ListArchive, RemoveArchived},
    board::{AddBoard, DeleteBoard, GetModel, RenameBoard},
    drag::ApplyMove,
    parse_input,
    store::{JsonFileStore, StoreLock},
    task::{AddTask, DeleteTask, RenameTask},
    KanbanCommand, KanbanContext, ModelSource, MoveDescriptor, ParsedCommand,
};

/// The open board files, locked for the lifetime of the session
pub struct Session {
    ctx: KanbanContext,
    actor: Option<String>,
    format: OutputFormat,
    quiet: bool,
    confirmation: Confirmation,
    _lock: StoreLock,
}

impl Session {
    pub async fn open(config: &TrellisConfig, format: OutputFormat, quiet: bool) -> CliResult<Self> {
        let store = JsonFileStore::new(config.board_path());
        let lock = store.lock().await?;
        let archive = JsonlArchive::new(config.archive_path());

        let ctx = KanbanContext::open(Arc::new(store), Arc::new(archive))
            .await
            .with_activity_log(config.activity_path());

        match ctx.source() {
            ModelSource::Stored => debug!(path = %config.board_path().display(), "loaded boards"),
            ModelSource::Default => info!(
                path = %config.board_path().display(),
                "no saved boards, starting from the defaults"
            ),
            ModelSource::Recovered { reason } => {
                warn!(path = %config.board_path().display(), %reason, "saved boards are unreadable");
                eprintln!(
                    "Warning: {} could not be read ({reason}). Showing the default boards; \
                     the file is replaced on the next change.",
                    config.board_path().display()
                );
            }
        }

        Ok(Self {
            ctx,
            actor: config.actor.clone(),
            format,
            quiet,
            confirmation: Confirmation::Refuse,
            _lock: lock,
        })
    }

    /// How destructive commands are confirmed; refused unless set
    pub fn with_confirmation(mut self, confirmation: Confirmation) -> Self {
        self.confirmation = confirmation;
        self
    }

    /// Run one subcommand, writing its output to `out`
    pub async fn run<W: Write>(&self, command: Commands, out: &mut W) -> CliResult<()> {
        match command {
            Commands::Activity { limit } => self.activity(limit, out).await,
            Commands::Operations => print_operations(self.format, out),
            Commands::Apply { json, file } => {
                let raw = read_input(json, file).await?;
                let value: serde_json::Value = serde_json::from_str(&raw)?;
                let commands = parse_input(value)?;
                self.execute_all(&commands, out).await
            }
            Commands::Show => self.execute_one(GetModel::new().into(), out).await,
            Commands::Board { action } => self.execute_one(board_command(action), out).await,
            Commands::Task { action } => self.execute_one(task_command(action), out).await,
            Commands::Move { from, to } => {
                let command = ApplyMove::new(MoveDescriptor::new(from, to));
                self.execute_one(command.into(), out).await
            }
            Commands::Archive { action } => {
                self.execute_one(archive_command(action), out).await
            }
        }
    }

    async fn execute_one<W: Write>(&self, command: KanbanCommand, out: &mut W) -> CliResult<()> {
        let parsed = ParsedCommand {
            command,
            actor: None,
        };
        self.execute_all(std::slice::from_ref(&parsed), out).await
    }

    /// Execute in order, stopping at the first failure. Destructive commands
    /// are confirmed up front, so a declined batch changes nothing.
    pub async fn execute_all<W: Write>(
        &self,
        commands: &[ParsedCommand],
        out: &mut W,
    ) -> CliResult<()> {
        for parsed in commands {
            self.confirmation.check(&parsed.command)?;
        }

        for parsed in commands {
            debug!(op = %parsed.command.op_string(), "executing");
            let value = parsed.execute(&self.ctx, self.actor.as_deref()).await?;
            self.print(&parsed.command, &value, out).await?;
        }
        Ok(())
    }

    async fn print<W: Write>(
        &self,
        command: &KanbanCommand,
        value: &serde_json::Value,
        out: &mut W,
    ) -> CliResult<()> {
        if let Some(text) = render::structured(self.format, value)? {
            writeln!(out, "{text}")?;
            return Ok(());
        }

        match command {
            KanbanCommand::GetModel(_) => {
                writeln!(out, "{}", render::model_table(&*self.ctx.model().await))?;
            }
            KanbanCommand::ListArchive(_) => {
                writeln!(out, "{}", render::archive_table(value))?;
            }
            KanbanCommand::RemoveArchived(_) | KanbanCommand::ClearArchive(_) => {
                if !self.quiet {
                    writeln!(out, "{}", render::summary(command, value))?;
                }
            }
            _ => {
                if !self.quiet {
                    writeln!(out, "{}", render::summary(command, value))?;
                    writeln!(out, "{}", render::model_table(&*self.ctx.model().await))?;
                }
            }
        }
        Ok(())
    }

    async fn activity<W: Write>(&self, limit: usize, out: &mut W) -> CliResult<()> {
        let entries = self.ctx.read_activity(Some(limit)).await?;
        match render::structured(self.format, &entries)? {
            Some(text) => writeln!(out, "{text}")?,
            None => writeln!(out, "{}", render::activity_table(&entries))?,
        }
        Ok(())
    }

    /// Wait for the last save and release the lock
    pub async fn finish(self) -> CliResult<()> {
        let status = self.ctx.flush().await?;
        match status.error {
            None => Ok(()),
            Some(error) => {
                warn!(generation = status.generation, %error, "last save failed");
                Err(CliError::new(
                    format!("changes were applied but could not be saved: {error}"),
                    EXIT_WARNING,
                ))
            }
        }
    }
}

fn board_command(action: BoardAction) -> KanbanCommand {
    match action {
        BoardAction::Add { title } => AddBoard::new(title).into(),
        BoardAction::Rename { board, title } => RenameBoard::new(board, title).into(),
        BoardAction::Delete { board } => DeleteBoard::new(board).into(),
    }
}

fn task_command(action: TaskAction) -> KanbanCommand {
    match action {
        TaskAction::Add { board, text } => AddTask::new(board, text).into(),
        TaskAction::Rename { board, task, text } => RenameTask::new(board, task, text).into(),
        TaskAction::Delete { board, task } => DeleteTask::new(board, task).into(),
    }
}

fn archive_command(action: ArchiveAction) -> KanbanCommand {
    match action {
        ArchiveAction::List { search, date } => ListArchive { search, date }.into(),
        ArchiveAction::Remove { index } => RemoveArchived::new(index).into(),
        ArchiveAction::Clear => ClearArchive::new().into(),
    }
}

async fn read_input(json: Option<String>, file: Option<PathBuf>) -> CliResult<String> {
    if let Some(json) = json {
        return Ok(json);
    }
    if let Some(path) = file {
        return tokio::fs::read_to_string(&path).await.map_err(|e| CliError {
            message: format!("cannot read {}: {e}", path.display()),
            exit_code: EXIT_ERROR,
            source: Some(Box::new(e)),
        });
    }

    let mut raw = String::new();
    tokio::io::stdin().read_to_string(&mut raw).await?;
    Ok(raw)
}

/// Operation catalog; needs no board files
pub fn print_operations<W: Write>(format: OutputFormat, out: &mut W) -> CliResult<()> {
    let catalog = KanbanCommand::catalog();
    match render::structured(format, &render::operations_value(&catalog))? {
        Some(text) => writeln!(out, "{text}")?,
        None => writeln!(out, "{}", render::operations_table(&catalog))?,
    }
    Ok(())
}
