//! The typed form of every inbound command

use crate::archive::{ClearArchive, ListArchive, RemoveArchived};
use crate::board::{AddBoard, DeleteBoard, GetModel, RenameBoard};
use crate::context::KanbanContext;
use crate::drag::ApplyMove;
use crate::error::{KanbanError, Result};
use crate::processor::KanbanOperationProcessor;
use crate::task::{AddTask, DeleteTask, RenameTask};
use crate::types::{BoardId, MoveDescriptor, Source, TaskId};
use serde_json::Value;
use trellis_operations::{Operation, OperationProcessor};

/// One command, ready to execute
#[derive(Debug)]
pub enum KanbanCommand {
    AddBoard(AddBoard),
    RenameBoard(RenameBoard),
    DeleteBoard(DeleteBoard),
    GetModel(GetModel),
    AddTask(AddTask),
    RenameTask(RenameTask),
    DeleteTask(DeleteTask),
    ApplyMove(ApplyMove),
    ListArchive(ListArchive),
    RemoveArchived(RemoveArchived),
    ClearArchive(ClearArchive),
}

impl KanbanCommand {
    /// Metadata for the wrapped command
    pub fn operation(&self) -> &dyn Operation {
        match self {
            Self::AddBoard(op) => op,
            Self::RenameBoard(op) => op,
            Self::DeleteBoard(op) => op,
            Self::GetModel(op) => op,
            Self::AddTask(op) => op,
            Self::RenameTask(op) => op,
            Self::DeleteTask(op) => op,
            Self::ApplyMove(op) => op,
            Self::ListArchive(op) => op,
            Self::RemoveArchived(op) => op,
            Self::ClearArchive(op) => op,
        }
    }

    pub fn op_string(&self) -> String {
        self.operation().op_string()
    }

    /// Run through `processor`, which records the activity entry
    pub async fn execute(
        &self,
        processor: &KanbanOperationProcessor,
        ctx: &KanbanContext,
    ) -> Result<Value> {
        match self {
            Self::AddBoard(op) => processor.process(op, ctx).await,
            Self::RenameBoard(op) => processor.process(op, ctx).await,
            Self::DeleteBoard(op) => processor.process(op, ctx).await,
            Self::GetModel(op) => processor.process(op, ctx).await,
            Self::AddTask(op) => processor.process(op, ctx).await,
            Self::RenameTask(op) => processor.process(op, ctx).await,
            Self::DeleteTask(op) => processor.process(op, ctx).await,
            Self::ApplyMove(op) => processor.process(op, ctx).await,
            Self::ListArchive(op) => processor.process(op, ctx).await,
            Self::RemoveArchived(op) => processor.process(op, ctx).await,
            Self::ClearArchive(op) => processor.process(op, ctx).await,
        }
    }

    /// One instance of every command, for listing what is available
    pub fn catalog() -> Vec<KanbanCommand> {
        let board = BoardId::new(0);
        vec![
            Self::GetModel(GetModel::new()),
            Self::AddBoard(AddBoard::new("")),
            Self::RenameBoard(RenameBoard::new(board, "")),
            Self::DeleteBoard(DeleteBoard::new(board)),
            Self::AddTask(AddTask::new(board, "")),
            Self::RenameTask(RenameTask::new(board, TaskId::new(0), "")),
            Self::DeleteTask(DeleteTask::new(board, TaskId::new(0))),
            Self::ApplyMove(ApplyMove::new(MoveDescriptor::new(
                Source::Boards { index: 0 },
                None,
            ))),
            Self::ListArchive(ListArchive::new()),
            Self::RemoveArchived(RemoveArchived::new(0)),
            Self::ClearArchive(ClearArchive::new()),
        ]
    }
}

/// A parsed command and who asked for it
#[derive(Debug)]
pub struct ParsedCommand {
    pub command: KanbanCommand,
    pub actor: Option<String>,
}

impl ParsedCommand {
    /// Execute, attributing to the command's own actor or else `fallback`
    pub async fn execute(&self, ctx: &KanbanContext, fallback: Option<&str>) -> Result<Value> {
        let processor = match self.actor.as_deref().or(fallback) {
            Some(actor) => KanbanOperationProcessor::with_actor(actor),
            None => KanbanOperationProcessor::new(),
        };
        self.command.execute(&processor, ctx).await
    }
}

macro_rules! impl_from_command {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for KanbanCommand {
                fn from(op: $variant) -> Self {
                    Self::$variant(op)
                }
            }
        )*
    };
}

impl_from_command!(
    AddBoard,
    RenameBoard,
    DeleteBoard,
    GetModel,
    AddTask,
    RenameTask,
    DeleteTask,
    ApplyMove,
    ListArchive,
    RemoveArchived,
    ClearArchive,
);

/// Build the command for `op` from normalized parameters
pub(super) fn build(verb: Verb, noun: Noun, params: Value) -> Result<KanbanCommand> {
    fn from<T: serde::de::DeserializeOwned>(op: &str, params: Value) -> Result<T> {
        serde_json::from_value(params).map_err(|e| KanbanError::parse(format!("{op}: {e}")))
    }

    let op = format!("{} {}", verb.as_str(), noun.as_str());
    let command = match (verb, noun) {
        (Verb::Add, Noun::Board) => KanbanCommand::AddBoard(from(&op, params)?),
        (Verb::Rename, Noun::Board) => KanbanCommand::RenameBoard(from(&op, params)?),
        (Verb::Delete, Noun::Board) => KanbanCommand::DeleteBoard(from(&op, params)?),
        (Verb::Get | Verb::List, Noun::Model) => KanbanCommand::GetModel(from(&op, params)?),
        (Verb::Add, Noun::Task) => KanbanCommand::AddTask(from(&op, params)?),
        (Verb::Rename, Noun::Task) => KanbanCommand::RenameTask(from(&op, params)?),
        (Verb::Delete, Noun::Task) => KanbanCommand::DeleteTask(from(&op, params)?),
        (Verb::Apply, Noun::Move | Noun::Board | Noun::Task) => {
            KanbanCommand::ApplyMove(from(&op, params)?)
        }
        (Verb::Get | Verb::List, Noun::Archive) => KanbanCommand::ListArchive(from(&op, params)?),
        (Verb::Delete, Noun::Archive) => KanbanCommand::RemoveArchived(from(&op, params)?),
        (Verb::Clear, Noun::Archive) => KanbanCommand::ClearArchive(from(&op, params)?),
        _ => return Err(KanbanError::parse(format!("unknown operation: {op}"))),
    };
    Ok(command)
}

/// Action words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Add,
    Rename,
    Delete,
    Get,
    List,
    Apply,
    Clear,
}

impl Verb {
    pub fn from_alias(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "add" | "create" | "new" => Some(Self::Add),
            "rename" | "edit" | "update" | "retitle" => Some(Self::Rename),
            "delete" | "remove" | "rm" | "del" => Some(Self::Delete),
            "get" | "show" | "read" => Some(Self::Get),
            "list" | "ls" => Some(Self::List),
            "apply" | "move" | "mv" | "drag" | "drop" => Some(Self::Apply),
            "clear" | "empty" => Some(Self::Clear),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Rename => "rename",
            Self::Delete => "delete",
            Self::Get => "get",
            Self::List => "list",
            Self::Apply => "apply",
            Self::Clear => "clear",
        }
    }
}

/// Things acted upon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Noun {
    Board,
    Task,
    Move,
    Model,
    Archive,
}

impl Noun {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "board" | "column" | "list" => Some(Self::Board),
            "task" | "todo" | "card" => Some(Self::Task),
            "move" | "drag" => Some(Self::Move),
            "model" | "boards" => Some(Self::Model),
            "archive" | "archived" | "trash" => Some(Self::Archive),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Board => "board",
            Self::Task => "task",
            Self::Move => "move",
            Self::Model => "model",
            Self::Archive => "archive",
        }
    }
}
