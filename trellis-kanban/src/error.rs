//! Error types for the kanban engine

use crate::types::{BoardId, TaskId};
use thiserror::Error;

/// Result type for kanban operations
pub type Result<T> = std::result::Result<T, KanbanError>;

/// Errors that can occur in kanban operations.
///
/// Three families matter to callers: validation failures (bad user input,
/// shown inline), structural anomalies (a descriptor or command that does not
/// match the model, a defect signal) and persistence failures (recoverable,
/// the in-memory model stays authoritative).
#[derive(Debug, Error)]
pub enum KanbanError {
    /// Board title empty or whitespace
    #[error("board title must not be empty")]
    EmptyTitle,

    /// Task text empty or whitespace
    #[error("task text must not be empty")]
    EmptyText,

    #[error("board not found: {id}")]
    BoardNotFound { id: BoardId },

    #[error("task {task} not found in board {board}")]
    TaskNotFound { board: BoardId, task: TaskId },

    /// An index outside the container it addresses
    #[error("index {index} out of range for {container} (length {len})")]
    IndexOutOfRange {
        container: String,
        index: usize,
        len: usize,
    },

    /// A drag that cannot land where it was dropped
    #[error("invalid move: {reason}")]
    InvalidMove { reason: String },

    #[error("duplicate {item_type} ID: {id}")]
    DuplicateId { item_type: String, id: i64 },

    /// Stored model failed schema or invariant checks
    #[error("stored model is corrupt: {message}")]
    CorruptModel { message: String },

    /// Another process holds the data directory lock
    #[error("board data is locked by another process")]
    LockBusy,

    /// The background persistence writer has stopped
    #[error("persistence writer is closed")]
    WriterClosed,

    #[error("parse error: {message}")]
    Parse { message: String },

    #[error("missing required field: {field}")]
    MissingField { field: String },

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl KanbanError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_move(reason: impl Into<String>) -> Self {
        Self::InvalidMove {
            reason: reason.into(),
        }
    }

    pub fn duplicate_id(item_type: impl Into<String>, id: impl Into<i64>) -> Self {
        Self::DuplicateId {
            item_type: item_type.into(),
            id: id.into(),
        }
    }

    pub fn out_of_range(container: impl Into<String>, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            container: container.into(),
            index,
            len,
        }
    }

    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::CorruptModel {
            message: message.into(),
        }
    }

    /// User input rejected; nothing changed
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyTitle | Self::EmptyText)
    }

    /// The request does not fit the model; a defect in the caller
    pub fn is_anomaly(&self) -> bool {
        matches!(
            self,
            Self::BoardNotFound { .. }
                | Self::TaskNotFound { .. }
                | Self::IndexOutOfRange { .. }
                | Self::InvalidMove { .. }
                | Self::DuplicateId { .. }
        )
    }

    /// Storage trouble; the in-memory model is still good
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::Io(_)
                | Self::Json(_)
                | Self::CorruptModel { .. }
                | Self::LockBusy
                | Self::WriterClosed
        )
    }
}
