//! Ordered-collection engine for kanban boards
//!
//! Boards are ordered lists of tasks; the model is an ordered list of boards.
//! Everything that changes the model is a pure function from one model to
//! the next, and a single [`KanbanContext`] installs the results one at a
//! time, archives removed tasks and saves in the background.
//!
//! ## Overview
//!
//! - **Reorder engine** - [`reorder::apply_move`] applies one drag (board
//!   reorder, task reorder, task transfer, trash drop)
//! - **Mutations** - [`mutation`] adds, renames and deletes boards and tasks
//! - **Persistence** - [`store::ModelStore`] loads once and saves the latest
//!   model after every change; failures never roll the model back
//! - **Archive** - [`archive::Archive`] receives a record for every deleted task
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use trellis_kanban::{
//!     archive::JsonlArchive, store::JsonFileStore, task::AddTask, BoardId, Execute,
//!     KanbanContext,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = KanbanContext::open(
//!     Arc::new(JsonFileStore::new("data/board.json")),
//!     Arc::new(JsonlArchive::new("data/archive.jsonl")),
//! )
//! .await;
//!
//! let result = AddTask::new(BoardId::new(0), "Write the release notes")
//!     .execute(&ctx)
//!     .await
//!     .into_result()?;
//! println!("Created task: {}", result["task"]["id"]);
//!
//! ctx.flush().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage
//!
//! ```text
//! data/
//! ├── board.json       # {"boards": [{"id", "title", "tasks": [{"id", "text"}]}]}
//! ├── archive.jsonl    # one {"boardId", "text", "deletionTime"} per line
//! └── activity.jsonl   # one LogEntry per logged operation
//! ```

mod context;
pub mod defaults;
mod error;
mod io;
mod outcome;
pub mod parse;
mod processor;
pub mod types;

pub mod archive;
pub mod mutation;
pub mod reorder;
pub mod store;

// Command modules
pub mod board;
pub mod drag;
pub mod task;

// Re-export Execute trait and types from operations crate
pub use trellis_operations::{
    async_trait, Execute, ExecutionResult, LogEntry, Operation, OperationProcessor,
};

pub use context::{Commit, KanbanContext, ModelSource};
pub use error::{KanbanError, Result};
pub use parse::{parse_input, KanbanCommand, ParsedCommand};
pub use processor::KanbanOperationProcessor;

pub use types::{
    ArchiveRecord, Board, BoardId, Destination, IdGenerator, Model, MoveDescriptor, Source, Task,
    TaskId, Transition,
};
