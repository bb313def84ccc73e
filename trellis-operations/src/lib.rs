//! # Trellis Operations
//!
//! Commands in Trellis are plain structs whose fields are their parameters.
//! The `#[operation]` attribute derives the [`Operation`] metadata (verb, noun,
//! description and parameter list) from the struct itself, and the command
//! implements [`Execute`] against whatever context it needs.
//!
//! ## Example
//!
//! ```ignore
//! use trellis_operations::*;
//!
//! #[operation(verb = "add", noun = "board", description = "Append a new board")]
//! #[derive(Debug, Deserialize, Serialize)]
//! pub struct AddBoard {
//!     /// The board title
//!     pub title: String,
//! }
//!
//! #[async_trait]
//! impl Execute<KanbanContext, KanbanError> for AddBoard {
//!     async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
//!         // mutate through the context and return Logged / Failed
//!     }
//! }
//! ```

mod execution_result;
mod log;
mod operation;
mod parameter;
mod processor;

pub use execution_result::ExecutionResult;
pub use log::LogEntry;
pub use operation::{Execute, Operation};
pub use parameter::{ParamMeta, ParamType};
pub use processor::OperationProcessor;

pub use trellis_operations_macros::operation;

pub use async_trait::async_trait;
pub use serde_json::Value;
