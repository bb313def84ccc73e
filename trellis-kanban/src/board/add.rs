//! AddBoard command

use crate::context::KanbanContext;
use crate::error::KanbanError;
use crate::mutation;
use crate::outcome::{finish, Outcome};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use trellis_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Append a new, empty board
#[operation(
    verb = "add",
    noun = "board",
    description = "Create a new board at the end of the board strip"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct AddBoard {
    /// The board title
    pub title: String,
}

impl AddBoard {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddBoard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result = async {
            let commit = ctx
                .commit(&self.op_string(), |model, ids| {
                    mutation::add_board(model, ids, &self.title)
                })
                .await?;
            let board = serde_json::to_value(commit.model.boards.last())?;
            Ok(Outcome::Changed(board))
        }
        .await;

        finish(self.op_string(), input, start, result)
    }
}
