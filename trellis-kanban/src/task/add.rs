//! AddTask command

use crate::context::KanbanContext;
use crate::error::KanbanError;
use crate::mutation;
use crate::outcome::{finish, Outcome};
use crate::types::BoardId;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use trellis_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Add a task to the top of a board
#[operation(verb = "add", noun = "task", description = "Create a new task at the top of a board")]
#[derive(Debug, Deserialize, Serialize)]
pub struct AddTask {
    /// The board to add to
    pub board_id: BoardId,
    /// The task text
    pub text: String,
}

impl AddTask {
    pub fn new(board_id: impl Into<BoardId>, text: impl Into<String>) -> Self {
        Self {
            board_id: board_id.into(),
            text: text.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result = async {
            let commit = ctx
                .commit(&self.op_string(), |model, ids| {
                    mutation::add_task(model, ids, self.board_id, &self.text)
                })
                .await?;
            let task = commit
                .model
                .board(self.board_id)
                .and_then(|board| board.tasks.first());
            Ok(Outcome::Changed(json!({
                "board_id": self.board_id,
                "task": task,
            })))
        }
        .await;

        finish(self.op_string(), input, start, result)
    }
}
