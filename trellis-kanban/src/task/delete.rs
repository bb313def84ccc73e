//! DeleteTask command

use crate::context::KanbanContext;
use crate::error::KanbanError;
use crate::mutation;
use crate::outcome::{finish, Outcome};
use crate::types::{BoardId, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use trellis_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Delete a task, sending it to the archive
#[operation(
    verb = "delete",
    noun = "task",
    description = "Delete a task and record it in the archive"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteTask {
    /// The board holding the task
    pub board_id: BoardId,
    /// The task to delete
    pub task_id: TaskId,
}

impl DeleteTask {
    pub fn new(board_id: impl Into<BoardId>, task_id: impl Into<TaskId>) -> Self {
        Self {
            board_id: board_id.into(),
            task_id: task_id.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result = async {
            let commit = ctx
                .commit(&self.op_string(), |model, _| {
                    mutation::delete_task(model, self.board_id, self.task_id)
                })
                .await?;
            Ok(Outcome::Changed(json!({
                "deleted": self.task_id,
                "archived": commit.archived,
            })))
        }
        .await;

        finish(self.op_string(), input, start, result)
    }
}
