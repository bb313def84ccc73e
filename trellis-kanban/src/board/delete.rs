//! DeleteBoard command

use crate::context::KanbanContext;
use crate::error::KanbanError;
use crate::mutation;
use crate::outcome::{finish, Outcome};
use crate::types::BoardId;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use trellis_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Delete a board and everything on it
#[operation(
    verb = "delete",
    noun = "board",
    description = "Delete a board together with its tasks"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteBoard {
    /// The board to delete
    pub board_id: BoardId,
}

impl DeleteBoard {
    pub fn new(board_id: impl Into<BoardId>) -> Self {
        Self {
            board_id: board_id.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteBoard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result = async {
            let mut discarded = 0;
            ctx.commit(&self.op_string(), |model, _| {
                discarded = model.require_board(self.board_id)?.tasks.len();
                mutation::delete_board(model, self.board_id)
            })
            .await?;
            Ok(Outcome::Changed(json!({
                "deleted": self.board_id,
                "discarded_tasks": discarded,
            })))
        }
        .await;

        finish(self.op_string(), input, start, result)
    }
}
