//! RenameBoard command

use crate::context::KanbanContext;
use crate::error::KanbanError;
use crate::mutation;
use crate::outcome::{finish, Outcome};
use crate::types::BoardId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use trellis_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Change a board's title
#[operation(verb = "rename", noun = "board", description = "Change a board's title")]
#[derive(Debug, Deserialize, Serialize)]
pub struct RenameBoard {
    /// The board to rename
    pub board_id: BoardId,
    /// The new title
    pub title: String,
}

impl RenameBoard {
    pub fn new(board_id: impl Into<BoardId>, title: impl Into<String>) -> Self {
        Self {
            board_id: board_id.into(),
            title: title.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for RenameBoard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result = async {
            let commit = ctx
                .commit(&self.op_string(), |model, _| {
                    mutation::rename_board(model, self.board_id, &self.title)
                })
                .await?;
            let board = serde_json::to_value(commit.model.board(self.board_id))?;
            Ok(if commit.changed {
                Outcome::Changed(board)
            } else {
                Outcome::Unchanged(board)
            })
        }
        .await;

        finish(self.op_string(), input, start, result)
    }
}
