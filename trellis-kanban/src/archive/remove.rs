//! RemoveArchived command

use crate::context::KanbanContext;
use crate::error::KanbanError;
use crate::outcome::{finish, Outcome};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use trellis_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Drop one record from the archive
#[operation(
    verb = "remove",
    noun = "archive",
    description = "Remove one record from the archive by its index"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct RemoveArchived {
    /// Position in the unfiltered archive list
    pub index: usize,
}

impl RemoveArchived {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for RemoveArchived {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result = async {
            let removed = ctx.archive().remove(self.index).await?;
            Ok(Outcome::Changed(json!({ "removed": removed })))
        }
        .await;

        finish(self.op_string(), input, start, result)
    }
}
