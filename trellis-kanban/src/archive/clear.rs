//! ClearArchive command

use crate::context::KanbanContext;
use crate::error::KanbanError;
use crate::outcome::{finish, Outcome};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use trellis_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Empty the archive
#[operation(verb = "clear", noun = "archive", description = "Remove every archived task")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ClearArchive {}

impl ClearArchive {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ClearArchive {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result = async {
            let cleared = ctx.archive().clear().await?;
            let value = json!({ "cleared": cleared });
            Ok(if cleared > 0 {
                Outcome::Changed(value)
            } else {
                Outcome::Unchanged(value)
            })
        }
        .await;

        finish(self.op_string(), input, start, result)
    }
}
