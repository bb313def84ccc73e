//! GetModel command

use crate::context::KanbanContext;
use crate::error::KanbanError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use trellis_operations::{async_trait, operation, Execute, ExecutionResult};

/// Read every board and task
#[operation(
    verb = "get",
    noun = "model",
    description = "Get all boards and their tasks in display order"
)]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GetModel {}

impl GetModel {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for GetModel {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let model = ctx.model().await;
        match serde_json::to_value(model.as_ref()) {
            Ok(value) => ExecutionResult::Unlogged { value },
            Err(error) => ExecutionResult::Failed {
                error: error.into(),
                log_entry: None,
            },
        }
    }
}
