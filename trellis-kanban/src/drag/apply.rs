//! ApplyMove command

use crate::context::KanbanContext;
use crate::error::KanbanError;
use crate::outcome::{finish, Outcome};
use crate::reorder::apply_move;
use crate::types::{Destination, MoveDescriptor, Source};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use trellis_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Apply a finished drag: reorder boards, reorder or transfer a task, or trash it
#[operation(
    verb = "apply",
    noun = "move",
    description = "Apply a drag-and-drop move of a board or task"
)]
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ApplyMove {
    /// Where the dragged item was picked up
    pub source: Source,
    /// Where it was dropped; absent for a cancelled drag
    pub destination: Option<Destination>,
}

impl ApplyMove {
    pub fn new(descriptor: MoveDescriptor) -> Self {
        Self {
            source: descriptor.source,
            destination: descriptor.destination,
        }
    }

    pub fn descriptor(&self) -> MoveDescriptor {
        MoveDescriptor::new(self.source, self.destination)
    }
}

impl From<MoveDescriptor> for ApplyMove {
    fn from(descriptor: MoveDescriptor) -> Self {
        Self::new(descriptor)
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ApplyMove {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);
        let descriptor = self.descriptor();

        let result = async {
            let commit = ctx
                .commit(&self.op_string(), |model, _| apply_move(model, &descriptor))
                .await?;
            let value = json!({
                "changed": commit.changed,
                "generation": commit.generation,
                "archived": commit.archived,
                "boards": commit.model.boards,
            });
            Ok(if commit.changed {
                Outcome::Changed(value)
            } else {
                Outcome::Unchanged(value)
            })
        }
        .await;

        finish(self.op_string(), input, start, result)
    }
}
