//! RenameTask command

use crate::context::KanbanContext;
use crate::error::KanbanError;
use crate::mutation;
use crate::outcome::{finish, Outcome};
use crate::types::{BoardId, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use trellis_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Change a task's text
#[operation(verb = "rename", noun = "task", description = "Change a task's text in place")]
#[derive(Debug, Deserialize, Serialize)]
pub struct RenameTask {
    /// The board holding the task
    pub board_id: BoardId,
    /// The task to edit
    pub task_id: TaskId,
    /// The new text
    pub text: String,
}

impl RenameTask {
    pub fn new(
        board_id: impl Into<BoardId>,
        task_id: impl Into<TaskId>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            board_id: board_id.into(),
            task_id: task_id.into(),
            text: text.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for RenameTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result = async {
            let commit = ctx
                .commit(&self.op_string(), |model, _| {
                    mutation::rename_task(model, self.board_id, self.task_id, &self.text)
                })
                .await?;
            let task = serde_json::to_value(commit.model.require_task(self.board_id, self.task_id)?)?;
            Ok(if commit.changed {
                Outcome::Changed(task)
            } else {
                Outcome::Unchanged(task)
            })
        }
        .await;

        finish(self.op_string(), input, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::AddTask;

    async fn setup() -> (KanbanContext, TaskId) {
        let ctx = KanbanContext::in_memory().await;
        for text in ["a", "b", "c"] {
            AddTask::new(BoardId::new(1), text)
                .execute(&ctx)
                .await
                .into_result()
                .unwrap();
        }
        let middle = ctx.model().await.boards[1].tasks[1].id;
        (ctx, middle)
    }

    #[tokio::test]
    async fn test_rename_task_in_place() {
        let (ctx, id) = setup().await;

        let result = RenameTask::new(BoardId::new(1), id, " B ")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["text"], "B");

        let model = ctx.model().await;
        assert_eq!(model.boards[1].tasks[1].id, id);
        assert_eq!(model.boards[1].tasks[1].text, "B");
    }

    #[tokio::test]
    async fn test_rename_task_noop_and_errors() {
        let (ctx, id) = setup().await;

        let result = RenameTask::new(BoardId::new(1), id, "b").execute(&ctx).await;
        assert!(!result.should_log());

        let result = RenameTask::new(BoardId::new(1), id, "").execute(&ctx).await;
        assert!(matches!(result.into_result(), Err(KanbanError::EmptyText)));

        let result = RenameTask::new(BoardId::new(0), id, "z").execute(&ctx).await;
        assert!(matches!(
            result.into_result(),
            Err(KanbanError::TaskNotFound { .. })
        ));
    }
}
