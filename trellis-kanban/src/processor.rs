//! KanbanOperationProcessor - runs commands and keeps the activity log

use crate::context::KanbanContext;
use crate::error::KanbanError;
use trellis_operations::{async_trait, LogEntry, OperationProcessor};

/// Runs kanban operations, attributing them to an optional actor
#[derive(Debug, Clone, Default)]
pub struct KanbanOperationProcessor {
    actor: Option<String>,
}

impl KanbanOperationProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }
}

#[async_trait]
impl OperationProcessor<KanbanContext, KanbanError> for KanbanOperationProcessor {
    fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }

    async fn write_log(&self, ctx: &KanbanContext, entry: &LogEntry) {
        if let Err(error) = ctx.append_activity(entry).await {
            tracing::warn!(op = %entry.op, %error, "failed to write activity log");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{AddBoard, GetModel};
    use tempfile::TempDir;

    async fn setup() -> (TempDir, KanbanContext) {
        let temp = TempDir::new().unwrap();
        let ctx = KanbanContext::in_memory()
            .await
            .with_activity_log(temp.path().join("activity.jsonl"));
        (temp, ctx)
    }

    #[tokio::test]
    async fn test_mutations_are_logged_with_actor() {
        let (_temp, ctx) = setup().await;
        let processor = KanbanOperationProcessor::with_actor("alice");

        let value = processor
            .process(&AddBoard::new("Backlog"), &ctx)
            .await
            .unwrap();
        assert_eq!(value["title"], "Backlog");

        let entries = ctx.read_activity(None).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].op, "add board");
        assert_eq!(entries[0].actor.as_deref(), Some("alice"));
        assert_eq!(entries[0].input["title"], "Backlog");
    }

    #[tokio::test]
    async fn test_reads_are_not_logged() {
        let (_temp, ctx) = setup().await;
        let processor = KanbanOperationProcessor::new();

        processor.process(&GetModel::new(), &ctx).await.unwrap();
        assert!(ctx.read_activity(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failures_are_logged_and_returned() {
        let (_temp, ctx) = setup().await;
        let processor = KanbanOperationProcessor::new();

        let err = processor
            .process(&AddBoard::new("   "), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, KanbanError::EmptyTitle));

        let entries = ctx.read_activity(None).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].error(), Some("board title must not be empty"));
    }
}
