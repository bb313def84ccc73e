//! Integration tests for activity logging

use trellis_kanban::{
    board::{AddBoard, GetModel, RenameBoard},
    drag::ApplyMove,
    task::AddTask,
    BoardId, KanbanContext, KanbanOperationProcessor, MoveDescriptor, OperationProcessor,
};
use tempfile::TempDir;

#[tokio::test]
async fn test_activity_logging_end_to_end() {
    let temp = TempDir::new().unwrap();
    let activity_path = temp.path().join("activity.jsonl");
    let ctx = KanbanContext::in_memory()
        .await
        .with_activity_log(&activity_path);

    let processor = KanbanOperationProcessor::with_actor("test-user[session123]");

    // logged
    let board = processor
        .process(&AddBoard::new("Review"), &ctx)
        .await
        .unwrap();
    let board_id = BoardId::new(board["id"].as_i64().unwrap());

    processor
        .process(&AddTask::new(board_id, "First task"), &ctx)
        .await
        .unwrap();

    processor
        .process(
            &ApplyMove::new(MoveDescriptor::task(board_id, 0).to_board(BoardId::new(0), 0)),
            &ctx,
        )
        .await
        .unwrap();

    // unlogged: reads and no-ops
    processor.process(&GetModel::new(), &ctx).await.unwrap();
    processor
        .process(&RenameBoard::new(board_id, "Review"), &ctx)
        .await
        .unwrap();

    let entries = ctx.read_activity(None).await.unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].op, "apply move"); // Newest first
    assert_eq!(entries[1].op, "add task");
    assert_eq!(entries[2].op, "add board"); // Oldest last

    for entry in &entries {
        assert_eq!(entry.actor.as_deref(), Some("test-user[session123]"));
        assert!(entry.error().is_none());
    }

    // Verify the log file is JSONL
    let raw = std::fs::read_to_string(&activity_path).unwrap();
    let lines: Vec<&str> = raw.lines().collect();
    assert_eq!(lines.len(), 3);
    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["op"], "add board");
    assert_eq!(first["input"]["title"], "Review");
    assert_eq!(first["actor"], "test-user[session123]");
}

#[tokio::test]
async fn test_failed_operations_are_logged() {
    let temp = TempDir::new().unwrap();
    let ctx = KanbanContext::in_memory()
        .await
        .with_activity_log(temp.path().join("activity.jsonl"));
    let processor = KanbanOperationProcessor::new();

    let result = processor
        .process(&ApplyMove::new(MoveDescriptor::boards(0, 7)), &ctx)
        .await;
    assert!(result.unwrap_err().is_anomaly());

    let entries = ctx.read_activity(Some(10)).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].op, "apply move");
    assert!(entries[0].error().unwrap().contains("out of range"));
    assert!(entries[0].actor.is_none());
}

#[tokio::test]
async fn test_unwritable_activity_log_does_not_fail_operation() {
    let temp = TempDir::new().unwrap();
    // a directory where the log file should be
    let ctx = KanbanContext::in_memory()
        .await
        .with_activity_log(temp.path());
    let processor = KanbanOperationProcessor::new();

    let value = processor
        .process(&AddBoard::new("Still works"), &ctx)
        .await
        .unwrap();
    assert_eq!(value["title"], "Still works");
    assert_eq!(ctx.model().await.boards.len(), 4);
}
