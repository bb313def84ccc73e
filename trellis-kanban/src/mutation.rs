//! Board and task edits.
//!
//! Like the reorder engine these are pure: they read a model and return a
//! `Transition`. Titles and texts are trimmed; empty input is a validation
//! error and leaves the model alone.

use crate::error::{KanbanError, Result};
use crate::types::{Board, BoardId, IdGenerator, Model, Task, TaskId, Transition};

fn non_empty(raw: &str, empty: KanbanError) -> Result<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(empty)
    } else {
        Ok(trimmed)
    }
}

/// Append a new, empty board
pub fn add_board(model: &Model, ids: &IdGenerator, title: &str) -> Result<Transition> {
    let title = non_empty(title, KanbanError::EmptyTitle)?;
    let id = ids.next_board_id();
    if model.board(id).is_some() {
        return Err(KanbanError::duplicate_id("board", id));
    }

    let mut next = model.clone();
    next.boards.push(Board::new(id, title));
    Ok(Transition::Changed(next))
}

pub fn rename_board(model: &Model, board_id: BoardId, title: &str) -> Result<Transition> {
    let title = non_empty(title, KanbanError::EmptyTitle)?;
    if model.require_board(board_id)?.title == title {
        return Ok(Transition::Unchanged);
    }

    let mut next = model.clone();
    if let Some(board) = next.board_mut(board_id) {
        board.title = title.to_string();
    }
    Ok(Transition::Changed(next))
}

/// Remove a board together with every task on it.
///
/// The tasks are discarded, not archived.
pub fn delete_board(model: &Model, board_id: BoardId) -> Result<Transition> {
    model.require_board(board_id)?;

    let mut next = model.clone();
    next.boards.retain(|b| b.id != board_id);
    Ok(Transition::Changed(next))
}

/// Put a new task at the top of a board
pub fn add_task(
    model: &Model,
    ids: &IdGenerator,
    board_id: BoardId,
    text: &str,
) -> Result<Transition> {
    let text = non_empty(text, KanbanError::EmptyText)?;
    let board = model.require_board(board_id)?;
    let id = ids.next_task_id();
    if board.contains_task(id) {
        return Err(KanbanError::duplicate_id("task", id));
    }

    let mut next = model.clone();
    if let Some(board) = next.board_mut(board_id) {
        board.tasks.insert(0, Task::new(id, text));
    }
    Ok(Transition::Changed(next))
}

pub fn rename_task(
    model: &Model,
    board_id: BoardId,
    task_id: TaskId,
    text: &str,
) -> Result<Transition> {
    let text = non_empty(text, KanbanError::EmptyText)?;
    if model.require_task(board_id, task_id)?.text == text {
        return Ok(Transition::Unchanged);
    }

    let mut next = model.clone();
    if let Some(task) = next
        .board_mut(board_id)
        .and_then(|b| b.tasks.iter_mut().find(|t| t.id == task_id))
    {
        task.text = text.to_string();
    }
    Ok(Transition::Changed(next))
}

/// Remove one task; it is reported for archiving
pub fn delete_task(model: &Model, board_id: BoardId, task_id: TaskId) -> Result<Transition> {
    let board = model.require_board(board_id)?;
    let index = board
        .task_index(task_id)
        .ok_or(KanbanError::TaskNotFound {
            board: board_id,
            task: task_id,
        })?;

    let mut next = model.clone();
    let mut removed = Vec::with_capacity(1);
    if let Some(board) = next.board_mut(board_id) {
        removed.push(board.tasks.remove(index));
    }
    Ok(Transition::Removed {
        model: next,
        board: board_id,
        tasks: removed,
    })
}
