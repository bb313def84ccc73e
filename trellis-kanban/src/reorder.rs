//! The reorder engine: apply one drag to the model.
//!
//! Everything here is pure. A move is resolved against the model it is
//! given and either produces a complete new model or an error; there is no
//! partially applied move.

use crate::error::{KanbanError, Result};
use crate::types::{BoardId, Destination, Model, MoveDescriptor, Source, Transition};

/// Apply a drag to `model`.
///
/// - boards onto the board strip reorder boards
/// - a task onto the trash removes it (reported in `Transition::Removed`)
/// - a task onto its own board reorders that board
/// - a task onto another board transfers it
///
/// A cancelled drag (no destination) is `Unchanged`, as is dropping an item
/// back where it started.
pub fn apply_move(model: &Model, descriptor: &MoveDescriptor) -> Result<Transition> {
    // a cancelled drag never looks at the model
    let Some(destination) = descriptor.destination else {
        return Ok(Transition::Unchanged);
    };

    if let Source::Board { id, .. } = descriptor.source {
        model.require_board(id)?;
    }

    match (descriptor.source, destination) {
        (Source::Boards { index: from }, Destination::Boards { index: to }) => {
            reorder_boards(model, from, to)
        }
        (Source::Board { id, index }, Destination::Trash) => trash_task(model, id, index),
        (Source::Board { id: a, index: from }, Destination::Board { id: b, index: to })
            if a == b =>
        {
            reorder_tasks(model, a, from, to)
        }
        (Source::Board { id: a, index: from }, Destination::Board { id: b, index: to }) => {
            transfer_task(model, a, from, b, to)
        }
        (Source::Boards { .. }, Destination::Trash) => Err(KanbanError::invalid_move(
            "a board cannot be dropped on the trash",
        )),
        (Source::Boards { .. }, Destination::Board { id, .. }) => Err(KanbanError::invalid_move(
            format!("a board cannot be dropped into the task list of board {id}"),
        )),
        (Source::Board { .. }, Destination::Boards { .. }) => Err(KanbanError::invalid_move(
            "a task cannot be dropped on the board strip",
        )),
    }
}

/// `index` must address an existing element
fn check_source(container: &str, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(KanbanError::out_of_range(container, index, len))
    }
}

/// `index` must be an insertion slot, `0..=len`
fn check_insert(container: &str, index: usize, len: usize) -> Result<()> {
    if index <= len {
        Ok(())
    } else {
        Err(KanbanError::out_of_range(container, index, len))
    }
}

fn reorder_boards(model: &Model, from: usize, to: usize) -> Result<Transition> {
    let len = model.boards.len();
    check_source("boards", from, len)?;
    if from == to {
        return Ok(Transition::Unchanged);
    }
    check_insert("boards", to, len - 1)?;

    let mut next = model.clone();
    let board = next.boards.remove(from);
    next.boards.insert(to, board);
    Ok(Transition::Changed(next))
}

fn board_position(model: &Model, id: BoardId) -> Result<usize> {
    model
        .board_index(id)
        .ok_or(KanbanError::BoardNotFound { id })
}

fn trash_task(model: &Model, id: BoardId, index: usize) -> Result<Transition> {
    let b = board_position(model, id)?;
    let board = &model.boards[b];
    check_source(&board.label(), index, board.tasks.len())?;

    let mut next = model.clone();
    let task = next.boards[b].tasks.remove(index);
    Ok(Transition::Removed {
        model: next,
        board: id,
        tasks: vec![task],
    })
}

fn reorder_tasks(model: &Model, id: BoardId, from: usize, to: usize) -> Result<Transition> {
    let b = board_position(model, id)?;
    let board = &model.boards[b];
    let len = board.tasks.len();
    check_source(&board.label(), from, len)?;
    if from == to {
        return Ok(Transition::Unchanged);
    }
    check_insert(&board.label(), to, len - 1)?;

    let mut next = model.clone();
    let tasks = &mut next.boards[b].tasks;
    let task = tasks.remove(from);
    tasks.insert(to, task);
    Ok(Transition::Changed(next))
}

fn transfer_task(
    model: &Model,
    from_board: BoardId,
    from: usize,
    to_board: BoardId,
    to: usize,
) -> Result<Transition> {
    let src = board_position(model, from_board)?;
    let dst = board_position(model, to_board)?;

    let source = &model.boards[src];
    check_source(&source.label(), from, source.tasks.len())?;
    let destination = &model.boards[dst];
    check_insert(&destination.label(), to, destination.tasks.len())?;

    let moving = source.tasks[from].id;
    if destination.contains_task(moving) {
        return Err(KanbanError::duplicate_id("task", moving));
    }

    let mut next = model.clone();
    let task = next.boards[src].tasks.remove(from);
    next.boards[dst].tasks.insert(to, task);
    Ok(Transition::Changed(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Board, Task, TaskId};

    fn ids(board: &Board) -> Vec<i64> {
        board.tasks.iter().map(|t| t.id.get()).collect()
    }

    fn board_ids(model: &Model) -> Vec<i64> {
        model.boards.iter().map(|b| b.id.get()).collect()
    }

    fn sample() -> Model {
        Model::new(vec![
            Board::new(BoardId::new(0), "To Do").with_tasks([
                Task::new(TaskId::new(1), "a"),
                Task::new(TaskId::new(2), "b"),
                Task::new(TaskId::new(3), "c"),
            ]),
            Board::new(BoardId::new(1), "Doing").with_tasks([Task::new(TaskId::new(4), "d")]),
            Board::new(BoardId::new(2), "Done"),
        ])
    }

    fn changed(t: Transition) -> Model {
        match t {
            Transition::Changed(m) => m,
            other => panic!("expected Changed, got {other:?}"),
        }
    }

    #[test]
    fn test_cancelled_drag_is_unchanged() {
        let model = sample();
        let t = apply_move(&model, &MoveDescriptor::task(BoardId::new(0), 1)).unwrap();
        assert_eq!(t, Transition::Unchanged);
    }

    #[test]
    fn test_cancelled_drag_from_unknown_board_is_unchanged() {
        let model = sample();
        let t = apply_move(&model, &MoveDescriptor::task(BoardId::new(99), 0)).unwrap();
        assert_eq!(t, Transition::Unchanged);

        let t = apply_move(&model, &MoveDescriptor::new(Source::Boards { index: 42 }, None)).unwrap();
        assert_eq!(t, Transition::Unchanged);
    }

    #[test]
    fn test_reorder_boards() {
        let model = sample();
        let next = changed(apply_move(&model, &MoveDescriptor::boards(0, 2)).unwrap());
        assert_eq!(board_ids(&next), [1, 2, 0]);

        let next = changed(apply_move(&model, &MoveDescriptor::boards(2, 0)).unwrap());
        assert_eq!(board_ids(&next), [2, 0, 1]);

        // input untouched
        assert_eq!(board_ids(&model), [0, 1, 2]);
    }

    #[test]
    fn test_same_index_is_unchanged() {
        let model = sample();
        assert_eq!(
            apply_move(&model, &MoveDescriptor::boards(1, 1)).unwrap(),
            Transition::Unchanged
        );
        let d = MoveDescriptor::task(BoardId::new(0), 2).to_board(BoardId::new(0), 2);
        assert_eq!(apply_move(&model, &d).unwrap(), Transition::Unchanged);
    }

    #[test]
    fn test_board_index_out_of_range() {
        let model = sample();
        assert!(matches!(
            apply_move(&model, &MoveDescriptor::boards(3, 0)),
            Err(KanbanError::IndexOutOfRange { .. })
        ));
        // three boards, two remain after removal, so 3 is past the end
        assert!(matches!(
            apply_move(&model, &MoveDescriptor::boards(0, 3)),
            Err(KanbanError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_trash_removes_and_reports() {
        let model = sample();
        let d = MoveDescriptor::task(BoardId::new(0), 1).to_trash();
        match apply_move(&model, &d).unwrap() {
            Transition::Removed {
                model: next,
                board,
                tasks,
            } => {
                assert_eq!(board, BoardId::new(0));
                assert_eq!(tasks.len(), 1);
                assert_eq!(tasks[0].text, "b");
                assert_eq!(ids(&next.boards[0]), [1, 3]);
                assert_eq!(next.task_count(), model.task_count() - 1);
            }
            other => panic!("expected Removed, got {other:?}"),
        }
    }

    #[test]
    fn test_reorder_within_board() {
        let model = sample();
        let d = MoveDescriptor::task(BoardId::new(0), 0).to_board(BoardId::new(0), 2);
        let next = changed(apply_move(&model, &d).unwrap());
        assert_eq!(ids(&next.boards[0]), [2, 3, 1]);

        let d = MoveDescriptor::task(BoardId::new(0), 0).to_board(BoardId::new(0), 1);
        let next = changed(apply_move(&model, &d).unwrap());
        assert_eq!(ids(&next.boards[0]), [2, 1, 3]);
    }

    #[test]
    fn test_transfer_between_boards() {
        let model = sample();
        let d = MoveDescriptor::task(BoardId::new(0), 2).to_board(BoardId::new(1), 0);
        let next = changed(apply_move(&model, &d).unwrap());
        assert_eq!(ids(&next.boards[0]), [1, 2]);
        assert_eq!(ids(&next.boards[1]), [3, 4]);
        assert_eq!(next.task_count(), model.task_count());

        // appending at the very end is allowed
        let d = MoveDescriptor::task(BoardId::new(0), 0).to_board(BoardId::new(1), 1);
        let next = changed(apply_move(&model, &d).unwrap());
        assert_eq!(ids(&next.boards[1]), [4, 1]);

        // into an empty board
        let d = MoveDescriptor::task(BoardId::new(1), 0).to_board(BoardId::new(2), 0);
        let next = changed(apply_move(&model, &d).unwrap());
        assert!(next.boards[1].tasks.is_empty());
        assert_eq!(ids(&next.boards[2]), [4]);
    }

    #[test]
    fn test_transfer_anomalies_change_nothing() {
        let model = sample();

        let d = MoveDescriptor::task(BoardId::new(0), 0).to_board(BoardId::new(9), 0);
        assert!(matches!(
            apply_move(&model, &d),
            Err(KanbanError::BoardNotFound { .. })
        ));

        let d = MoveDescriptor::task(BoardId::new(0), 0).to_board(BoardId::new(1), 5);
        assert!(matches!(
            apply_move(&model, &d),
            Err(KanbanError::IndexOutOfRange { .. })
        ));

        let d = MoveDescriptor::task(BoardId::new(9), 0).to_trash();
        let err = apply_move(&model, &d).unwrap_err();
        assert!(err.is_anomaly());
    }

    #[test]
    fn test_transfer_rejects_id_collision() {
        let mut model = sample();
        model.boards[1].tasks.push(Task::new(TaskId::new(1), "clash"));
        let d = MoveDescriptor::task(BoardId::new(0), 0).to_board(BoardId::new(1), 0);
        assert!(matches!(
            apply_move(&model, &d),
            Err(KanbanError::DuplicateId { .. })
        ));
    }

    #[test]
    fn test_mismatched_containers() {
        let model = sample();
        let cases = [
            MoveDescriptor::new(Source::Boards { index: 0 }, Some(Destination::Trash)),
            MoveDescriptor::new(
                Source::Boards { index: 0 },
                Some(Destination::Board {
                    id: BoardId::new(1),
                    index: 0,
                }),
            ),
            MoveDescriptor::new(
                Source::Board {
                    id: BoardId::new(0),
                    index: 0,
                },
                Some(Destination::Boards { index: 1 }),
            ),
        ];
        for d in cases {
            assert!(matches!(
                apply_move(&model, &d),
                Err(KanbanError::InvalidMove { .. })
            ));
        }
    }
}
