//! The whole persisted document: an ordered list of boards

use super::board::{Board, Task};
use super::ids::{BoardId, TaskId};
use crate::error::{KanbanError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Every board the user has, in display order.
///
/// Deserializes from the current `{"boards": [...]}` document or from the
/// older bare array of boards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Model {
    pub boards: Vec<Board>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct Document {
    boards: Vec<Board>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<Value> for Model {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        match value {
            Value::Array(_) => Ok(Self::new(serde_json::from_value(value)?)),
            value => {
                let doc: Document = serde_json::from_value(value)?;
                Ok(Self {
                    boards: doc.boards,
                    extra: doc.extra,
                })
            }
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        crate::defaults::default_model()
    }
}

impl Model {
    pub fn new(boards: Vec<Board>) -> Self {
        Self {
            boards,
            extra: Map::new(),
        }
    }

    /// A model with no boards at all
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Parse a stored document and check its invariants.
    ///
    /// Any failure is reported as `CorruptModel`.
    pub fn from_json(raw: &str) -> Result<Self> {
        let model: Self =
            serde_json::from_str(raw).map_err(|e| KanbanError::corrupt(e.to_string()))?;
        model
            .validate()
            .map_err(|e| KanbanError::corrupt(e.to_string()))?;
        Ok(model)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Board ids unique across the model, task ids unique within each board
    pub fn validate(&self) -> Result<()> {
        let mut boards = HashSet::new();
        for board in &self.boards {
            if !boards.insert(board.id) {
                return Err(KanbanError::duplicate_id("board", board.id));
            }
            let mut tasks = HashSet::new();
            for task in &board.tasks {
                if !tasks.insert(task.id) {
                    return Err(KanbanError::duplicate_id("task", task.id));
                }
            }
        }
        Ok(())
    }

    pub fn board_index(&self, id: BoardId) -> Option<usize> {
        self.boards.iter().position(|b| b.id == id)
    }

    pub fn board(&self, id: BoardId) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == id)
    }

    pub fn board_mut(&mut self, id: BoardId) -> Option<&mut Board> {
        self.boards.iter_mut().find(|b| b.id == id)
    }

    /// Like `board`, but a missing board is an error
    pub fn require_board(&self, id: BoardId) -> Result<&Board> {
        self.board(id).ok_or(KanbanError::BoardNotFound { id })
    }

    pub fn require_task(&self, board: BoardId, task: TaskId) -> Result<&Task> {
        self.require_board(board)?
            .find_task(task)
            .ok_or(KanbanError::TaskNotFound { board, task })
    }

    /// Total number of tasks across all boards
    pub fn task_count(&self) -> usize {
        self.boards.iter().map(|b| b.tasks.len()).sum()
    }

    /// Largest id in use, boards and tasks alike
    pub fn max_id(&self) -> i64 {
        self.boards
            .iter()
            .flat_map(|b| std::iter::once(b.id.get()).chain(b.tasks.iter().map(|t| t.id.get())))
            .max()
            .unwrap_or(0)
    }
}
