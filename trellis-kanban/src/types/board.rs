//! Boards and the tasks they hold

use super::ids::{BoardId, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    /// Fields this engine does not know about, carried through saves untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            extra: Map::new(),
        }
    }
}

/// A titled, ordered list of tasks. Position in the list is significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    /// Older documents call this `toDos`
    #[serde(default, alias = "toDos")]
    pub tasks: Vec<Task>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Board {
    pub fn new(id: BoardId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            tasks: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Add tasks, in order
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = Task>) -> Self {
        self.tasks.extend(tasks);
        self
    }

    pub fn task_index(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub fn find_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn contains_task(&self, id: TaskId) -> bool {
        self.task_index(id).is_some()
    }

    /// Human label used in error messages
    pub(crate) fn label(&self) -> String {
        format!("board {}", self.id)
    }
}
