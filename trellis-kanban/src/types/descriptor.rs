//! Drag-and-drop move descriptors
//!
//! A descriptor says where a dragged item came from and where it was
//! dropped. Containers are typed: the board strip, one board's task list, or
//! the trash. Textual forms (`boards:2`, `board:17:0`, `trash`) are parsed
//! once, at the edge.

use super::ids::BoardId;
use crate::error::KanbanError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a drag started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "container", rename_all = "snake_case")]
pub enum Source {
    /// A board, picked up from the board strip
    Boards { index: usize },
    /// A task, picked up from a board's list
    Board { id: BoardId, index: usize },
}

/// Where a drag was released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "container", rename_all = "snake_case")]
pub enum Destination {
    Boards { index: usize },
    Board { id: BoardId, index: usize },
    Trash,
}

/// One completed (or cancelled) drag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDescriptor {
    pub source: Source,
    /// `None` when the drag was released outside any container
    #[serde(default)]
    pub destination: Option<Destination>,
}

impl MoveDescriptor {
    pub fn new(source: Source, destination: Option<Destination>) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Reorder the board strip
    pub fn boards(from: usize, to: usize) -> Self {
        Self::new(
            Source::Boards { index: from },
            Some(Destination::Boards { index: to }),
        )
    }

    /// Pick up a task; finish with `to_board` or `to_trash`
    pub fn task(board: BoardId, index: usize) -> Self {
        Self::new(Source::Board { id: board, index }, None)
    }

    pub fn to_board(mut self, board: BoardId, index: usize) -> Self {
        self.destination = Some(Destination::Board { id: board, index });
        self
    }

    pub fn to_trash(mut self) -> Self {
        self.destination = Some(Destination::Trash);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.destination.is_none()
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boards { index } => write!(f, "boards:{index}"),
            Self::Board { id, index } => write!(f, "board:{id}:{index}"),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boards { index } => write!(f, "boards:{index}"),
            Self::Board { id, index } => write!(f, "board:{id}:{index}"),
            Self::Trash => write!(f, "trash"),
        }
    }
}

fn parse_index(field: &str, raw: &str) -> Result<usize, KanbanError> {
    raw.trim()
        .parse()
        .map_err(|_| KanbanError::invalid_value(field, format!("'{raw}' is not an index")))
}

fn parse_board(field: &str, raw: &str) -> Result<BoardId, KanbanError> {
    raw.parse()
        .map_err(|_| KanbanError::invalid_value(field, format!("'{raw}' is not a board id")))
}

impl FromStr for Destination {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        match parts.as_slice() {
            ["trash"] => Ok(Self::Trash),
            ["boards", index] => Ok(Self::Boards {
                index: parse_index("destination", index)?,
            }),
            ["board", id, index] => Ok(Self::Board {
                id: parse_board("destination", id)?,
                index: parse_index("destination", index)?,
            }),
            _ => Err(KanbanError::invalid_value(
                "destination",
                format!("'{s}' is not one of trash, boards:<index>, board:<id>:<index>"),
            )),
        }
    }
}

impl FromStr for Source {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        match parts.as_slice() {
            ["boards", index] => Ok(Self::Boards {
                index: parse_index("source", index)?,
            }),
            ["board", id, index] => Ok(Self::Board {
                id: parse_board("source", id)?,
                index: parse_index("source", index)?,
            }),
            _ => Err(KanbanError::invalid_value(
                "source",
                format!("'{s}' is not one of boards:<index>, board:<id>:<index>"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builders() {
        let d = MoveDescriptor::task(BoardId::new(0), 2).to_board(BoardId::new(1), 0);
        assert_eq!(
            d.destination,
            Some(Destination::Board {
                id: BoardId::new(1),
                index: 0
            })
        );
        assert!(MoveDescriptor::task(BoardId::new(0), 0).is_cancelled());
        assert!(!MoveDescriptor::boards(0, 2).is_cancelled());
    }

    #[test]
    fn test_json_shape() {
        let d = MoveDescriptor::task(BoardId::new(3), 1).to_trash();
        assert_eq!(
            serde_json::to_value(d).unwrap(),
            json!({
                "source": {"container": "board", "id": 3, "index": 1},
                "destination": {"container": "trash"}
            })
        );

        let parsed: MoveDescriptor =
            serde_json::from_value(json!({"source": {"container": "boards", "index": 0}}))
                .unwrap();
        assert!(parsed.is_cancelled());
    }

    #[test]
    fn test_text_forms() {
        assert_eq!("trash".parse::<Destination>().unwrap(), Destination::Trash);
        assert_eq!(
            "board:17:0".parse::<Source>().unwrap(),
            Source::Board {
                id: BoardId::new(17),
                index: 0
            }
        );
        assert_eq!(
            "boards:2".parse::<Destination>().unwrap().to_string(),
            "boards:2"
        );
        assert!("trash".parse::<Source>().is_err());
        assert!("board:x:1".parse::<Destination>().is_err());
        assert!("column:1".parse::<Destination>().is_err());
    }
}
