//! The starting model for a fresh install

use crate::types::{Board, BoardId, Model};

/// Title and id of each default board, in display order
pub const DEFAULT_BOARDS: [(i64, &str); 3] = [(0, "To Do"), (1, "Doing"), (2, "Done")];

/// Three empty boards: "To Do", "Doing", "Done"
pub fn default_boards() -> Vec<Board> {
    DEFAULT_BOARDS
        .iter()
        .map(|(id, title)| Board::new(BoardId::new(*id), *title))
        .collect()
}

/// The model used when nothing usable is stored
pub fn default_model() -> Model {
    Model::new(default_boards())
}
