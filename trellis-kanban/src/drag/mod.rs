//! Drag-and-drop commands

mod apply;

pub use apply::ApplyMove;
