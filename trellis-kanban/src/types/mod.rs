//! Core types for the kanban engine

mod archive;
mod board;
mod descriptor;
mod ids;
mod model;
mod transition;

pub use archive::ArchiveRecord;
pub use board::{Board, Task};
pub use descriptor::{Destination, MoveDescriptor, Source};
pub use ids::{BoardId, IdGenerator, TaskId};
pub use model::Model;
pub use transition::Transition;
