//! Task commands

mod add;
mod delete;
mod rename;

pub use add::AddTask;
pub use delete::DeleteTask;
pub use rename::RenameTask;
