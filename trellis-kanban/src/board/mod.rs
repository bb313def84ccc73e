//! Board commands

mod add;
mod delete;
mod get;
mod rename;

pub use add::AddBoard;
pub use delete::DeleteBoard;
pub use get::GetModel;
pub use rename::RenameBoard;
