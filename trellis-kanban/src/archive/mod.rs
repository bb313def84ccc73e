//! The archive of deleted tasks and the commands that browse it

mod clear;
mod filter;
mod jsonl;
mod list;
mod memory;
mod remove;

pub use clear::ClearArchive;
pub use filter::{filter_records, parse_date, ArchiveFilter};
pub use jsonl::JsonlArchive;
pub use list::ListArchive;
pub use memory::MemoryArchive;
pub use remove::RemoveArchived;

use crate::error::Result;
use crate::types::ArchiveRecord;
use async_trait::async_trait;

/// Receives a record for every deleted task.
///
/// Recording is advisory: a failure here never undoes the deletion.
#[async_trait]
pub trait Archive: Send + Sync {
    async fn record(&self, record: &ArchiveRecord) -> Result<()>;

    /// All records, oldest first
    async fn list(&self) -> Result<Vec<ArchiveRecord>>;

    /// Remove the record at `index` (as returned by `list`)
    async fn remove(&self, index: usize) -> Result<ArchiveRecord>;

    /// Remove everything; returns how many records were dropped
    async fn clear(&self) -> Result<usize>;
}
