//! Where the model is kept between runs

mod file;
mod memory;
mod writer;

pub use file::{JsonFileStore, StoreLock};
pub use memory::MemoryStore;
pub use writer::{PersistenceWriter, SaveStatus};

use crate::error::Result;
use crate::types::Model;
use async_trait::async_trait;

/// Load/save gateway for the whole model
#[async_trait]
pub trait ModelStore: Send + Sync {
    /// `Ok(None)` when nothing has been stored yet.
    ///
    /// Stored data that fails schema or invariant checks is an error.
    async fn load(&self) -> Result<Option<Model>>;

    async fn save(&self, model: &Model) -> Result<()>;
}
