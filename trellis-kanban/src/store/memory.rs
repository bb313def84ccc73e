//! In-process store for embedding and tests

use super::ModelStore;
use crate::error::Result;
use crate::types::Model;
use async_trait::async_trait;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Keeps the last saved model in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    model: Mutex<Option<Model>>,
    saves: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a model already stored
    pub fn with_model(model: Model) -> Self {
        Self {
            model: Mutex::new(Some(model)),
            ..Self::default()
        }
    }

    /// The last model saved (or seeded)
    pub fn stored(&self) -> Option<Model> {
        self.model
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Make every save fail until turned off again
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl ModelStore for MemoryStore {
    async fn load(&self) -> Result<Option<Model>> {
        Ok(self.stored())
    }

    async fn save(&self, model: &Model) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(io::Error::other("store is unavailable").into());
        }
        *self
            .model
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(model.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
