//! JSON document on disk

use super::ModelStore;
use crate::error::{KanbanError, Result};
use crate::io::atomic_write;
use crate::types::Model;
use async_trait::async_trait;
use fs2::FileExt;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Stores the model as one pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    /// Try to take the exclusive lock for this file (non-blocking)
    pub async fn lock(&self) -> Result<StoreLock> {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&lock_path)?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(StoreLock { file }),
            Err(_) => Err(KanbanError::LockBusy),
        }
    }
}

#[async_trait]
impl ModelStore for JsonFileStore {
    async fn load(&self) -> Result<Option<Model>> {
        if !fs::try_exists(&self.path).await? {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path).await?;
        Model::from_json(&raw).map(Some)
    }

    async fn save(&self, model: &Model) -> Result<()> {
        let content = model.to_json_pretty()?;
        atomic_write(&self.path, content.as_bytes()).await
    }
}

/// Held while a process works on the file; released on drop
#[derive(Debug)]
pub struct StoreLock {
    file: std::fs::File,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
