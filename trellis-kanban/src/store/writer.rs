//! Background saving.
//!
//! Commits hand their model to the writer and return at once. The writer
//! only ever holds the newest model: if several commits land while a save
//! is in flight, the next save writes the last of them and skips the rest.

use super::ModelStore;
use crate::error::{KanbanError, Result};
use crate::types::Model;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
struct Pending {
    generation: u64,
    model: Arc<Model>,
}

/// Result of the most recent save attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveStatus {
    /// Generation of the model that was written (or attempted)
    pub generation: u64,
    /// Why the attempt failed
    pub error: Option<String>,
}

impl SaveStatus {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Saves committed models on a background task
#[derive(Debug)]
pub struct PersistenceWriter {
    pending: watch::Sender<Pending>,
    status: watch::Receiver<SaveStatus>,
}

impl PersistenceWriter {
    /// Start the writer. `initial` is generation 0 and is not saved.
    ///
    /// Must be called inside a tokio runtime.
    pub fn spawn(store: Arc<dyn ModelStore>, initial: Arc<Model>) -> Self {
        let (pending, mut latest) = watch::channel(Pending {
            generation: 0,
            model: initial,
        });
        let (status_tx, status) = watch::channel(SaveStatus {
            generation: 0,
            error: None,
        });

        tokio::spawn(async move {
            // ends once the sender is dropped and the last model has been seen
            while latest.changed().await.is_ok() {
                let Pending { generation, model } = latest.borrow_and_update().clone();
                let error = match store.save(&model).await {
                    Ok(()) => {
                        debug!(generation, boards = model.boards.len(), "saved board model");
                        None
                    }
                    Err(error) => {
                        warn!(generation, %error, "failed to save board model, keeping it in memory");
                        Some(error.to_string())
                    }
                };
                status_tx.send_replace(SaveStatus { generation, error });
            }
        });

        Self { pending, status }
    }

    /// Queue a model for saving, replacing anything not yet written
    pub fn submit(&self, generation: u64, model: Arc<Model>) {
        self.pending.send_replace(Pending { generation, model });
    }

    /// Status of the last finished save
    pub fn last_status(&self) -> SaveStatus {
        self.status.borrow().clone()
    }

    /// Wait until the most recently submitted model has been attempted
    pub async fn flush(&self) -> Result<SaveStatus> {
        let target = self.pending.borrow().generation;
        let mut status = self.status.clone();
        let done = status
            .wait_for(|s| s.generation >= target)
            .await
            .map_err(|_| KanbanError::WriterClosed)?;
        Ok((*done).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::{Board, BoardId};

    #[tokio::test]
    async fn test_flush_with_nothing_pending() {
        let store = Arc::new(MemoryStore::new());
        let writer = PersistenceWriter::spawn(store.clone(), Arc::new(Model::default()));

        let status = writer.flush().await.unwrap();
        assert_eq!(status.generation, 0);
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_saves_latest_model() {
        let store = Arc::new(MemoryStore::new());
        let writer = PersistenceWriter::spawn(store.clone(), Arc::new(Model::default()));

        let mut model = Model::default();
        for generation in 1..=5 {
            model.boards.push(Board::new(BoardId::new(100 + generation as i64), "x"));
            writer.submit(generation, Arc::new(model.clone()));
        }

        let status = writer.flush().await.unwrap();
        assert!(status.is_ok());
        assert_eq!(status.generation, 5);
        assert_eq!(store.stored(), Some(model));
        assert!(store.save_count() >= 1);
    }

    #[tokio::test]
    async fn test_failure_is_reported_then_retried() {
        let store = Arc::new(MemoryStore::new());
        let writer = PersistenceWriter::spawn(store.clone(), Arc::new(Model::default()));

        store.set_failing(true);
        writer.submit(1, Arc::new(Model::empty()));
        let status = writer.flush().await.unwrap();
        assert_eq!(status.generation, 1);
        assert!(status.error.is_some());
        assert!(store.stored().is_none());

        store.set_failing(false);
        writer.submit(2, Arc::new(Model::default()));
        let status = writer.flush().await.unwrap();
        assert!(status.is_ok());
        assert_eq!(writer.last_status(), status);
        assert_eq!(store.stored(), Some(Model::default()));
    }
}
