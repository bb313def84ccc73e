//! KanbanContext - the single owner of the live model
//!
//! Commands never touch the model directly. They hand a pure transition to
//! `commit`, which runs it against the current model under a lock, installs
//! the result, tells the archive about removed tasks and queues a save.

use crate::archive::{Archive, MemoryArchive};
use crate::error::Result;
use crate::io::{append_jsonl, read_jsonl};
use crate::store::{MemoryStore, ModelStore, PersistenceWriter, SaveStatus};
use crate::types::{ArchiveRecord, IdGenerator, Model, Transition};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use trellis_operations::LogEntry;

/// How the model in memory was obtained at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// Loaded from the store
    Stored,
    /// Nothing was stored; the defaults were used and saved
    Default,
    /// Stored data was unusable; the defaults were used and the store left alone
    Recovered { reason: String },
}

/// What a commit did
#[derive(Debug, Clone)]
pub struct Commit {
    /// False when the transition was a no-op
    pub changed: bool,
    /// The model after the commit
    pub model: Arc<Model>,
    pub generation: u64,
    /// Records sent to the archive
    pub archived: Vec<ArchiveRecord>,
}

struct State {
    model: Arc<Model>,
    generation: u64,
}

/// Context passed to every command
pub struct KanbanContext {
    state: Mutex<State>,
    ids: IdGenerator,
    source: ModelSource,
    archive: Arc<dyn Archive>,
    // taken before the model lock is released, so records keep commit order
    archive_turn: Mutex<()>,
    writer: PersistenceWriter,
    activity_path: Option<PathBuf>,
}

impl KanbanContext {
    /// Load the model once and start the background writer.
    ///
    /// Never fails: an empty store starts from the default boards (and saves
    /// them), unreadable data starts from the defaults without overwriting
    /// anything until the next change.
    pub async fn open(store: Arc<dyn ModelStore>, archive: Arc<dyn Archive>) -> Self {
        let (model, source) = match store.load().await {
            Ok(Some(model)) => {
                debug!(boards = model.boards.len(), "loaded board model");
                (model, ModelSource::Stored)
            }
            Ok(None) => {
                info!("no stored board model, starting from the defaults");
                (Model::default(), ModelSource::Default)
            }
            Err(error) => {
                warn!(%error, "stored board model is unusable, starting from the defaults");
                (
                    Model::default(),
                    ModelSource::Recovered {
                        reason: error.to_string(),
                    },
                )
            }
        };

        let ids = IdGenerator::seeded(model.max_id());
        let model = Arc::new(model);
        let writer = PersistenceWriter::spawn(store, model.clone());

        let generation = if source == ModelSource::Default {
            writer.submit(1, model.clone());
            1
        } else {
            0
        };

        Self {
            state: Mutex::new(State { model, generation }),
            ids,
            source,
            archive,
            archive_turn: Mutex::new(()),
            writer,
            activity_path: None,
        }
    }

    /// A context backed by memory only
    pub async fn in_memory() -> Self {
        Self::open(Arc::new(MemoryStore::new()), Arc::new(MemoryArchive::new())).await
    }

    /// Record logged operations to a JSONL file
    pub fn with_activity_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.activity_path = Some(path.into());
        self
    }

    pub fn source(&self) -> &ModelSource {
        &self.source
    }

    pub fn archive(&self) -> &dyn Archive {
        self.archive.as_ref()
    }

    pub fn activity_path(&self) -> Option<&Path> {
        self.activity_path.as_deref()
    }

    /// Snapshot of the current model
    pub async fn model(&self) -> Arc<Model> {
        self.state.lock().await.model.clone()
    }

    /// Number of committed changes since startup
    pub async fn generation(&self) -> u64 {
        self.state.lock().await.generation
    }

    /// Run a transition against the current model and install the result.
    ///
    /// Commits are serialized. A failed or no-op transition leaves the model
    /// as it was and saves nothing.
    pub async fn commit<F>(&self, op: &str, transition: F) -> Result<Commit>
    where
        F: FnOnce(&Model, &IdGenerator) -> Result<Transition>,
    {
        let mut state = self.state.lock().await;

        let transition = match transition(&state.model, &self.ids) {
            Ok(transition) => transition,
            Err(error) => {
                if error.is_anomaly() {
                    warn!(op, %error, "rejected request that does not fit the model");
                } else {
                    debug!(op, %error, "rejected request");
                }
                return Err(error);
            }
        };

        let (next, removed) = match transition {
            Transition::Unchanged => {
                return Ok(Commit {
                    changed: false,
                    model: state.model.clone(),
                    generation: state.generation,
                    archived: Vec::new(),
                })
            }
            Transition::Changed(model) => (model, None),
            Transition::Removed {
                model,
                board,
                tasks,
            } => (model, Some((board, tasks))),
        };

        state.generation += 1;
        state.model = Arc::new(next);
        let generation = state.generation;
        let model = state.model.clone();
        self.writer.submit(generation, model.clone());
        debug!(op, generation, "committed board model");

        let Some((board, tasks)) = removed else {
            return Ok(Commit {
                changed: true,
                model,
                generation,
                archived: Vec::new(),
            });
        };

        // archive in commit order, with the model unlocked
        let _turn = self.archive_turn.lock().await;
        drop(state);

        let mut archived = Vec::new();
        for task in tasks {
            let record = ArchiveRecord::new(board, task.text);
            if let Err(error) = self.archive.record(&record).await {
                warn!(op, %error, board = %board, "failed to archive deleted task");
            }
            archived.push(record);
        }

        Ok(Commit {
            changed: true,
            model,
            generation,
            archived,
        })
    }

    /// Wait for the latest committed model to be saved (or fail to save)
    pub async fn flush(&self) -> Result<SaveStatus> {
        self.writer.flush().await
    }

    pub fn last_save(&self) -> SaveStatus {
        self.writer.last_status()
    }

    // =========================================================================
    // Activity logging
    // =========================================================================

    /// Append a log entry to the activity log, if one is configured
    pub async fn append_activity(&self, entry: &LogEntry) -> Result<()> {
        match &self.activity_path {
            Some(path) => append_jsonl(path, entry).await,
            None => Ok(()),
        }
    }

    /// Read activity log entries, newest first
    pub async fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        let Some(path) = &self.activity_path else {
            return Ok(Vec::new());
        };

        let mut entries: Vec<LogEntry> = read_jsonl(path).await?;
        entries.reverse();

        if let Some(limit) = limit {
            entries.truncate(limit);
        }

        Ok(entries)
    }
}
