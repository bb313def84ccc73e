//! Archive kept as a JSONL file

use super::Archive;
use crate::error::{KanbanError, Result};
use crate::io::{append_jsonl, read_jsonl, read_lines, write_lines};
use crate::types::ArchiveRecord;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::warn;

/// One record per line, appended on delete
#[derive(Debug)]
pub struct JsonlArchive {
    path: PathBuf,
    // remove/clear rewrite the file; appends must not interleave with that
    guard: Mutex<()>,
}

impl JsonlArchive {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Archive for JsonlArchive {
    async fn record(&self, record: &ArchiveRecord) -> Result<()> {
        let _guard = self.guard.lock().await;
        append_jsonl(&self.path, record).await
    }

    async fn list(&self) -> Result<Vec<ArchiveRecord>> {
        read_jsonl(&self.path).await
    }

    async fn remove(&self, index: usize) -> Result<ArchiveRecord> {
        let _guard = self.guard.lock().await;
        let mut lines = read_lines(&self.path).await?;
        let mut records = parse_records(&lines);
        if index >= records.len() {
            return Err(KanbanError::out_of_range("archive", index, records.len()));
        }

        let (line, removed) = records.swap_remove(index);
        lines.remove(line);
        write_lines(&self.path, &lines).await?;
        Ok(removed)
    }

    async fn clear(&self) -> Result<usize> {
        let _guard = self.guard.lock().await;
        let lines = read_lines(&self.path).await?;
        let cleared = parse_records(&lines).len();
        if cleared == 0 {
            return Ok(0);
        }

        let unreadable: Vec<String> = lines
            .into_iter()
            .filter(|line| serde_json::from_str::<ArchiveRecord>(line).is_err())
            .collect();
        if !unreadable.is_empty() {
            warn!(
                path = %self.path.display(),
                kept = unreadable.len(),
                "kept unreadable archive lines"
            );
        }
        write_lines(&self.path, &unreadable).await?;
        Ok(cleared)
    }
}

/// Readable records with the line each came from; unreadable lines are skipped
fn parse_records(lines: &[String]) -> Vec<(usize, ArchiveRecord)> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(n, line)| serde_json::from_str(line).ok().map(|record| (n, record)))
        .collect()
}
