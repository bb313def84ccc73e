use super::Archive;
use crate::error::{KanbanError, Result};
use crate::types::ArchiveRecord;
use async_trait::async_trait;
use std::sync::Mutex;

/// Archive held in memory
#[derive(Debug, Default)]
pub struct MemoryArchive {
    records: Mutex<Vec<ArchiveRecord>>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> std::sync::MutexGuard<'_, Vec<ArchiveRecord>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Archive for MemoryArchive {
    async fn record(&self, record: &ArchiveRecord) -> Result<()> {
        self.records().push(record.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ArchiveRecord>> {
        Ok(self.records().clone())
    }

    async fn remove(&self, index: usize) -> Result<ArchiveRecord> {
        let mut records = self.records();
        if index >= records.len() {
            return Err(KanbanError::out_of_range("archive", index, records.len()));
        }
        Ok(records.remove(index))
    }

    async fn clear(&self) -> Result<usize> {
        let mut records = self.records();
        let count = records.len();
        records.clear();
        Ok(count)
    }
}
