//! Narrowing the archive list

use crate::error::{KanbanError, Result};
use crate::types::ArchiveRecord;
use chrono::NaiveDate;

/// Search criteria for the archive list. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveFilter {
    /// Case-insensitive substring of the task text
    pub text: Option<String>,
    /// Local calendar day of deletion
    pub date: Option<NaiveDate>,
}

impl ArchiveFilter {
    pub fn matches(&self, record: &ArchiveRecord) -> bool {
        self.text
            .as_deref()
            .map_or(true, |needle| record.matches_text(needle))
            && self.date.map_or(true, |date| record.deleted_on(date))
    }
}

/// Keep matching records, paired with their index in the full list
pub fn filter_records(
    records: Vec<ArchiveRecord>,
    filter: &ArchiveFilter,
) -> Vec<(usize, ArchiveRecord)> {
    records
        .into_iter()
        .enumerate()
        .filter(|(_, record)| filter.matches(record))
        .collect()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| KanbanError::invalid_value("date", format!("'{raw}': {e}")))
}
