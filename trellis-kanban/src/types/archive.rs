//! Records of deleted tasks

use super::ids::BoardId;
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A task that left the model, kept for the archive list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveRecord {
    /// Board the task was on when it was removed
    pub board_id: BoardId,
    pub text: String,
    pub deletion_time: DateTime<Utc>,
}

impl ArchiveRecord {
    /// A record stamped with the current time
    pub fn new(board_id: BoardId, text: impl Into<String>) -> Self {
        Self::at(board_id, text, Utc::now())
    }

    pub fn at(board_id: BoardId, text: impl Into<String>, deletion_time: DateTime<Utc>) -> Self {
        Self {
            board_id,
            text: text.into(),
            deletion_time,
        }
    }

    /// Case-insensitive substring match on the text
    pub fn matches_text(&self, needle: &str) -> bool {
        self.text.to_lowercase().contains(&needle.to_lowercase())
    }

    /// Deleted on the given calendar day, in local time
    pub fn deleted_on(&self, date: NaiveDate) -> bool {
        self.deletion_time.with_timezone(&Local).date_naive() == date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_wire_names() {
        let when = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let record = ArchiveRecord::at(BoardId::new(2), "Ship it", when);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["boardId"], 2);
        assert_eq!(value["text"], "Ship it");
        assert!(value["deletionTime"].as_str().unwrap().starts_with("2024-03-01"));
    }

    #[test]
    fn test_matches_text_ignores_case() {
        let record = ArchiveRecord::new(BoardId::new(0), "Buy Milk");
        assert!(record.matches_text("milk"));
        assert!(record.matches_text("BUY"));
        assert!(record.matches_text(""));
        assert!(!record.matches_text("bread"));
    }

    #[test]
    fn test_deleted_on() {
        let record = ArchiveRecord::new(BoardId::new(0), "x");
        let today = record.deletion_time.with_timezone(&Local).date_naive();
        assert!(record.deleted_on(today));
        assert!(!record.deleted_on(today.pred_opt().unwrap()));
    }
}
