//! ListArchive command

use super::filter::{filter_records, parse_date, ArchiveFilter};
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use trellis_operations::{async_trait, operation, Execute, ExecutionResult};

/// List deleted tasks
#[operation(
    verb = "list",
    noun = "archive",
    description = "List archived tasks, optionally filtered by text or deletion date"
)]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListArchive {
    /// Case-insensitive text to search for
    pub search: Option<String>,
    /// Only records deleted on this day (YYYY-MM-DD)
    pub date: Option<String>,
}

impl ListArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    fn filter(&self) -> Result<ArchiveFilter> {
        Ok(ArchiveFilter {
            text: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
            date: self.date.as_deref().map(parse_date).transpose()?,
        })
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListArchive {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let result: Result<Value> = async {
            let filter = self.filter()?;
            let records = ctx.archive().list().await?;
            let total = records.len();

            let items: Vec<Value> = filter_records(records, &filter)
                .into_iter()
                .map(|(index, record)| {
                    json!({
                        "index": index,
                        "boardId": record.board_id,
                        "text": record.text,
                        "deletionTime": record.deletion_time,
                    })
                })
                .collect();

            Ok(json!({
                "records": items,
                "count": items.len(),
                "total": total,
            }))
        }
        .await;

        match result {
            Ok(value) => ExecutionResult::Unlogged { value },
            Err(error) => ExecutionResult::Failed {
                error,
                log_entry: None,
            },
        }
    }
}
