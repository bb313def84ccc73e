//! Turning a command's result into an `ExecutionResult`

use crate::error::{KanbanError, Result};
use serde_json::Value;
use std::time::Instant;
use trellis_operations::{ExecutionResult, LogEntry};

/// What a mutating command produced
pub(crate) enum Outcome {
    /// The model changed; worth an activity entry
    Changed(Value),
    /// Nothing to record
    Unchanged(Value),
}

/// Logged on change, unlogged on no-op, failed (with an entry) on error
pub(crate) fn finish(
    op: String,
    input: Value,
    start: Instant,
    result: Result<Outcome>,
) -> ExecutionResult<Value, KanbanError> {
    let duration_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(Outcome::Changed(value)) => ExecutionResult::Logged {
            value: value.clone(),
            log_entry: LogEntry::new(op, input, value, None, duration_ms),
        },
        Ok(Outcome::Unchanged(value)) => ExecutionResult::Unlogged { value },
        Err(error) => {
            let message = error.to_string();
            ExecutionResult::Failed {
                error,
                log_entry: Some(LogEntry::failure(op, input, &message, duration_ms)),
            }
        }
    }
}
