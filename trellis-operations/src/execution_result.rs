//! Outcome of running an operation

use crate::LogEntry;

/// What an [`Execute`](crate::Execute) implementation hands back to its caller.
///
/// Mutations come back as `Logged` so a processor can record them in an
/// activity log, reads come back as `Unlogged`, and errors come back as
/// `Failed` with an optional entry describing the failed attempt.
#[derive(Debug)]
pub enum ExecutionResult<T, E> {
    /// Succeeded and changed (or attempted to change) state
    Logged { value: T, log_entry: LogEntry },
    /// Succeeded without side effects
    Unlogged { value: T },
    /// Did not succeed
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<T, E> ExecutionResult<T, E> {
    /// Drop the log entry and keep the outcome
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Logged { value, .. } | Self::Unlogged { value } => Ok(value),
            Self::Failed { error, .. } => Err(error),
        }
    }

    /// Separate the outcome from its log entry
    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }

    /// Borrow the log entry, if there is one
    pub fn log_entry(&self) -> Option<&LogEntry> {
        match self {
            Self::Logged { log_entry, .. } => Some(log_entry),
            Self::Failed { log_entry, .. } => log_entry.as_ref(),
            Self::Unlogged { .. } => None,
        }
    }

    /// True when the outcome carries something worth writing to an activity log
    pub fn should_log(&self) -> bool {
        self.log_entry().is_some()
    }

    /// True for `Failed`
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}
