//! Running operations and recording what they did

use crate::{Execute, LogEntry};
use async_trait::async_trait;
use serde_json::Value;

/// Runs operations on behalf of an actor and records their log entries.
///
/// Implementors decide where entries go (`write_log`); `process` takes care
/// of running the operation, stamping the actor and unwrapping the result.
#[async_trait]
pub trait OperationProcessor<C, E>: Send + Sync
where
    C: Send + Sync,
    E: Send,
{
    /// Who operations are attributed to
    fn actor(&self) -> Option<&str>;

    /// Persist a log entry. Failures to record must not fail the operation.
    async fn write_log(&self, ctx: &C, entry: &LogEntry);

    async fn process<O>(&self, operation: &O, ctx: &C) -> Result<Value, E>
    where
        O: Execute<C, E>,
    {
        let (result, entry) = operation.execute(ctx).await.split();

        if let Some(mut entry) = entry {
            if let Some(actor) = self.actor() {
                entry = entry.with_actor(actor);
            }
            self.write_log(ctx, &entry).await;
        }

        result
    }
}
