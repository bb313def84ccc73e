//! Operation metadata and execution traits

use crate::{ExecutionResult, ParamMeta};
use async_trait::async_trait;
use serde_json::Value;

/// Static description of a command. Implemented by `#[operation]`.
pub trait Operation {
    /// Action word, e.g. "add"
    fn verb(&self) -> &'static str;

    /// Thing acted upon, e.g. "task"
    fn noun(&self) -> &'static str;

    /// One-line human description
    fn description(&self) -> &'static str;

    /// Parameters in field declaration order
    fn parameters(&self) -> &'static [ParamMeta];

    /// "verb noun", the key used in activity logs and command input
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Run a command against a context `C`, failing with `E`
#[async_trait]
pub trait Execute<C, E>: Operation + Send + Sync
where
    C: Send + Sync,
    E: Send,
{
    async fn execute(&self, ctx: &C) -> ExecutionResult<Value, E>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParamType;

    struct Ping;

    impl Operation for Ping {
        fn verb(&self) -> &'static str {
            "ping"
        }
        fn noun(&self) -> &'static str {
            "board"
        }
        fn description(&self) -> &'static str {
            "Check the board is reachable"
        }
        fn parameters(&self) -> &'static [ParamMeta] {
            static PARAMS: [ParamMeta; 1] = [ParamMeta::new("echo")
                .description("Text to send back")
                .param_type(ParamType::String)];
            &PARAMS
        }
    }

    #[async_trait]
    impl Execute<(), String> for Ping {
        async fn execute(&self, _ctx: &()) -> ExecutionResult<Value, String> {
            ExecutionResult::Unlogged {
                value: Value::String("pong".into()),
            }
        }
    }

    #[tokio::test]
    async fn test_execute_and_metadata() {
        let op = Ping;
        assert_eq!(op.op_string(), "ping board");
        assert_eq!(op.parameters()[0].name, "echo");
        assert!(!op.parameters()[0].required);

        let value = op.execute(&()).await.into_result().unwrap();
        assert_eq!(value, "pong");
    }
}
