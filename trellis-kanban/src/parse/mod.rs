//! Forgiving input parsing for kanban operations
//!
//! The parser accepts multiple input formats and normalizes them to typed
//! commands.

mod command;

pub use command::{KanbanCommand, Noun, ParsedCommand, Verb};

use crate::error::{KanbanError, Result};
use serde_json::{Map, Value};

/// Parse input JSON into one or more commands
pub fn parse_input(input: Value) -> Result<Vec<ParsedCommand>> {
    match input {
        Value::Array(arr) => arr.into_iter().map(parse_single).collect(),
        Value::Object(obj) => Ok(vec![parse_single(Value::Object(obj))?]),
        _ => Err(KanbanError::parse("input must be an object or array")),
    }
}

fn parse_single(input: Value) -> Result<ParsedCommand> {
    let obj = match input {
        Value::Object(obj) => obj,
        _ => return Err(KanbanError::parse("operation must be an object")),
    };

    let (verb, noun, mut params) = extract_operation(&obj)?;

    let actor = obj
        .get("actor")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from);

    normalize_params(noun, &mut params);

    Ok(ParsedCommand {
        command: command::build(verb, noun, Value::Object(params))?,
        actor,
    })
}

/// Extract verb and noun from the input object
fn extract_operation(obj: &Map<String, Value>) -> Result<(Verb, Noun, Map<String, Value>)> {
    // "op": "verb noun"
    if let Some(op_value) = obj.get("op").or_else(|| obj.get("operation")) {
        let op_str = op_value
            .as_str()
            .ok_or_else(|| KanbanError::invalid_value("op", "expected a string"))?;
        let (verb, noun) = parse_op_string(op_str)
            .ok_or_else(|| KanbanError::parse(format!("unknown operation: {op_str}")))?;
        return Ok((verb, noun, without_keys(obj, &["op", "operation"])));
    }

    // separate verb/noun fields
    if let (Some(v), Some(n)) = (obj.get("verb"), obj.get("noun")) {
        if let (Some(verb), Some(noun)) = (
            v.as_str().and_then(Verb::from_alias),
            n.as_str().and_then(Noun::parse),
        ) {
            return Ok((verb, noun, without_keys(obj, &["verb", "noun"])));
        }
    }

    // shorthand like { "add": "task", ... }
    for (key, value) in obj {
        if let (Some(verb), Some(noun)) = (
            Verb::from_alias(key),
            value.as_str().and_then(Noun::parse),
        ) {
            return Ok((verb, noun, without_keys(obj, &[key.as_str()])));
        }
    }

    // a bare descriptor is a move; an empty object reads the model
    if obj.contains_key("source") {
        return Ok((Verb::Apply, Noun::Move, without_keys(obj, &[])));
    }
    if obj.keys().all(|k| matches!(k.as_str(), "actor" | "note")) {
        return Ok((Verb::Get, Noun::Model, Map::new()));
    }

    Err(KanbanError::parse("cannot determine operation from input"))
}

/// Parse an op string like "add task"
fn parse_op_string(s: &str) -> Option<(Verb, Noun)> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    match parts.as_slice() {
        [verb, noun] => Some((Verb::from_alias(verb)?, Noun::parse(noun)?)),
        _ => None,
    }
}

/// Copy `obj` without `skip` and the metadata keys (actor, note)
fn without_keys(obj: &Map<String, Value>, skip: &[&str]) -> Map<String, Value> {
    obj.iter()
        .filter(|(k, _)| !skip.contains(&k.as_str()) && !matches!(k.as_str(), "actor" | "note"))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Normalize parameter keys (snake_case, aliases) and numeric strings
fn normalize_params(noun: Noun, params: &mut Map<String, Value>) {
    let keys: Vec<String> = params.keys().cloned().collect();
    for key in keys {
        let snake = to_snake_case(&key);
        if snake != key {
            if let Some(value) = params.remove(&key) {
                params.entry(snake).or_insert(value);
            }
        }
    }

    let aliases: &[(&[&str], &str)] = &[
        (&["board"], "board_id"),
        (&["task"], "task_id"),
        (&["query", "q"], "search"),
    ];
    let noun_aliases: &[(&[&str], &str)] = match noun {
        Noun::Task => &[(&["title", "content"], "text")],
        Noun::Board => &[(&["name"], "title")],
        _ => &[],
    };

    for (from_keys, to_key) in aliases.iter().chain(noun_aliases) {
        for from_key in *from_keys {
            if let Some(value) = params.remove(*from_key) {
                params.entry(*to_key).or_insert(value);
            }
        }
    }

    for key in ["board_id", "task_id", "index"] {
        if let Some(Value::String(s)) = params.get(key) {
            if let Ok(n) = s.trim().parse::<i64>() {
                params.insert(key.to_string(), Value::from(n));
            }
        }
    }
}

/// Simple camelCase to snake_case conversion
fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            result.push('_');
        }
        result.push(c.to_lowercase().next().unwrap_or(c));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::KanbanContext;
    use crate::types::{BoardId, Destination, Source, TaskId};
    use serde_json::json;

    fn single(input: Value) -> KanbanCommand {
        let mut parsed = parse_input(input).unwrap();
        assert_eq!(parsed.len(), 1);
        parsed.remove(0).command
    }

    #[test]
    fn test_parse_explicit_op() {
        match single(json!({ "op": "add task", "boardId": 0, "text": "Test" })) {
            KanbanCommand::AddTask(cmd) => {
                assert_eq!(cmd.board_id, BoardId::new(0));
                assert_eq!(cmd.text, "Test");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parse_verb_noun_fields() {
        let cmd = single(json!({ "verb": "rename", "noun": "board", "board_id": 1, "name": "Now" }));
        match cmd {
            KanbanCommand::RenameBoard(cmd) => assert_eq!(cmd.title, "Now"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parse_shorthand() {
        let cmd = single(json!({ "rm": "task", "board": "2", "taskId": "17" }));
        match cmd {
            KanbanCommand::DeleteTask(cmd) => {
                assert_eq!(cmd.board_id, BoardId::new(2));
                assert_eq!(cmd.task_id, TaskId::new(17));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_task_title_alias() {
        let cmd = single(json!({ "op": "add task", "board_id": 0, "title": "via title" }));
        assert!(matches!(cmd, KanbanCommand::AddTask(ref c) if c.text == "via title"));
    }

    #[test]
    fn test_canonical_op_strings_parse() {
        for command in KanbanCommand::catalog() {
            let op = command.op_string();
            assert!(parse_op_string(&op).is_some(), "{op}");
        }
    }

    #[test]
    fn test_parse_move() {
        let cmd = single(json!({
            "op": "apply move",
            "source": { "container": "board", "id": 0, "index": 1 },
            "destination": { "container": "trash" }
        }));
        match cmd {
            KanbanCommand::ApplyMove(cmd) => {
                assert_eq!(
                    cmd.source,
                    Source::Board {
                        id: BoardId::new(0),
                        index: 1
                    }
                );
                assert_eq!(cmd.destination, Some(Destination::Trash));
            }
            other => panic!("unexpected {other:?}"),
        }

        // a bare descriptor with no destination is a cancelled move
        let cmd = single(json!({ "source": { "container": "boards", "index": 0 } }));
        assert!(matches!(cmd, KanbanCommand::ApplyMove(ref c) if c.destination.is_none()));
    }

    #[test]
    fn test_infer_get_model() {
        assert!(matches!(single(json!({})), KanbanCommand::GetModel(_)));
        assert!(matches!(
            single(json!({ "op": "list archive", "q": "milk" })),
            KanbanCommand::ListArchive(ref c) if c.search.as_deref() == Some("milk")
        ));
    }

    #[test]
    fn test_batch_operations() {
        let parsed = parse_input(json!([
            { "op": "add board", "title": "One" },
            { "op": "add board", "title": "Two" }
        ]))
        .unwrap();
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            parse_input(json!("add task")),
            Err(KanbanError::Parse { .. })
        ));
        assert!(matches!(
            parse_input(json!({ "op": "fly task" })),
            Err(KanbanError::Parse { .. })
        ));
        assert!(matches!(
            parse_input(json!({ "op": 3 })),
            Err(KanbanError::InvalidValue { .. })
        ));
        // missing required field
        assert!(matches!(
            parse_input(json!({ "op": "add task", "text": "no board" })),
            Err(KanbanError::Parse { .. })
        ));
        assert!(parse_input(json!({ "title": "ambiguous" })).is_err());
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(to_snake_case("boardId"), "board_id");
        assert_eq!(to_snake_case("deletionTime"), "deletion_time");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn test_parse_with_actor() {
        let parsed =
            parse_input(json!({ "op": "add board", "title": "T", "actor": "user123" })).unwrap();
        assert_eq!(parsed[0].actor.as_deref(), Some("user123"));

        let parsed = parse_input(json!({ "op": "add board", "title": "T" })).unwrap();
        assert_eq!(parsed[0].actor, None);
    }

    #[tokio::test]
    async fn test_parsed_commands_execute() {
        let ctx = KanbanContext::in_memory().await;
        let parsed = parse_input(json!([
            { "op": "add task", "boardId": 0, "text": "first" },
            { "op": "apply move",
              "source": { "container": "board", "id": 0, "index": 0 },
              "destination": { "container": "board", "id": 2, "index": 0 } }
        ]))
        .unwrap();

        for command in &parsed {
            command.execute(&ctx, Some("cli")).await.unwrap();
        }

        let model = ctx.model().await;
        assert!(model.boards[0].tasks.is_empty());
        assert_eq!(model.boards[2].tasks[0].text, "first");
    }
}
