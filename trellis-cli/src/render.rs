//! Text output: tables for people, JSON or YAML for scripts

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::exit_codes::EXIT_ERROR;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde::Serialize;
use serde_json::Value;
use trellis_kanban::{KanbanCommand, LogEntry, Model};
use trellis_operations::{ParamMeta, ParamType};

/// Serialize `value` for a machine-readable format; `None` for tables
pub fn structured<T: Serialize>(format: OutputFormat, value: &T) -> CliResult<Option<String>> {
    match format {
        OutputFormat::Table => Ok(None),
        OutputFormat::Json => Ok(Some(serde_json::to_string_pretty(value)?)),
        OutputFormat::Yaml => serde_yaml_ng::to_string(value)
            .map(Some)
            .map_err(|e| CliError::new(format!("failed to render YAML: {e}"), EXIT_ERROR)),
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// One column per board, tasks top to bottom
pub fn model_table(model: &Model) -> String {
    if model.boards.is_empty() {
        return "No boards".to_string();
    }

    let mut table = new_table();
    table.set_header(
        model
            .boards
            .iter()
            .map(|board| Cell::new(format!("{} [{}]", board.title, board.id))),
    );

    let depth = model
        .boards
        .iter()
        .map(|board| board.tasks.len())
        .max()
        .unwrap_or(0);
    for row in 0..depth {
        table.add_row(model.boards.iter().map(|board| {
            board
                .tasks
                .get(row)
                .map(|task| format!("{} [{}]", task.text, task.id))
                .unwrap_or_default()
        }));
    }

    table.to_string()
}

/// The `records` of an archive listing
pub fn archive_table(listing: &Value) -> String {
    let records = listing["records"].as_array().map(Vec::as_slice).unwrap_or(&[]);
    if records.is_empty() {
        return "No archived tasks".to_string();
    }

    let mut table = new_table();
    table.set_header(vec!["Index", "Board", "Text", "Deleted"]);
    for record in records {
        table.add_row(vec![
            Cell::new(&record["index"]),
            Cell::new(&record["boardId"]),
            Cell::new(record["text"].as_str().unwrap_or_default()),
            Cell::new(record["deletionTime"].as_str().unwrap_or_default()),
        ]);
    }

    let total = listing["total"].as_u64().unwrap_or(records.len() as u64);
    format!("{table}\n{} of {total} record(s)", records.len())
}

pub fn activity_table(entries: &[LogEntry]) -> String {
    if entries.is_empty() {
        return "No activity".to_string();
    }

    let mut table = new_table();
    table.set_header(vec!["Time", "Operation", "Actor", "Result"]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.timestamp.format("%Y-%m-%d %H:%M:%S")),
            Cell::new(&entry.op),
            Cell::new(entry.actor.as_deref().unwrap_or("-")),
            Cell::new(entry.error().unwrap_or("ok")),
        ]);
    }
    table.to_string()
}

fn type_name(param_type: ParamType) -> &'static str {
    match param_type {
        ParamType::String => "string",
        ParamType::Integer => "integer",
        ParamType::Boolean => "boolean",
        ParamType::Array => "array",
        ParamType::Object => "object",
    }
}

fn describe_param(param: &ParamMeta) -> String {
    let optional = if param.required { "" } else { "?" };
    format!("{}{optional}: {}", param.name, type_name(param.param_type))
}

/// Every operation with its parameters
pub fn operations_table(catalog: &[KanbanCommand]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Operation", "Parameters", "Description"]);
    for command in catalog {
        let op = command.operation();
        let params = op
            .parameters()
            .iter()
            .map(describe_param)
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            Cell::new(op.op_string()),
            Cell::new(params),
            Cell::new(op.description()),
        ]);
    }
    table.to_string()
}

/// Operation metadata in serializable form
pub fn operations_value(catalog: &[KanbanCommand]) -> Value {
    Value::Array(
        catalog
            .iter()
            .map(|command| {
                let op = command.operation();
                serde_json::json!({
                    "op": op.op_string(),
                    "description": op.description(),
                    "parameters": op.parameters(),
                })
            })
            .collect(),
    )
}

fn id(value: &Value) -> String {
    match value {
        Value::Null => "?".to_string(),
        other => other.to_string(),
    }
}

/// One line describing what a command did
pub fn summary(command: &KanbanCommand, value: &Value) -> String {
    match command {
        KanbanCommand::AddBoard(_) => format!(
            "Added board '{}' [{}]",
            value["title"].as_str().unwrap_or_default(),
            id(&value["id"])
        ),
        KanbanCommand::RenameBoard(op) => format!(
            "Board [{}] is now '{}'",
            op.board_id,
            value["title"].as_str().unwrap_or_default()
        ),
        KanbanCommand::DeleteBoard(op) => format!(
            "Deleted board [{}] and {} task(s)",
            op.board_id,
            value["discarded_tasks"].as_u64().unwrap_or(0)
        ),
        KanbanCommand::AddTask(op) => format!(
            "Added task [{}] to board [{}]",
            id(&value["task"]["id"]),
            op.board_id
        ),
        KanbanCommand::RenameTask(op) => format!(
            "Task [{}] is now '{}'",
            op.task_id,
            value["text"].as_str().unwrap_or_default()
        ),
        KanbanCommand::DeleteTask(op) => format!("Deleted task [{}] and archived it", op.task_id),
        KanbanCommand::ApplyMove(op) => match (value["changed"].as_bool(), op.destination) {
            (Some(true), Some(destination)) => format!("Moved {} to {destination}", op.source),
            _ => "Nothing moved".to_string(),
        },
        KanbanCommand::RemoveArchived(_) => format!(
            "Removed '{}' from the archive",
            value["removed"]["text"].as_str().unwrap_or_default()
        ),
        KanbanCommand::ClearArchive(_) => format!(
            "Cleared {} archived task(s)",
            value["cleared"].as_u64().unwrap_or(0)
        ),
        KanbanCommand::GetModel(_) | KanbanCommand::ListArchive(_) => String::new(),
    }
}
