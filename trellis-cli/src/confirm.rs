//! Confirmation before destructive commands

use crate::error::{CliError, CliResult};
use crate::exit_codes::{EXIT_ERROR, EXIT_WARNING};
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::io::{self, IsTerminal};
use trellis_kanban::KanbanCommand;

/// How destructive commands get their go-ahead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// `--yes` was given
    Assumed,
    /// Ask on the terminal
    Prompt,
    /// No terminal to ask on; destructive commands are refused
    Refuse,
}

impl Confirmation {
    pub fn from_flags(yes: bool) -> Self {
        if yes {
            Self::Assumed
        } else if io::stdin().is_terminal() {
            Self::Prompt
        } else {
            Self::Refuse
        }
    }

    /// Ok when `command` may run. Commands that destroy nothing always may.
    pub fn check(self, command: &KanbanCommand) -> CliResult<()> {
        let Some(question) = question(command) else {
            return Ok(());
        };

        match self {
            Self::Assumed => Ok(()),
            Self::Refuse => Err(CliError::new(
                format!("{question} Not confirmed; pass --yes to run this without a terminal"),
                EXIT_WARNING,
            )),
            Self::Prompt => {
                let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(question.as_str())
                    .default(false)
                    .interact()
                    .map_err(|e| CliError {
                        message: format!("confirmation failed: {e}"),
                        exit_code: EXIT_ERROR,
                        source: Some(Box::new(e)),
                    })?;
                if confirmed {
                    Ok(())
                } else {
                    Err(CliError::new("Cancelled, nothing was changed", EXIT_WARNING))
                }
            }
        }
    }
}

/// The question to ask before `command`, if it needs one
fn question(command: &KanbanCommand) -> Option<String> {
    match command {
        KanbanCommand::DeleteBoard(op) => Some(format!(
            "Delete board [{}] and every task on it?",
            op.board_id
        )),
        KanbanCommand::DeleteTask(op) => Some(format!(
            "Delete task [{}] from board [{}]?",
            op.task_id, op.board_id
        )),
        KanbanCommand::RemoveArchived(op) => Some(format!(
            "Permanently remove archived task {}?",
            op.index
        )),
        KanbanCommand::ClearArchive(_) => {
            Some("Permanently remove every archived task?".to_string())
        }
        _ => None,
    }
}
