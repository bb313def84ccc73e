//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use trellis_kanban::{BoardId, Destination, Source, TaskId};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(version)]
#[command(about = "Kanban boards in a JSON file")]
#[command(long_about = "
trellis keeps an ordered list of boards, each an ordered list of tasks, in a
single JSON document. Deleted tasks are kept in an archive, and every change
is recorded in an activity log.

Global arguments can be used with any command:
  --verbose     Show detailed log output
  --format      Output format (table, json, yaml)
  --debug       Enable debug logging
  --quiet       Suppress all output except errors
  --yes         Delete without asking for confirmation

Example usage:
  trellis show                          # Print every board
  trellis task add 0 \"Write docs\"       # Add a task to board 0
  trellis move board:0:0 board:1:0      # Drag the first task of board 0 to board 1
  trellis move board:0:2 trash          # Delete a task by dropping it on the trash
  trellis archive list --search docs    # Find deleted tasks
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Delete boards, tasks and archive records without asking
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Global output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Directory holding the board, archive and activity files
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Name recorded in the activity log
    #[arg(long, global = true)]
    pub actor: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every board and its tasks (the default)
    Show,
    /// Add, rename or delete boards
    Board {
        #[command(subcommand)]
        action: BoardAction,
    },
    /// Add, rename or delete tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Apply one drag: reorder boards, reorder or transfer a task, or trash it
    #[command(long_about = "
Apply one drag from a source position to a destination position.

Positions:
  boards:<index>            A board in the board list
  board:<id>:<index>        A task slot inside a board
  trash                     The trash (tasks only)

Leaving out the destination cancels the drag and changes nothing.

Examples:
  trellis move boards:0 boards:2        # Make the first board the third
  trellis move board:0:1 board:0:0      # Move a task to the top of its board
  trellis move board:0:0 board:3:1      # Move a task to another board
  trellis move board:3:1 trash          # Delete and archive a task
")]
    Move {
        /// Where the drag started
        from: Source,
        /// Where it was dropped
        to: Option<Destination>,
    },
    /// Inspect or manage deleted tasks
    Archive {
        #[command(subcommand)]
        action: ArchiveAction,
    },
    /// Run JSON commands from a file, an argument or stdin
    #[command(long_about = "
Run one or more commands given as JSON. Each command names its operation
either as an \"op\" string or as separate \"verb\" and \"noun\" fields, with
parameters alongside. An array runs every command in order.

Examples:
  trellis apply '{\"op\": \"add task\", \"board_id\": 0, \"text\": \"Ship\"}'
  trellis apply --file commands.json
  echo '[{\"op\": \"add board\", \"title\": \"Later\"}]' | trellis apply
")]
    Apply {
        /// Inline JSON
        json: Option<String>,
        /// Read JSON from this file instead
        #[arg(long, short = 'f', conflicts_with = "json")]
        file: Option<PathBuf>,
    },
    /// Show recent activity, newest first
    Activity {
        /// How many entries to show
        #[arg(long, short = 'n', default_value_t = 20)]
        limit: usize,
    },
    /// List every operation and its parameters
    Operations,
}

#[derive(Subcommand, Debug)]
pub enum BoardAction {
    /// Append a new, empty board
    Add {
        title: String,
    },
    /// Change a board's title
    Rename {
        board: BoardId,
        title: String,
    },
    /// Delete a board and every task on it
    Delete {
        board: BoardId,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskAction {
    /// Add a task at the top of a board
    Add {
        board: BoardId,
        text: String,
    },
    /// Change a task's text
    Rename {
        board: BoardId,
        task: TaskId,
        text: String,
    },
    /// Delete a task and archive it
    Delete {
        board: BoardId,
        task: TaskId,
    },
}

#[derive(Subcommand, Debug)]
pub enum ArchiveAction {
    /// List archived tasks
    List {
        /// Only tasks whose text contains this, ignoring case
        #[arg(long, short = 's')]
        search: Option<String>,
        /// Only tasks deleted on this day (YYYY-MM-DD, local time)
        #[arg(long)]
        date: Option<String>,
    },
    /// Remove one record, by the index shown in `archive list`
    Remove {
        index: usize,
    },
    /// Remove every record
    Clear,
}
