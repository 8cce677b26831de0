//! CLI argument parsing for the task list.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tl",
    about = "A minimal task list backed by SQLite",
    version,
    after_help = "Logs are written to: ~/.local/share/tasklist/logs/tasklist.log"
)]
pub struct Cli {
    /// Path to the task database (default: ~/.local/share/tasklist/tasklist.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a new task
    Add {
        /// Task name
        name: String,

        /// Description
        #[arg(short = 'D', long)]
        description: Option<String>,

        /// Sort order (lower is shown higher up the list)
        #[arg(short, long, default_value = "0")]
        sort_order: i32,
    },

    /// List tasks in display order
    List {
        /// Emit the tasks as JSON instead of the list view
        #[arg(long)]
        json: bool,
    },

    /// Show a single task
    Show {
        /// Task id
        id: i64,

        /// Emit the task as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit an existing task
    Edit {
        /// Task id
        id: i64,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New description
        #[arg(short = 'D', long)]
        description: Option<String>,

        /// New sort order
        #[arg(short, long)]
        sort_order: Option<i32>,
    },

    /// Delete a task (asks for confirmation)
    Delete {
        /// Task id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
