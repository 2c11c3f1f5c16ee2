use clap::{Parser, Subcommand};
use std::path::PathBuf;
use task_core::AppError;

#[derive(Parser, Debug)]
#[command(name = "task", author, about = "A personal task tracker")]
#[command(version = crate::commands::version())]
#[command(
    long_about = "task is a CLI task tracker that helps you organize your work and personal \
                  tasks.\nStore tasks locally with priorities, mark them complete, and keep \
                  track of your productivity."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to storage file
    #[arg(long, value_name = "PATH", global = true)]
    pub file: Option<PathBuf>,

    /// Task priority (low, medium, high) [default: medium]
    #[arg(short, long, value_name = "LEVEL", global = true)]
    pub priority: Option<String>,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Log filter written to stderr, e.g. `debug` or `task_core=trace`
    #[arg(long, value_name = "FILTER", default_value = "warn", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    #[command(flatten)]
    Task(TaskCommand),
    /// Print the version number of task
    Version,
}

/// Commands that run inside a store session.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TaskCommand {
    /// Add a new task
    ///
    /// Example: task add buy milk --priority high
    Add {
        #[arg(required = true, num_args = 1.., value_name = "DESCRIPTION")]
        description: Vec<String>,
    },
    /// List tasks
    ///
    /// Example: task list --all
    List {
        /// Show completed tasks
        #[arg(short, long)]
        all: bool,
    },
    /// Remove a task by ID
    ///
    /// Example: task remove 4fZ_k
    Remove { id: String },
    /// Mark a task as completed
    ///
    /// Example: task complete 4fZ_k
    Complete { id: String },
    /// Clean all tasks
    Clean,
}

/// Reduces a clap error to its first line, reported as `invalid_input`.
pub fn normalize_parse_error(err: &clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}
