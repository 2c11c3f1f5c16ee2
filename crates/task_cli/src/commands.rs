use crate::cli::{Cli, Command, TaskCommand};
use crate::confirm::Confirm;
use crate::render;
use std::io::Write;
use std::path::PathBuf;
use task_core::config::{self, Config};
use task_core::{AppError, TaskStore, with_store};
use time::UtcOffset;
use tracing::debug;

/// Flag values merged with the loaded config file.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub file: Option<PathBuf>,
    pub priority: Option<String>,
    pub config: Config,
    pub offset: Option<UtcOffset>,
}

impl Settings {
    pub fn new(cli: &Cli, config: Config) -> Self {
        Self {
            file: cli.file.clone(),
            priority: cli.priority.clone(),
            config,
            offset: None,
        }
    }

    pub fn store_path(&self) -> Result<PathBuf, AppError> {
        config::resolve_store_path(self.file.as_deref(), &self.config)
    }

    fn display_offset(&self) -> UtcOffset {
        self.offset
            .unwrap_or_else(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
    }
}

/// Runs one command. Task commands load the store first and save it
/// afterwards, including when the command itself fails.
pub fn run_command<W: Write>(
    command: &Command,
    settings: &Settings,
    confirm: &mut dyn Confirm,
    out: &mut W,
) -> Result<(), AppError> {
    match command {
        Command::Version => write_line(out, &format!("task version: {}", version())),
        Command::Task(command) => {
            let path = settings.store_path()?;
            debug!(path = %path.display(), ?command, "running command");
            with_store(&path, |store| execute(command, settings, store, confirm, out))
        }
    }
}

pub fn execute<W: Write>(
    command: &TaskCommand,
    settings: &Settings,
    store: &mut TaskStore,
    confirm: &mut dyn Confirm,
    out: &mut W,
) -> Result<(), AppError> {
    match command {
        TaskCommand::Add { description } => {
            let priority =
                config::resolve_priority(settings.priority.as_deref(), &settings.config)?;
            let description = description.join(" ");
            let task = store.add(&description, priority)?;
            write_line(
                out,
                &format!(
                    "Added task {}: {} [{}]",
                    task.id, task.description, task.priority
                ),
            )
        }
        TaskCommand::List { all } => {
            let rendered =
                render::render_tasks(store.visible_tasks(*all), settings.display_offset());
            write_line(out, &rendered)
        }
        TaskCommand::Remove { id } => {
            let Some(task) = store.find_task(id) else {
                return Err(AppError::TaskNotFound(id.clone()));
            };
            if settings.config.confirm_remove {
                let prompt = format!(
                    "Are you sure you want to remove task {}: {}?",
                    task.id, task.description
                );
                if !confirm.confirm(&prompt)? {
                    return write_line(out, "Removal cancelled.");
                }
            }

            let removed = store.remove(id)?;
            write_line(
                out,
                &format!("Removed task {}: {}", removed.id, removed.description),
            )
        }
        TaskCommand::Complete { id } => {
            store.complete(id)?;
            write_line(out, &format!("Task {id} marked as completed."))
        }
        TaskCommand::Clean => {
            if !confirm.confirm("Are you sure you want to clean all tasks?")? {
                return write_line(out, "Cleanup cancelled.");
            }
            store.clean_up();
            write_line(out, "All tasks cleaned up.")
        }
    }
}

/// The version injected through `TASK_VERSION` at build time, else the
/// package version.
pub fn version() -> &'static str {
    match option_env!("TASK_VERSION") {
        Some(injected) if !injected.trim().is_empty() => injected,
        _ => env!("CARGO_PKG_VERSION"),
    }
}

fn write_line<W: Write>(out: &mut W, line: &str) -> Result<(), AppError> {
    writeln!(out, "{line}").map_err(|err| AppError::io(err.to_string()))
}
