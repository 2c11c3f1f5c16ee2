use crate::error::AppError;
use crate::id::generate_id_at;
use crate::model::{Priority, Task};
use crate::storage::json_store;
use std::path::{Path, PathBuf};
use time::{Duration, OffsetDateTime};
use tracing::{debug, error};

const MAX_ID_ATTEMPTS: usize = 16;

/// The ordered task list together with the file it was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
    file_path: PathBuf,
}

impl TaskStore {
    pub fn new<P: Into<PathBuf>>(file_path: P) -> Self {
        Self::from_parts(Vec::new(), file_path.into())
    }

    pub(crate) fn from_parts(tasks: Vec<Task>, file_path: PathBuf) -> Self {
        Self { tasks, file_path }
    }

    /// Reads the store at `path`. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        json_store::load_store(path)
    }

    pub fn save(&self) -> Result<(), AppError> {
        json_store::save_store(self)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn add(&mut self, description: &str, priority: Priority) -> Result<Task, AppError> {
        self.add_at(description, priority, OffsetDateTime::now_utc())
    }

    fn add_at(
        &mut self,
        description: &str,
        priority: Priority,
        now: OffsetDateTime,
    ) -> Result<Task, AppError> {
        if description.trim().is_empty() {
            return Err(AppError::invalid_input("description is required"));
        }

        if self.tasks.iter().any(|task| task.description == description) {
            return Err(AppError::DuplicateTask(description.to_string()));
        }

        let id = self.unused_id(description, now)?;
        let task = Task::new(id, description.to_string(), priority, now);
        debug!(id = %task.id, priority = %task.priority, "task added");
        self.tasks.push(task.clone());

        Ok(task)
    }

    fn unused_id(&self, description: &str, now: OffsetDateTime) -> Result<String, AppError> {
        let mut at = now;
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = generate_id_at(description, at);
            if self.find_task(&id).is_none() {
                return Ok(id);
            }
            debug!(%id, "generated id already in use, retrying");
            at += Duration::nanoseconds(1);
        }

        Err(AppError::invalid_input(format!(
            "could not allocate a unique id for: {description}"
        )))
    }

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    fn find_task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }

    /// Marks the task completed. An already completed task is re-stamped
    /// with the current time.
    pub fn complete(&mut self, id: &str) -> Result<Task, AppError> {
        self.complete_at(id, OffsetDateTime::now_utc())
    }

    fn complete_at(&mut self, id: &str, now: OffsetDateTime) -> Result<Task, AppError> {
        let task = self
            .find_task_mut(id)
            .ok_or_else(|| AppError::TaskNotFound(id.to_string()))?;

        if task.completed {
            debug!(%id, "re-stamping completed task");
        }
        task.mark_completed(now);

        Ok(task.clone())
    }

    pub fn remove(&mut self, id: &str) -> Result<Task, AppError> {
        let index = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| AppError::TaskNotFound(id.to_string()))?;

        let removed = self.tasks.remove(index);
        debug!(%id, remaining = self.tasks.len(), "task removed");
        Ok(removed)
    }

    pub fn clean_up(&mut self) {
        debug!(removed = self.tasks.len(), "cleaning up all tasks");
        self.tasks = Vec::new();
    }

    /// Tasks shown by `list`: pending ones only, unless `show_all`.
    pub fn visible_tasks(&self, show_all: bool) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(move |task| show_all || !task.completed)
    }
}

/// Loads the store at `path`, runs `command` against it and then saves it,
/// whether or not the command succeeded. A failed save fails an otherwise
/// successful command; when both fail the command's error wins.
pub fn with_store<T, F>(path: &Path, command: F) -> Result<T, AppError>
where
    F: FnOnce(&mut TaskStore) -> Result<T, AppError>,
{
    let mut store = TaskStore::load(path)?;
    let outcome = command(&mut store);
    let saved = store.save();

    match (outcome, saved) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(err)) => Err(err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(save_err)) => {
            error!(path = %path.display(), error = %save_err, "could not save task store");
            Err(err)
        }
    }
}
