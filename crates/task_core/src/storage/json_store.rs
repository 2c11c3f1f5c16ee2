use crate::error::AppError;
use crate::model::Task;
use crate::store::TaskStore;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Serialize, Deserialize)]
struct StoredTasks {
    tasks: Vec<Task>,
    #[serde(default)]
    file_path: String,
}

pub fn load_store(path: &Path) -> Result<TaskStore, AppError> {
    let content = match std::fs::read(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no task file yet, starting empty");
            return Ok(TaskStore::new(path));
        }
        Err(err) => return Err(AppError::io(format!("{}: {}", path.display(), err))),
    };

    let stored: StoredTasks = serde_json::from_slice(&content)
        .map_err(|err| AppError::decode(format!("{}: {}", path.display(), err)))?;
    debug!(path = %path.display(), tasks = stored.tasks.len(), "loaded task file");

    // The recorded path is informational; the store stays bound to `path`.
    Ok(TaskStore::from_parts(stored.tasks, path.to_path_buf()))
}

pub fn save_store(store: &TaskStore) -> Result<(), AppError> {
    let path = store.file_path();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        create_dir(parent).map_err(|err| {
            AppError::io(format!(
                "could not create directory {}: {}",
                parent.display(),
                err
            ))
        })?;
    }

    let stored = StoredTasks {
        tasks: store.tasks().to_vec(),
        file_path: path.display().to_string(),
    };
    let content = serde_json::to_string_pretty(&stored)
        .map_err(|err| AppError::encode(format!("could not encode tasks: {err}")))?;

    let staging = staging_path(path);
    std::fs::write(&staging, content).map_err(|err| {
        AppError::io(format!("could not write task file {}: {}", staging.display(), err))
    })?;
    if let Err(err) = std::fs::rename(&staging, path) {
        std::fs::remove_file(&staging).ok();
        return Err(AppError::io(format!(
            "could not write task file {}: {}",
            path.display(),
            err
        )));
    }
    debug!(path = %path.display(), tasks = stored.tasks.len(), "saved task file");

    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(unix)]
fn create_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    std::fs::DirBuilder::new()
        .recursive(true)
        .mode(0o755)
        .create(dir)
}

#[cfg(not(unix))]
fn create_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)
}
