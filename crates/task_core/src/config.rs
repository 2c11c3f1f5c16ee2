use crate::error::AppError;
use crate::model::Priority;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory name used under the platform config dir and, dot-prefixed,
/// under the home directory.
pub const APP_DIR_NAME: &str = "task";
const CONFIG_FILE_NAME: &str = "task.json";
const STORE_FILE_NAME: &str = "tasks.json";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Storage file location.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Priority used by `add` when no `--priority` is given.
    #[serde(default)]
    pub priority: Option<String>,
    /// Ask before `remove` deletes a task.
    #[serde(default)]
    pub confirm_remove: bool,
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub path: Option<PathBuf>,
    pub error: Option<AppError>,
}

/// Candidate config files, most specific first: the current directory,
/// then `<config dir>/task/`.
pub fn config_search_paths(current_dir: Option<&Path>, config_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = current_dir {
        paths.push(dir.join(CONFIG_FILE_NAME));
    }
    if let Some(dir) = config_dir {
        paths.push(dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME));
    }
    paths
}

pub fn load_config_with_fallback() -> ConfigLoad {
    let current_dir = std::env::current_dir().ok();
    let config_dir = dirs::config_dir();
    let paths = config_search_paths(current_dir.as_deref(), config_dir.as_deref());
    load_config_with_fallback_from(&paths)
}

/// Reads the first config file that exists. A missing file is not an
/// error; an unreadable one falls back to defaults and reports the error.
pub fn load_config_with_fallback_from(paths: &[PathBuf]) -> ConfigLoad {
    let Some(path) = paths.iter().find(|path| path.is_file()) else {
        return ConfigLoad {
            config: Config::default(),
            path: None,
            error: None,
        };
    };

    match load_config_from_path(path) {
        Ok(config) => {
            debug!(path = %path.display(), "loaded config");
            ConfigLoad {
                config,
                path: Some(path.clone()),
                error: None,
            }
        }
        Err(err) => ConfigLoad {
            config: Config::default(),
            path: Some(path.clone()),
            error: Some(err),
        },
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    serde_json::from_str(&content)
        .map_err(|err| AppError::decode(format!("invalid JSON in {}: {}", path.display(), err)))
}

/// `<config dir>/task/tasks.json`, else `<home>/.task/tasks.json`.
pub fn default_store_path(config_dir: Option<&Path>, home: Option<&Path>) -> Option<PathBuf> {
    if let Some(dir) = config_dir {
        return Some(dir.join(APP_DIR_NAME).join(STORE_FILE_NAME));
    }
    home.map(|home| home.join(format!(".{APP_DIR_NAME}")).join(STORE_FILE_NAME))
}

pub fn resolve_store_path(flag: Option<&Path>, config: &Config) -> Result<PathBuf, AppError> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = config.file.as_ref() {
        return Ok(path.clone());
    }

    let config_dir = dirs::config_dir();
    let home = dirs::home_dir();
    default_store_path(config_dir.as_deref(), home.as_deref()).ok_or_else(|| {
        AppError::invalid_input("could not determine a storage location, pass --file")
    })
}

pub fn resolve_priority(flag: Option<&str>, config: &Config) -> Result<Priority, AppError> {
    flag.or(config.priority.as_deref())
        .map(str::parse::<Priority>)
        .unwrap_or(Ok(Priority::Medium))
}

#[cfg(test)]
mod tests {
    use super::{
        Config, config_search_paths, default_store_path, load_config_with_fallback_from,
        resolve_priority, resolve_store_path,
    };
    use crate::model::Priority;
    use std::fs;
    use std::path::{Path, PathBuf};

    #[test]
    fn search_paths_prefer_current_directory() {
        let paths = config_search_paths(Some(Path::new("/work")), Some(Path::new("/cfg")));

        assert_eq!(
            paths,
            vec![
                PathBuf::from("/work/task.json"),
                PathBuf::from("/cfg/task/task.json"),
            ]
        );
    }

    #[test]
    fn load_config_missing_returns_defaults_without_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_with_fallback_from(&[dir.path().join("task.json")]);

        assert_eq!(result.config, Config::default());
        assert!(result.path.is_none());
        assert!(result.error.is_none());
    }

    #[test]
    fn load_config_invalid_returns_defaults_and_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("task.json");
        fs::write(&path, "{ invalid json ").unwrap();

        let result = load_config_with_fallback_from(&[path.clone()]);

        assert_eq!(result.config, Config::default());
        assert_eq!(result.path, Some(path));
        assert_eq!(result.error.map(|err| err.code()), Some("decode_error"));
    }

    #[test]
    fn load_config_uses_first_existing_file() {
        let local = tempfile::tempdir().unwrap();
        let global = tempfile::tempdir().unwrap();
        let global_path = global.path().join("task.json");
        fs::write(
            &global_path,
            serde_json::json!({ "file": "/data/tasks.json", "priority": "HIGH" }).to_string(),
        )
        .unwrap();

        let result =
            load_config_with_fallback_from(&[local.path().join("task.json"), global_path.clone()]);

        assert_eq!(result.path, Some(global_path));
        assert_eq!(result.config.file, Some(PathBuf::from("/data/tasks.json")));
        assert_eq!(result.config.priority.as_deref(), Some("HIGH"));
        assert!(!result.config.confirm_remove);
    }

    #[test]
    fn default_store_path_prefers_config_dir() {
        assert_eq!(
            default_store_path(Some(Path::new("/cfg")), Some(Path::new("/home/me"))),
            Some(PathBuf::from("/cfg/task/tasks.json"))
        );
        assert_eq!(
            default_store_path(None, Some(Path::new("/home/me"))),
            Some(PathBuf::from("/home/me/.task/tasks.json"))
        );
        assert_eq!(default_store_path(None, None), None);
    }

    #[test]
    fn flag_overrides_config_file() {
        let config = Config {
            file: Some(PathBuf::from("/from/config.json")),
            ..Config::default()
        };

        let flagged = resolve_store_path(Some(Path::new("/from/flag.json")), &config).unwrap();
        let configured = resolve_store_path(None, &config).unwrap();

        assert_eq!(flagged, PathBuf::from("/from/flag.json"));
        assert_eq!(configured, PathBuf::from("/from/config.json"));
    }

    #[test]
    fn resolve_priority_falls_back_to_medium() {
        let mut config = Config::default();
        assert_eq!(resolve_priority(None, &config).unwrap(), Priority::Medium);

        config.priority = Some("low".into());
        assert_eq!(resolve_priority(None, &config).unwrap(), Priority::Low);
        assert_eq!(resolve_priority(Some("High"), &config).unwrap(), Priority::High);

        let err = resolve_priority(Some("urgent"), &config).unwrap_err();
        assert_eq!(err.code(), "invalid_priority");
    }
}
