#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Scratch home, config dir and working directory for one test.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create sandbox"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn store_path(&self) -> PathBuf {
        self.path().join("data").join("tasks.json")
    }

    pub fn command(&self) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_task"));
        command
            .current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            .env_remove("RUST_LOG");
        command
    }

    /// Runs `task --file <store> <args>`.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command()
            .arg("--file")
            .arg(self.store_path())
            .args(args)
            .output()
            .expect("failed to run task")
    }

    pub fn run_with_input(&self, args: &[&str], input: &str) -> Output {
        let mut child = self
            .command()
            .arg("--file")
            .arg(self.store_path())
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn task");

        child
            .stdin
            .as_mut()
            .expect("stdin")
            .write_all(input.as_bytes())
            .expect("failed to write to stdin");

        child.wait_with_output().expect("failed to wait for task")
    }

    pub fn stored(&self) -> serde_json::Value {
        let content = std::fs::read_to_string(self.store_path()).expect("read store");
        serde_json::from_str(&content).expect("store is json")
    }

    pub fn write_store(&self, tasks: serde_json::Value) {
        let path = self.store_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let content = serde_json::json!({
            "tasks": tasks,
            "file_path": path.display().to_string(),
        });
        std::fs::write(path, serde_json::to_string_pretty(&content).unwrap()).unwrap();
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Id printed by `add`: `Added task <id>: <description> [<priority>]`.
pub fn added_id(output: &Output) -> String {
    let text = stdout(output);
    let rest = text
        .strip_prefix("Added task ")
        .unwrap_or_else(|| panic!("unexpected add output: {text}"));
    rest.split(':').next().unwrap().to_string()
}
