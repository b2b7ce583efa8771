//! Common test utilities for onsave CLI tests.
//!
//! `TestEnv` is an isolated workspace plus an empty user config directory,
//! so neither the developer's config nor `ONSAVE_*` variables leak in.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Result of running the onsave binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

pub struct TestEnv {
    pub workspace: TempDir,
    pub config_home: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            workspace: tempfile::tempdir().unwrap(),
            config_home: tempfile::tempdir().unwrap(),
        }
    }

    /// Workspace with `.onsave.toml` set to `config`.
    pub fn with_config(config: &str) -> Self {
        let env = Self::new();
        env.write(".onsave.toml", config);
        env
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.workspace.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).unwrap()
    }

    /// Run `onsave --workspace <workspace> <args>`.
    pub fn run(&self, args: &[&str]) -> TestResult {
        let output = Command::new(env!("CARGO_BIN_EXE_onsave"))
            .current_dir(self.workspace.path())
            .arg("--workspace")
            .arg(self.workspace.path())
            .args(args)
            .env("XDG_CONFIG_HOME", self.config_home.path())
            .env_remove("ONSAVE_INCLUDE")
            .env_remove("ONSAVE_SRC_DIR")
            .env_remove("ONSAVE_OUT_DIR")
            .env_remove("ONSAVE_OUT_EXT")
            .env_remove("ONSAVE_EMIT_DECLARATION")
            .output()
            .unwrap();

        TestResult {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    pub fn path_arg(&self, relative: &str) -> String {
        path_str(&self.path(relative))
    }
}

pub fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Parse NDJSON stdout into values.
pub fn json_lines(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}
