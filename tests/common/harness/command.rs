//! Fluent wrapper around assert_cmd::Command.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};

/// Variables scrubbed from the inherited environment before every run.
const SCRUBBED_VARS: &[&str] = &[
    "NOTION_TOKEN",
    "NOTION_DATABASE_ID",
    "NOTION_API_URL",
    "NOTION_VERSION",
    "RUST_LOG",
];

/// Builder for running the `notion-sync` binary.
pub struct SyncCommand {
    cwd: PathBuf,
    config_home: PathBuf,
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl SyncCommand {
    pub fn new(cwd: &Path, config_home: &Path) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            config_home: config_home.to_path_buf(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    /// Sets an environment variable for the run.
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Adds `--dry-run`.
    pub fn dry_run(self) -> Self {
        self.args(["--dry-run"])
    }

    /// Adds `--output-dir <dir>`.
    pub fn output_dir(self, dir: &str) -> Self {
        self.args(["--output-dir", dir])
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("notion-sync").expect("Failed to find notion-sync binary");
        cmd.current_dir(&self.cwd)
            .env("HOME", &self.cwd)
            .env("XDG_CONFIG_HOME", &self.config_home);
        for key in SCRUBBED_VARS {
            cmd.env_remove(key);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd.args(&self.args);
        cmd.assert()
    }
}
