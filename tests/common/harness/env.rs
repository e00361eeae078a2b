//! Isolated test environment with temp directory.

use super::SyncCommand;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// API URL nothing listens on, so every request fails fast.
pub const UNREACHABLE_API_URL: &str = "http://127.0.0.1:9/v1";

/// Isolated test environment.
///
/// The temp directory is used as the working directory of the binary and
/// as its home and config directory, so a developer's own config file never
/// leaks into a test run.
pub struct TestEnv {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Working directory of the binary.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory used as `$XDG_CONFIG_HOME`.
    pub fn config_home(&self) -> PathBuf {
        self.root.join(".config")
    }

    /// Default output directory, relative to the working directory.
    pub fn posts_dir(&self) -> PathBuf {
        self.root.join("content").join("posts")
    }

    /// Writes `config.toml` where the binary looks for it.
    pub fn write_config(&self, contents: &str) -> PathBuf {
        let dir = self.config_home().join("notion-sync");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        let path = dir.join("config.toml");
        std::fs::write(&path, contents).expect("Failed to write config file");
        path
    }

    /// Lists the `.md` files in a directory, sorted.
    pub fn markdown_files(&self, dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .expect("Failed to read directory")
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().to_string())
            .filter(|name| name.ends_with(".md"))
            .collect();
        names.sort();
        names
    }

    /// Creates a command with no Notion variables set.
    pub fn cmd(&self) -> SyncCommand {
        SyncCommand::new(&self.root, &self.config_home())
    }

    /// Creates a command with credentials set and the API pointed nowhere.
    pub fn cmd_unreachable(&self) -> SyncCommand {
        self.cmd_with_api(UNREACHABLE_API_URL)
    }

    /// Creates a command with credentials set and the API at `api_url`.
    pub fn cmd_with_api(&self, api_url: &str) -> SyncCommand {
        self.cmd()
            .env("NOTION_TOKEN", "secret-token")
            .env("NOTION_DATABASE_ID", "db-test")
            .env("NOTION_API_URL", api_url)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
