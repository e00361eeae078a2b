//! Configuration from the environment and an optional config file.

use serde::Deserialize;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Access token environment variable.
pub const TOKEN_VAR: &str = "NOTION_TOKEN";

/// Target database environment variable.
pub const DATABASE_ID_VAR: &str = "NOTION_DATABASE_ID";

/// Optional API base URL override.
pub const API_URL_VAR: &str = "NOTION_API_URL";

/// Optional `Notion-Version` header override.
pub const NOTION_VERSION_VAR: &str = "NOTION_VERSION";

pub const DEFAULT_OUTPUT_DIR: &str = "content/posts";
pub const DEFAULT_API_URL: &str = "https://api.notion.com/v1";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Errors while building the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("please set the {} and {} environment variables (missing: {})", TOKEN_VAR, DATABASE_ID_VAR, .0.join(", "))]
    MissingEnv(Vec<&'static str>),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Optional settings read from `config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    /// Directory posts are written to
    pub output_dir: Option<PathBuf>,

    /// Notion API base URL
    pub api_url: Option<String>,

    /// Value of the `Notion-Version` header
    pub notion_version: Option<String>,
}

impl FileConfig {
    /// Load the config file from its default location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load a config file from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.into(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.into(),
            source,
        })
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/notion-sync/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notion-sync")
            .join("config.toml")
    }
}

/// Settings for one sync run, built once at startup.
#[derive(Clone)]
pub struct Config {
    pub token: String,
    pub database_id: String,
    pub output_dir: PathBuf,
    pub api_url: String,
    pub notion_version: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("database_id", &self.database_id)
            .field("output_dir", &self.output_dir)
            .field("api_url", &self.api_url)
            .field("notion_version", &self.notion_version)
            .finish()
    }
}

impl Config {
    /// Build the configuration from the process environment and config file.
    pub fn load(cli_output_dir: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_sources(|key| std::env::var(key).ok(), FileConfig::load, cli_output_dir)
    }

    /// Build the configuration from explicit sources.
    ///
    /// The required variables are checked before the config file is read.
    /// Empty values count as missing.
    ///
    /// Precedence for the output directory:
    /// 1. CLI `--output-dir` argument
    /// 2. Config file `output_dir` setting
    /// 3. `content/posts`
    ///
    /// Precedence for the API URL and version: environment, config file, default.
    pub fn from_sources<E, F>(
        env: E,
        load_file: F,
        cli_output_dir: Option<&Path>,
    ) -> Result<Self, ConfigError>
    where
        E: Fn(&str) -> Option<String>,
        F: FnOnce() -> Result<FileConfig, ConfigError>,
    {
        let get = |key: &str| env(key).filter(|value| !value.is_empty());

        let token = get(TOKEN_VAR);
        let database_id = get(DATABASE_ID_VAR);
        let (token, database_id) = match (token, database_id) {
            (Some(token), Some(database_id)) => (token, database_id),
            (token, database_id) => {
                let mut missing = Vec::new();
                if token.is_none() {
                    missing.push(TOKEN_VAR);
                }
                if database_id.is_none() {
                    missing.push(DATABASE_ID_VAR);
                }
                return Err(ConfigError::MissingEnv(missing));
            }
        };

        let file = load_file()?;

        let output_dir = cli_output_dir
            .map(Path::to_path_buf)
            .or(file.output_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let api_url = get(API_URL_VAR)
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let notion_version = get(NOTION_VERSION_VAR)
            .or(file.notion_version)
            .unwrap_or_else(|| DEFAULT_NOTION_VERSION.to_string());

        Ok(Self {
            token,
            database_id,
            output_dir,
            api_url,
            notion_version,
        })
    }
}
