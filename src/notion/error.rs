//! Errors raised while talking to the Notion API.

use thiserror::Error;

/// Errors from the remote collaborator.
#[derive(Debug, Error)]
pub enum NotionError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Notion API returned {status} for {url}: {code}: {message}")]
    Api {
        url: String,
        status: u16,
        code: String,
        message: String,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid client configuration: {0}")]
    Config(String),
}
