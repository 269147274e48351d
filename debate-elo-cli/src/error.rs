use std::{io, path::PathBuf};

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to set up http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("bad response from {url}: status {status}, content type {content_type:?}")]
    BadResponse {
        url: String,
        status: u16,
        content_type: Option<String>,
    },

    #[error("invalid selector {css:?}: {message}")]
    Selector { css: &'static str, message: String },

    #[error("{what} not found at {url}")]
    MissingElement { url: String, what: &'static str },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
