//! Error type shared by the library.
//!
//! Presentation paths never fail fatally: optional page elements are plain
//! `Option<NodeId>`s and are skipped. `FolioError` covers the few places
//! where something outside the page can go wrong (files, config, network).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FolioError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unknown project id `{0}`")]
    UnknownProject(String),
}

pub type Result<T> = std::result::Result<T, FolioError>;
