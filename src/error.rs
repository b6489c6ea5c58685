use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Tab {0:?} is not available from this source")]
    TabNotFound(String),

    #[error("Failed to read dump file at {path}: {source}")]
    DumpReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse dump file at {path}: {source}")]
    DumpParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}
