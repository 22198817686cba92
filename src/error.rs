use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading the transcript corpus. Aggregation itself never fails.
#[derive(Debug, Error)]
pub enum TranscriptError {
    /// The transcript directory could not be resolved (no home directory).
    #[error("transcript directory unavailable: {0}")]
    Configuration(String),
    #[error("read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("walk transcript directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl TranscriptError {
    /// Traversal and open failures are both filesystem errors.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Walk(_))
    }
}

pub type Result<T> = std::result::Result<T, TranscriptError>;
