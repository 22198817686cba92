//! # Cache Module
//!
//! Holds the parsed transcript corpus for the lifetime of one statusline
//! invocation. The corpus is loaded at most once, on first use, and every
//! later query (session, hour, day, week) reads the same snapshot.

use std::path::PathBuf;

use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use crate::error::TranscriptError;
use crate::models::Transcript;
use crate::transcript::{load_transcripts, transcripts_dir};

type LoadResult = Result<Vec<Transcript>, TranscriptError>;

/// Lazily loaded, immutable transcript snapshot.
///
/// `TranscriptStore` is `Sync`: threads that race on the first call block
/// until the single load finishes, then all observe its result. A failed load
/// is remembered as well and is not retried.
pub struct TranscriptStore {
    config_dir: Option<PathBuf>,
    loaded: OnceCell<LoadResult>,
}

impl TranscriptStore {
    /// Store reading from `<config_dir>/projects`, or `~/.claude/projects`.
    pub fn new(config_dir: Option<PathBuf>) -> Self {
        Self {
            config_dir,
            loaded: OnceCell::new(),
        }
    }

    /// Store over an already-parsed corpus; never touches the filesystem.
    pub fn from_transcripts(transcripts: Vec<Transcript>) -> Self {
        Self {
            config_dir: None,
            loaded: OnceCell::with_value(Ok(transcripts)),
        }
    }

    /// The loaded transcripts, loading them on the first call.
    pub fn transcripts(&self) -> Result<&[Transcript], &TranscriptError> {
        self.loaded
            .get_or_init(|| self.load())
            .as_ref()
            .map(Vec::as_slice)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }

    fn load(&self) -> LoadResult {
        let root = transcripts_dir(self.config_dir.as_deref())?;
        debug!(root = %root.display(), "loading transcripts");
        let result = load_transcripts(&root);
        if let Err(ref e) = result {
            warn!(error = %e, "transcript load failed");
        }
        result
    }
}
