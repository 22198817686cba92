//! # Transcript Loader
//!
//! Reads Claude Code's JSONL transcripts (`~/.claude/projects/**/*.jsonl`) into
//! memory. Every file becomes one [`Transcript`] holding the events that carry
//! token usage, in the order they were appended.
//!
//! Loading is fail-fast: a traversal error, an unreadable file or a corrupt
//! record in the middle of a file aborts the whole load. The last record of a
//! file is allowed to be incomplete, since Claude Code may still be appending.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, TranscriptError};
use crate::models::{Event, Transcript};

const TRANSCRIPT_EXTENSION: &str = "jsonl";

/// Resolve the directory holding transcripts.
///
/// `config_dir` replaces `~/.claude` (the `projects` subdirectory is appended
/// either way).
pub fn transcripts_dir(config_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = config_dir {
        return Ok(dir.join("projects"));
    }
    let base = directories::BaseDirs::new()
        .ok_or_else(|| TranscriptError::Configuration("home directory not found".into()))?;
    Ok(base.home_dir().join(".claude").join("projects"))
}

/// Load every transcript under `root`, recursively.
///
/// Only files with a `.jsonl` extension are read. Files that contain no
/// usage-bearing events are left out of the result.
pub fn load_transcripts(root: &Path) -> Result<Vec<Transcript>> {
    let mut transcripts = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        let path = entry.path();
        if path.extension() != Some(OsStr::new(TRANSCRIPT_EXTENSION)) {
            continue;
        }
        let bytes = fs::read(path).map_err(|source| TranscriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let events = parse_events(&bytes).map_err(|source| TranscriptError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(file = %path.display(), events = events.len(), "parsed transcript");
        if !events.is_empty() {
            transcripts.push(Transcript {
                file: path.to_path_buf(),
                events,
            });
        }
    }
    debug!(root = %root.display(), files = transcripts.len(), "transcripts loaded");
    Ok(transcripts)
}

/// Decode a stream of JSON records, dropping the ones without usage.
///
/// Decoding stops without error at end of input, on trailing whitespace, or
/// when the final record is truncated or malformed. A bad record followed by
/// further content is an error, as is a record whose fields have the wrong type.
pub fn parse_events(bytes: &[u8]) -> std::result::Result<Vec<Event>, serde_json::Error> {
    let mut stream = serde_json::Deserializer::from_slice(bytes).into_iter::<Event>();
    let mut events = Vec::new();
    while let Some(next) = stream.next() {
        match next {
            Ok(event) => {
                if !event.message.usage.is_empty() {
                    events.push(event);
                }
            }
            Err(err) if err.is_eof() => break,
            Err(err) if err.is_syntax() && is_final_record(&bytes[stream.byte_offset()..]) => {
                debug!(error = %err, "ignoring malformed final record");
                break;
            }
            Err(err) => return Err(err),
        }
    }
    Ok(events)
}

/// True when nothing but whitespace follows the first line of `rest`.
fn is_final_record(rest: &[u8]) -> bool {
    let rest = rest.trim_ascii_start();
    match rest.iter().position(|&b| b == b'\n') {
        Some(newline) => rest[newline..].trim_ascii().is_empty(),
        None => true,
    }
}
