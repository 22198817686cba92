//! Per-transcript event deduplication.
//!
//! Claude Code may flush the same assistant message more than once while it
//! streams. Only the first record for a given message id counts; records
//! without an id are always distinct.

use std::collections::HashSet;

use crate::models::Event;

/// Lazily yield `events` with repeated non-empty message ids removed.
///
/// The scope is the given slice, so callers dedup each transcript on its own.
pub fn deduplicate(events: &[Event]) -> impl Iterator<Item = &Event> {
    let mut seen: HashSet<&str> = HashSet::new();
    events.iter().filter(move |&e| {
        let id = e.message.id.as_str();
        id.is_empty() || seen.insert(id)
    })
}
