//! # Usage Module
//!
//! Folds deduplicated transcript events into per-model token totals.
//!
//! ## Key Functions
//!
//! - `session_usage`: totals for one session id
//! - `date_usage`: totals for events strictly inside a time window
//! - `usage_by_date`: totals per (UTC day, model) across everything loaded
//!
//! Each transcript is deduplicated on its own before folding. Results are
//! plain `HashMap`s with no iteration order; sort them if order matters.

use std::collections::{BTreeSet, HashMap};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::dedup::deduplicate;
use crate::models::{Event, EventUsage, Transcript};
use crate::window::{Period, UsageWindow, truncate_to_day};

/// Additive token counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cache_write_tokens: u64,
    pub cache_read_tokens: u64,
}

impl Usage {
    pub fn total(&self) -> u64 {
        self.input_tokens
            .saturating_add(self.output_tokens)
            .saturating_add(self.cache_write_tokens)
            .saturating_add(self.cache_read_tokens)
    }

    pub fn add_event(&mut self, e: &EventUsage) {
        *self += Usage::from(e);
    }
}

impl From<&EventUsage> for Usage {
    fn from(e: &EventUsage) -> Self {
        Usage {
            input_tokens: e.input_tokens,
            output_tokens: e.output_tokens,
            cache_write_tokens: e.cache_creation_input_tokens,
            cache_read_tokens: e.cache_read_input_tokens,
        }
    }
}

impl Add for Usage {
    type Output = Usage;

    fn add(mut self, rhs: Usage) -> Usage {
        self += rhs;
        self
    }
}

impl AddAssign for Usage {
    // Counters saturate instead of wrapping on absurd inputs.
    fn add_assign(&mut self, rhs: Usage) {
        self.input_tokens = self.input_tokens.saturating_add(rhs.input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(rhs.output_tokens);
        self.cache_write_tokens = self.cache_write_tokens.saturating_add(rhs.cache_write_tokens);
        self.cache_read_tokens = self.cache_read_tokens.saturating_add(rhs.cache_read_tokens);
    }
}

impl Sum for Usage {
    fn sum<I: Iterator<Item = Usage>>(iter: I) -> Usage {
        iter.fold(Usage::default(), Add::add)
    }
}

/// Key for the per-day breakdown.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayModel {
    /// 00:00 UTC of the event's day
    pub day: DateTime<Utc>,
    pub model: String,
}

/// Dedup every transcript, keep events matching `keep`, and sum usage by model.
fn fold_by_model<F>(transcripts: &[Transcript], keep: F) -> HashMap<String, Usage>
where
    F: Fn(&Event) -> bool,
{
    let mut usages: HashMap<String, Usage> = HashMap::new();
    for t in transcripts {
        for e in deduplicate(&t.events).filter(|e| keep(e)) {
            usages
                .entry(e.message.model.clone())
                .or_default()
                .add_event(&e.message.usage);
        }
    }
    usages
}

/// Usage per model for one session. Unknown sessions give an empty map.
pub fn session_usage(transcripts: &[Transcript], session_id: &str) -> HashMap<String, Usage> {
    let usages = fold_by_model(transcripts, |e| e.session_id == session_id);
    debug!(session_id, models = usages.len(), "session usage");
    usages
}

/// Usage per model for events with `from < timestamp < to`.
///
/// Both boundaries are excluded (see [`UsageWindow::contains`]). Events
/// without a timestamp are never in a window.
pub fn date_usage(
    transcripts: &[Transcript],
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> HashMap<String, Usage> {
    let window = UsageWindow::new(from, to);
    let usages = fold_by_model(transcripts, |e| {
        e.timestamp.is_some_and(|ts| window.contains(ts))
    });
    debug!(%from, %to, models = usages.len(), "window usage");
    usages
}

/// Usage per (UTC day, model) over every loaded event that has a timestamp.
pub fn usage_by_date(transcripts: &[Transcript]) -> HashMap<DayModel, Usage> {
    let mut usages: HashMap<DayModel, Usage> = HashMap::new();
    for t in transcripts {
        for e in deduplicate(&t.events) {
            let Some(ts) = e.timestamp else { continue };
            let key = DayModel {
                day: truncate_to_day(ts),
                model: e.message.model.clone(),
            };
            usages.entry(key).or_default().add_event(&e.message.usage);
        }
    }
    usages
}

/// Distinct non-empty session ids present in the transcripts, sorted.
pub fn sessions(transcripts: &[Transcript]) -> Vec<String> {
    transcripts
        .iter()
        .flat_map(|t| &t.events)
        .filter(|e| !e.session_id.is_empty())
        .map(|e| e.session_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Run the query behind `period` as of `now`.
pub fn period_usage(
    transcripts: &[Transcript],
    period: Period,
    session_id: &str,
    now: DateTime<Utc>,
) -> HashMap<String, Usage> {
    match period.window(now) {
        Some(w) => date_usage(transcripts, w.from, w.to),
        None => session_usage(transcripts, session_id),
    }
}
