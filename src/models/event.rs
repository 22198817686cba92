use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Raw token counters as written by Claude Code in `message.usage`.
#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EventUsage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub input_tokens: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub output_tokens: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cache_creation_input_tokens: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cache_read_input_tokens: u64,
}

impl EventUsage {
    /// All four counters are zero; such records carry no usage signal.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct EventMessage {
    /// Stable message id; empty when the record has none.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub usage: EventUsage,
}

/// One line of a transcript JSONL file. Unknown fields are ignored.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Event {
    #[serde(rename = "sessionId", default, deserialize_with = "null_as_default")]
    pub session_id: String,
    /// `None` when the record has no timestamp; such events count toward
    /// their session but never fall inside a time window or a day.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: EventMessage,
}
