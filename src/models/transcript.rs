use std::path::PathBuf;

use crate::models::Event;

/// Usage-bearing events parsed from one JSONL file, in file order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transcript {
    pub file: PathBuf,
    pub events: Vec<Event>,
}
