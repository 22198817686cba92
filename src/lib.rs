//! # Claude Code Statusline
//!
//! Renders a status line for Claude Code from the JSON hook it pipes on stdin,
//! plus token usage and cost aggregated from the local transcript logs.
//!
//! ## Overview
//!
//! The usage pipeline is:
//! - [`transcript`]: load `~/.claude/projects/**/*.jsonl` into [`models::Transcript`]s
//! - [`dedup`]: drop repeated message ids within one transcript
//! - [`usage`]: sum per-model usage for a session, a time window, or per day
//! - [`pricing`] and [`display`]: turn the totals into tokens and dollars
//!
//! [`cache::TranscriptStore`] loads the transcripts once and shares the
//! snapshot between queries.
//!
//! ## Features
//!
//! - `colors` (default): Enables terminal color output via owo-colors

/// Load-once transcript snapshot
pub mod cache;

/// Command-line argument parsing and configuration
pub mod cli;

/// Message-id deduplication
pub mod dedup;

/// Display formatting for text and JSON output
pub mod display;

/// Transcript loading errors
pub mod error;

/// stderr logging setup
pub mod logging;

/// Data models for hooks and transcript events
pub mod models;

/// Model-specific pricing calculations
pub mod pricing;

/// Transcript discovery and parsing
pub mod transcript;

/// Session, window and per-day usage aggregation
pub mod usage;

/// Utility functions for paths and formatting
pub mod utils;

/// Hour, day and week windows
pub mod window;
