use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, warn};

use cc_statusline::cache::TranscriptStore;
use cc_statusline::cli::Args;
use cc_statusline::display::{TextStyle, collect_usage, print_json_output, print_text_output};
use cc_statusline::logging;
use cc_statusline::models::HookJson;
use cc_statusline::utils::read_stdin;

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.debug);

    let style = TextStyle::from_env();
    let stdin = read_stdin()?;
    if stdin.trim_ascii().is_empty() {
        println!("CC {}", style.dim("[waiting for valid input]"));
        return Ok(());
    }
    let hook: HookJson = serde_json::from_slice(&stdin).context("parse hook json")?;
    debug!(session_id = %hook.session_id, transcript = ?hook.transcript_path, "hook received");

    let store = TranscriptStore::new(args.claude_config_dir.clone());
    let usage = if args.no_usage {
        None
    } else {
        // A load failure degrades the usage row; the header still prints.
        Some(match collect_usage(&store, &hook.session_id, Utc::now()) {
            Ok(summaries) => Some(summaries),
            Err(e) => {
                warn!(error = %e, "usage unavailable");
                None
            }
        })
    };

    if args.json {
        print_json_output(&hook, usage.as_ref().and_then(|u| u.as_deref()))?;
    } else {
        print_text_output(&hook, usage.as_ref().map(|u| u.as_deref()), style);
    }
    Ok(())
}
