use std::collections::{BTreeMap, HashMap};
use std::env;
use std::thread;

use chrono::{DateTime, Utc};
#[cfg(feature = "colors")]
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::debug;

// Provide a no-op color shim when "colors" feature is disabled
#[cfg(not(feature = "colors"))]
pub mod color_shim {
    pub trait ColorizeShim {
        fn as_str(&self) -> &str;

        fn bold(&self) -> String {
            self.as_str().to_string()
        }
        fn dimmed(&self) -> String {
            self.as_str().to_string()
        }
        fn italic(&self) -> String {
            self.as_str().to_string()
        }
        fn green(&self) -> String {
            self.as_str().to_string()
        }
        fn truecolor(&self, _r: u8, _g: u8, _b: u8) -> String {
            self.as_str().to_string()
        }
    }

    impl ColorizeShim for &str {
        fn as_str(&self) -> &str {
            self
        }
    }
}

#[cfg(not(feature = "colors"))]
use color_shim::ColorizeShim as OwoColorize;

use crate::cache::TranscriptStore;
use crate::error::TranscriptError;
use crate::models::HookJson;
use crate::pricing::pricing_for_model;
use crate::usage::{Usage, period_usage};
use crate::utils::{format_tokens, limit, project_relative_dir};
use crate::window::Period;

const DIR_WIDTH: usize = 20;

/// ANSI styling, or plain text when colors are off (`NO_COLOR`, or built
/// without the `colors` feature).
#[derive(Clone, Copy, Debug)]
pub struct TextStyle {
    color: bool,
}

impl TextStyle {
    pub fn from_env() -> Self {
        Self {
            color: cfg!(feature = "colors") && env::var_os("NO_COLOR").is_none(),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    fn paint(&self, s: &str, f: impl FnOnce(&str) -> String) -> String {
        if self.color { f(s) } else { s.to_owned() }
    }

    pub fn bold(&self, s: &str) -> String {
        self.paint(s, |s| s.bold().to_string())
    }

    pub fn dim(&self, s: &str) -> String {
        self.paint(s, |s| s.dimmed().to_string())
    }

    pub fn italic(&self, s: &str) -> String {
        self.paint(s, |s| s.italic().to_string())
    }

    pub fn green(&self, s: &str) -> String {
        self.paint(s, |s| s.green().to_string())
    }

    pub fn added(&self, s: &str) -> String {
        self.paint(s, |s| s.truecolor(127, 255, 127).to_string())
    }

    pub fn removed(&self, s: &str) -> String {
        self.paint(s, |s| s.truecolor(255, 127, 127).to_string())
    }

    fn row(&self, prefix: &str, parts: &[String]) -> Option<String> {
        let parts: Vec<&str> = parts
            .iter()
            .map(String::as_str)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            return None;
        }
        Some(format!("{} {}", prefix, parts.join(&self.dim(" / "))))
    }
}

/// Combined tokens and estimated cost for one usage query.
#[derive(Clone, Debug, Serialize)]
pub struct UsageSummary {
    pub period: Period,
    pub tokens: u64,
    pub cost_usd: f64,
    pub models: BTreeMap<String, Usage>,
    /// Models with usage but no known price; their tokens count, their cost doesn't.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unpriced: Vec<String>,
}

pub fn summarize_usage(period: Period, usage: &HashMap<String, Usage>) -> UsageSummary {
    let mut summary = UsageSummary {
        period,
        tokens: 0,
        cost_usd: 0.0,
        models: BTreeMap::new(),
        unpriced: Vec::new(),
    };
    for (model, u) in usage {
        summary.tokens = summary.tokens.saturating_add(u.total());
        match pricing_for_model(model) {
            Some(p) => summary.cost_usd += p.cost(u),
            None => summary.unpriced.push(model.clone()),
        }
        summary.models.insert(model.clone(), *u);
    }
    summary.unpriced.sort();
    summary
}

/// `day 12.3Kt $1.4`
pub fn format_usage(summary: &UsageSummary, style: TextStyle) -> String {
    format!(
        "{} {}{}",
        summary.period.label(),
        format_tokens(summary.tokens),
        style.green(&format!(" ${:.1}", summary.cost_usd))
    )
}

/// Answer all four usage queries against one snapshot.
///
/// The queries run on separate threads; the first to reach the store loads
/// the transcripts and the others wait for that load.
pub fn collect_usage<'a>(
    store: &'a TranscriptStore,
    session_id: &str,
    now: DateTime<Utc>,
) -> Result<Vec<UsageSummary>, &'a TranscriptError> {
    thread::scope(|s| {
        let handles: Vec<_> = Period::ALL
            .into_iter()
            .map(|period| {
                s.spawn(move || -> Result<UsageSummary, &'a TranscriptError> {
                    let transcripts = store.transcripts()?;
                    let usage = period_usage(transcripts, period, session_id, now);
                    for (model, u) in &usage {
                        debug!(
                            period = period.label(),
                            model = model.as_str(),
                            tokens = u.total(),
                            ?u,
                            "usage"
                        );
                    }
                    Ok(summarize_usage(period, &usage))
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    })
}

/// `CC v1.0.80 / Opus 4.1 / default / repo/src / +12L -3L 4.2m $0.8 / 200K+`
pub fn header_line(hook: &HookJson, style: TextStyle) -> String {
    let mut parts = Vec::new();
    if let Some(ref v) = hook.version {
        parts.push(style.dim(&format!("v{v}")));
    }
    parts.push(style.bold(&hook.model.display_name));
    if let Some(ref os) = hook.output_style {
        parts.push(style.dim(&os.name));
    }
    let dir = project_relative_dir(
        &hook.workspace.current_dir,
        hook.workspace.project_dir.as_deref(),
    );
    parts.push(style.italic(&limit(&dir, DIR_WIDTH)));
    if let Some(ref c) = hook.cost {
        let minutes = c.total_api_duration_ms.unwrap_or(0) as f64 / 60_000.0;
        parts.push(format!(
            "{} {} {:.1}m {}",
            style.added(&format!("+{}L", c.total_lines_added.unwrap_or(0))),
            style.removed(&format!("-{}L", c.total_lines_removed.unwrap_or(0))),
            minutes,
            style.added(&format!("${:.1}", c.total_cost_usd.unwrap_or(0.0))),
        ));
    }
    if hook.exceeds_200k_tokens {
        parts.push(style.bold("200K+"));
    }
    style.row("CC", &parts).unwrap_or_default()
}

/// `USAGE session … / hour … / day … / week …`, or `USAGE unavailable`.
pub fn usage_line(usage: Option<&[UsageSummary]>, style: TextStyle) -> String {
    match usage {
        Some(summaries) => {
            let parts: Vec<String> = summaries.iter().map(|s| format_usage(s, style)).collect();
            style
                .row("USAGE", &parts)
                .unwrap_or_else(|| format!("USAGE {}", style.dim("unavailable")))
        }
        None => format!("USAGE {}", style.dim("unavailable")),
    }
}

/// Print the status line. `usage` is `None` when the usage row is disabled.
pub fn print_text_output(
    hook: &HookJson,
    usage: Option<Option<&[UsageSummary]>>,
    style: TextStyle,
) {
    let mut rows = vec![header_line(hook, style)];
    if let Some(usage) = usage {
        rows.push(usage_line(usage, style));
    }
    println!("{}", rows.join("\n"));
}

pub fn build_json_output(hook: &HookJson, usage: Option<&[UsageSummary]>) -> serde_json::Value {
    let usage_json = usage.map(|summaries| {
        summaries
            .iter()
            .map(|s| {
                (
                    s.period.label().to_string(),
                    serde_json::json!({
                        "tokens": s.tokens,
                        "cost_usd": (s.cost_usd * 100.0).round() / 100.0,
                        "models": s.models,
                        "unpriced": s.unpriced,
                    }),
                )
            })
            .collect::<serde_json::Map<_, _>>()
    });
    let cost = hook.cost.as_ref().map(|c| {
        serde_json::json!({
            "total_cost_usd": c.total_cost_usd,
            "total_duration_ms": c.total_duration_ms,
            "total_api_duration_ms": c.total_api_duration_ms,
            "lines_added": c.total_lines_added,
            "lines_removed": c.total_lines_removed,
        })
    });
    serde_json::json!({
        "session_id": hook.session_id,
        "model": {
            "id": hook.model.id,
            "display_name": hook.model.display_name,
        },
        "version": hook.version,
        "output_style": hook.output_style.as_ref().map(|o| o.name.as_str()),
        "dir": project_relative_dir(
            &hook.workspace.current_dir,
            hook.workspace.project_dir.as_deref(),
        ),
        "cost": cost,
        "exceeds_200k_tokens": hook.exceeds_200k_tokens,
        "usage": usage_json,
    })
}

pub fn print_json_output(hook: &HookJson, usage: Option<&[UsageSummary]>) -> anyhow::Result<()> {
    let v = build_json_output(hook, usage);
    println!("{}", serde_json::to_string(&v)?);
    Ok(())
}
