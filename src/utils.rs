use std::io::Read;
use std::path::Path;

pub fn read_stdin() -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();
    std::io::stdin().read_to_end(&mut buf)?;
    Ok(buf)
}

pub fn format_path(p: &str) -> String {
    match directories::BaseDirs::new() {
        Some(b) => abbreviate_home(p, b.home_dir()),
        None => p.to_owned(),
    }
}

/// Replace a leading `home` with `~`, matching whole path components only.
fn abbreviate_home(p: &str, home: &Path) -> String {
    match Path::new(p).strip_prefix(home) {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_owned(),
        Ok(rest) => format!("~/{}", rest.display()),
        Err(_) => p.to_owned(),
    }
}

/// Token count with a `t` suffix: `950t`, `12.3Kt`, `4.0Mt`, `1.2Bt`.
pub fn format_tokens(n: u64) -> String {
    if n < 1_000 {
        format!("{n}t")
    } else if n < 1_000_000 {
        format!("{:.1}Kt", n as f64 / 1e3)
    } else if n < 1_000_000_000 {
        format!("{:.1}Mt", n as f64 / 1e6)
    } else {
        format!("{:.1}Bt", n as f64 / 1e9)
    }
}

/// Cut `s` to at most `n` characters, ending in `...` when shortened.
pub fn limit(s: &str, n: usize) -> String {
    if s.chars().count() <= n {
        return s.to_owned();
    }
    let head: String = s.chars().take(n.saturating_sub(3)).collect();
    format!("{}...", head.trim())
}

/// The working directory as seen from the project's parent, so the project
/// name is always the first component (`myrepo/src/bin`).
pub fn project_relative_dir(current_dir: &str, project_dir: Option<&str>) -> String {
    let parent = project_dir.and_then(|p| Path::new(p).parent());
    match parent.and_then(|parent| Path::new(current_dir).strip_prefix(parent).ok()) {
        Some(rel) if !rel.as_os_str().is_empty() => rel.to_string_lossy().into_owned(),
        _ => format_path(current_dir),
    }
}
