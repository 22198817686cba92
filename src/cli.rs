use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[command(version, about = "Status line for Claude Code sessions")]
pub struct Args {
    /// Claude data directory whose projects/ holds transcripts. Defaults to ~/.claude
    #[arg(long, env = "CLAUDE_CONFIG_DIR")]
    pub claude_config_dir: Option<PathBuf>,

    /// Emit JSON instead of colored text
    #[arg(long)]
    pub json: bool,

    /// Skip transcript scanning and the usage row
    #[arg(long)]
    pub no_usage: bool,

    /// Debug mode: log transcript loading and per-model usage to stderr
    #[arg(long, env = "CLAUDE_DEBUG")]
    pub debug: bool,
}

impl Args {
    pub fn parse() -> Self {
        <Args as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["cc_statusline"]).unwrap();
        assert!(!args.json);
        assert!(!args.no_usage);
    }

    #[test]
    fn flags() {
        let args = Args::try_parse_from([
            "cc_statusline",
            "--json",
            "--no-usage",
            "--claude-config-dir",
            "/tmp/claude",
        ])
        .unwrap();
        assert!(args.json);
        assert!(args.no_usage);
        assert_eq!(args.claude_config_dir, Some(PathBuf::from("/tmp/claude")));
    }
}
