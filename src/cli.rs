//! CLI definitions for pagewatch.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// pagewatch CLI.
#[derive(Parser, Debug)]
#[command(name = "pagewatch")]
#[command(about = "Check whether web pages are up, in maintenance, or down")]
#[command(version)]
pub(crate) struct Cli {
    /// Only check these pages (by name)
    #[arg(value_name = "PAGE")]
    pub pages: Vec<String>,

    /// Page list file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds, overriding the page list
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Maximum requests per page, overriding the page list
    #[arg(long, value_name = "N")]
    pub max_hops: Option<u32>,

    /// Number of pages polled at the same time
    #[arg(short = 'j', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable coloured output
    #[arg(long, env = "PAGEWATCH_NO_COLOR")]
    pub no_color: bool,

    /// Report width in columns
    #[arg(short, long, value_name = "COLS")]
    pub width: Option<usize>,

    /// Show details per page (-vv also logs every request)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// List the configured pages and exit
    #[arg(short, long)]
    pub list: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["pagewatch"]).unwrap();
        assert!(cli.pages.is_empty());
        assert!(cli.config.is_none());
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_full() {
        let cli = Cli::try_parse_from([
            "pagewatch",
            "-c",
            "pages.toml",
            "--timeout",
            "5",
            "--max-hops",
            "4",
            "-j",
            "2",
            "--json",
            "-w",
            "100",
            "-vv",
            "Portal",
            "Mail",
        ])
        .unwrap();
        assert_eq!(cli.pages, vec!["Portal", "Mail"]);
        assert_eq!(cli.config, Some(PathBuf::from("pages.toml")));
        assert_eq!(cli.timeout, Some(5));
        assert_eq!(cli.max_hops, Some(4));
        assert_eq!(cli.concurrency, Some(2));
        assert!(cli.json);
        assert_eq!(cli.width, Some(100));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_rejects_bad_number() {
        assert!(Cli::try_parse_from(["pagewatch", "--timeout", "soon"]).is_err());
    }
}
