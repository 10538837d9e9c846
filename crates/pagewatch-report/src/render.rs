//! Report rendering.

use std::io::IsTerminal;

use colored::Colorize;
use serde_json::json;

use pagewatch_config::PageConfig;
use pagewatch_probe::{PageStatus, Verdict};

use crate::summary::Summary;

const DEFAULT_WIDTH: usize = 80;
const MIN_WIDTH: usize = 40;

/// Width of the status column, sized for the longest label.
const LABEL_WIDTH: usize = 11;

/// Human report options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub color: bool,
    /// Line width in columns.
    pub width: usize,
    /// Add a detail line per page.
    pub verbose: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: false,
            width: DEFAULT_WIDTH,
            verbose: false,
        }
    }
}

impl RenderOptions {
    /// Options for the current terminal.
    ///
    /// Width comes from `width`, then `$COLUMNS`, then 80. Colour is off when
    /// `no_color` is set, `$NO_COLOR` is set, or stdout is not a terminal.
    pub fn detect(no_color: bool, width: Option<usize>) -> Self {
        let width = width
            .or_else(|| {
                std::env::var("COLUMNS")
                    .ok()
                    .and_then(|c| c.trim().parse().ok())
            })
            .unwrap_or(DEFAULT_WIDTH);

        let color = !no_color
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stdout().is_terminal();

        Self {
            color,
            width: width.max(MIN_WIDTH),
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Render the human-readable report.
pub fn render_human(verdicts: &[Verdict], opts: &RenderOptions) -> String {
    let mut out = String::new();

    for verdict in verdicts {
        out.push_str(&status_line(verdict, opts));
        out.push('\n');
        if opts.verbose {
            out.push_str(&detail_line(verdict, opts));
            out.push('\n');
        }
    }

    out.push_str(&summary_line(&Summary::from_verdicts(verdicts), opts));
    out.push('\n');
    out
}

/// Render the JSON report.
pub fn render_json(verdicts: &[Verdict]) -> Result<String, serde_json::Error> {
    let summary = Summary::from_verdicts(verdicts);
    let output = json!({
        "checked_at": chrono::Utc::now().to_rfc3339(),
        "overall": summary.overall,
        "counts": {
            "total": summary.total,
            "up": summary.up,
            "maintenance": summary.maintenance,
            "down": summary.down,
        },
        "pages": verdicts,
    });
    serde_json::to_string_pretty(&output)
}

/// Render the configured page list.
pub fn render_page_list(pages: &[PageConfig], opts: &RenderOptions) -> String {
    let name_width = pages
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for page in pages {
        let padding = " ".repeat(name_width - page.name.chars().count());
        let name = if opts.color {
            page.name.bold().to_string()
        } else {
            page.name.clone()
        };
        out.push_str(&format!("{}{}  {}\n", name, padding, page.url));
    }
    out
}

/// `Name ........ STATUS`, exactly `opts.width` columns.
fn status_line(verdict: &Verdict, opts: &RenderOptions) -> String {
    let max_name = opts.width.saturating_sub(LABEL_WIDTH + 3).max(1);
    let name = truncate(&verdict.name, max_name);
    let name_len = name.chars().count();
    let dots = ".".repeat(
        opts.width
            .saturating_sub(LABEL_WIDTH + 2 + name_len)
            .max(1),
    );

    let label = verdict.status.label();
    let label_pad = " ".repeat(LABEL_WIDTH - label.len());

    let (dots, label) = if opts.color {
        (dots.dimmed().to_string(), paint(verdict.status, label))
    } else {
        (dots, label.to_string())
    };

    format!("{} {} {}{}", name, dots, label_pad, label)
}

/// Indented reason, hop count, timing and final URL.
fn detail_line(verdict: &Verdict, opts: &RenderOptions) -> String {
    let mut parts = Vec::new();
    if let Some(reason) = &verdict.reason {
        parts.push(reason.clone());
    }
    parts.push(format!(
        "{} {} in {} ms",
        verdict.hops,
        if verdict.hops == 1 { "hop" } else { "hops" },
        verdict.elapsed_ms
    ));
    if let Some(final_url) = &verdict.final_url {
        if final_url != &verdict.url {
            parts.push(format!("ended at {}", final_url));
        }
    }

    let detail = parts.join("; ");
    if opts.color {
        format!("    {}", detail.dimmed())
    } else {
        format!("    {}", detail)
    }
}

fn summary_line(summary: &Summary, opts: &RenderOptions) -> String {
    let line = format!(
        "{} {}: {} up, {} in maintenance, {} down",
        summary.total,
        if summary.total == 1 { "page" } else { "pages" },
        summary.up,
        summary.maintenance,
        summary.down
    );
    if opts.color {
        paint(summary.overall, &line)
    } else {
        line
    }
}

fn paint(status: PageStatus, text: &str) -> String {
    match status {
        PageStatus::Up => text.green().bold().to_string(),
        PageStatus::Maintenance => text.yellow().bold().to_string(),
        PageStatus::Down => text.red().bold().to_string(),
    }
}

/// Cut `text` to `max` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
