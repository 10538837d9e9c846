//! pagewatch - web page status checker
//!
//! Polls the configured pages and prints whether each is up, in
//! maintenance, or down.

mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pagewatch_config::{Config, ConfigLoader, ConfigValidator};
use pagewatch_probe::{HttpProbe, Poller};
use pagewatch_report::{render_human, render_json, render_page_list, RenderOptions, Summary};

use cli::Cli;

/// Exit code when at least one page is down.
const EXIT_DOWN: u8 = 1;
/// Exit code for configuration and usage errors.
const EXIT_ERROR: u8 = 2;

/// Initialize tracing on stderr, keeping stdout for the report.
fn init_tracing(verbose: u8) {
    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());

    // The writer stops when the guard drops, so keep it for the whole run.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_ansi(false),
        )
        .init();
}

/// Filter used when `RUST_LOG` is unset; `-v` raises every pagewatch crate.
fn default_directives(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "warn,pagewatch=info,pagewatch_config=info,pagewatch_probe=info,pagewatch_report=info",
        _ => {
            "info,pagewatch=debug,pagewatch_config=debug,pagewatch_probe=debug,pagewatch_report=debug"
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("pagewatch: {:#}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config =
        ConfigLoader::resolve(cli.config.as_deref()).context("Failed to load page list")?;
    apply_overrides(&mut config, &cli);
    config.select(&cli.pages)?;
    check_config(&config)?;

    let opts = RenderOptions::detect(cli.no_color, cli.width).with_verbose(cli.verbose > 0);
    colored::control::set_override(opts.color);

    if cli.list {
        print!("{}", render_page_list(&config.pages, &opts));
        return Ok(ExitCode::SUCCESS);
    }

    let poller = Poller::new(
        Arc::new(HttpProbe::new(&config.settings)),
        config.settings.concurrency,
    );
    let verdicts = poller.poll(&config.pages).await;

    if cli.json {
        println!("{}", render_json(&verdicts)?);
    } else {
        print!("{}", render_human(&verdicts, &opts));
    }

    let summary = Summary::from_verdicts(&verdicts);
    debug!(?summary, "Run finished");
    if summary.any_down() {
        Ok(ExitCode::from(EXIT_DOWN))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Command-line settings win over both global and per-page settings.
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(timeout) = cli.timeout {
        config.settings.timeout_secs = timeout;
        for page in &mut config.pages {
            page.timeout_secs = None;
        }
    }
    if let Some(max_hops) = cli.max_hops {
        config.settings.max_hops = max_hops;
        for page in &mut config.pages {
            page.max_hops = None;
        }
    }
    if let Some(concurrency) = cli.concurrency {
        config.settings.concurrency = concurrency;
    }
}

fn check_config(config: &Config) -> anyhow::Result<()> {
    let result = ConfigValidator::validate(config);
    for warning in &result.warnings {
        warn!("{}", warning);
    }
    if !result.is_valid() {
        let errors: Vec<String> = result.errors.iter().map(ToString::to_string).collect();
        bail!("Invalid page list:\n  {}", errors.join("\n  "));
    }
    Ok(())
}
