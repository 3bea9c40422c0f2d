//! CLI for the imgfetch image fetcher.

mod report;

use anyhow::{Context, Result};
use clap::Parser;
use imgfetch_core::{config, FetchError, FetcherConfig, Pipeline, RunSummary};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Fetch images from a comma-separated list of URLs typed at the prompt.
#[derive(Debug, Parser)]
#[command(name = "imgfetch")]
#[command(about = "Fetch images from URLs into a local directory", long_about = None)]
pub struct Cli {
    /// Directory receiving fetched images (overrides the config file).
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Per-request timeout in seconds (overrides the config file).
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Config file to use instead of ~/.config/imgfetch/config.toml.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = cli.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let stdin = io::stdin();
        let stdout = io::stdout();
        run_interactive(cfg, &mut stdin.lock(), &mut stdout.lock())?;
        Ok(())
    }

    /// Config file (explicit or XDG default) with flag overrides applied.
    pub fn load_config(&self) -> Result<FetcherConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init()?,
        };
        self.apply_overrides(&mut cfg);
        Ok(cfg)
    }

    fn apply_overrides(&self, cfg: &mut FetcherConfig) {
        if let Some(dir) = &self.output_dir {
            cfg.output_dir = dir.clone();
        }
        if let Some(secs) = self.timeout_secs {
            cfg.timeout_secs = secs;
        }
    }
}

/// Banner, prompt, one input line, then one report block per URL and a summary.
///
/// Returns `Ok(None)` when the line held no URLs.
pub fn run_interactive<R: BufRead, W: Write>(
    cfg: FetcherConfig,
    input: &mut R,
    out: &mut W,
) -> Result<Option<RunSummary>> {
    report::write_banner(out)?;
    writeln!(out, "{}", report::PROMPT)?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("failed to read URLs from stdin")?;

    let pipeline = Pipeline::new(cfg);
    writeln!(out)?;
    let mut write_err: Option<io::Error> = None;
    let mut started = false;
    let result = pipeline.run(&line, |url, outcome| {
        if write_err.is_some() {
            return;
        }
        if !started {
            started = true;
            if let Err(e) = writeln!(out, "{}\n", report::FETCHING) {
                write_err = Some(e);
                return;
            }
        }
        for text in report::outcome_lines(url, &outcome) {
            if let Err(e) = writeln!(out, "{}", text) {
                write_err = Some(e);
                return;
            }
        }
    });
    if let Some(e) = write_err {
        return Err(e).context("failed to write report");
    }

    match result {
        Ok(summary) => {
            writeln!(out)?;
            writeln!(out, "{}", report::summary_line(&summary))?;
            Ok(Some(summary))
        }
        Err(FetchError::EmptyInput) => {
            writeln!(out, "{}", report::empty_input_line())?;
            Ok(None)
        }
        Err(e) => Err(anyhow::Error::new(e)),
    }
}
