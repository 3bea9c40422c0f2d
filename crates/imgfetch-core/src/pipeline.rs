//! Orchestrator: input line in, one outcome per URL out.
//!
//! URLs are processed one at a time in input order. A failing URL is reported
//! and the run moves on; only empty input or an unusable output directory end
//! the run early.

use std::path::PathBuf;

use crate::config::FetcherConfig;
use crate::downloader::{self, Fetched};
use crate::error::FetchError;
use crate::input;
use crate::storage;
use crate::url_model::{self, Destination};

/// A newly written image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    pub filename: String,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Outcome of one URL attempt.
#[derive(Debug)]
pub enum UrlOutcome {
    Saved(SavedImage),
    /// A file already existed at the destination; nothing was written.
    Duplicate { filename: String, path: PathBuf },
    Failed(FetchError),
}

/// Tally of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub saved: usize,
    pub duplicates: usize,
    pub failed: usize,
}

impl RunSummary {
    /// URLs tried, whatever their outcome.
    pub fn attempted(&self) -> usize {
        self.saved + self.duplicates + self.failed
    }

    fn record(&mut self, outcome: &UrlOutcome) {
        match outcome {
            UrlOutcome::Saved(_) => self.saved += 1,
            UrlOutcome::Duplicate { .. } => self.duplicates += 1,
            UrlOutcome::Failed(_) => self.failed += 1,
        }
    }
}

pub struct Pipeline {
    cfg: FetcherConfig,
}

impl Pipeline {
    pub fn new(cfg: FetcherConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.cfg
    }

    /// Collects URLs from `raw_input`, creates the output directory and fetches
    /// each URL in order, handing every outcome to `report` as it happens.
    ///
    /// Per-URL failures are reported, never returned. Returns `Err` only for
    /// [`FetchError::EmptyInput`] (nothing touched) or when the output
    /// directory cannot be created.
    pub fn run<F>(&self, raw_input: &str, mut report: F) -> Result<RunSummary, FetchError>
    where
        F: FnMut(&str, UrlOutcome),
    {
        let urls = input::collect_urls(raw_input)?;
        storage::ensure_output_dir(&self.cfg.output_dir)?;
        tracing::info!(count = urls.len(), dir = %self.cfg.output_dir.display(), "fetching images");

        let mut summary = RunSummary::default();
        for url in &urls {
            let outcome = self.fetch_one(url);
            summary.record(&outcome);
            report(url.as_str(), outcome);
        }
        tracing::info!(
            saved = summary.saved,
            duplicates = summary.duplicates,
            failed = summary.failed,
            "run finished"
        );
        Ok(summary)
    }

    /// Resolve, fetch, validate, dedupe and persist a single URL.
    /// Expects the output directory to exist.
    pub fn fetch_one(&self, url: &str) -> UrlOutcome {
        let Destination { filename, path } =
            match url_model::resolve_destination(url, &self.cfg.output_dir, &self.cfg.default_extension) {
                Ok(d) => d,
                Err(e) => return self.failed(url, e.into()),
            };
        tracing::debug!(url, path = %path.display(), "resolved destination");

        match downloader::fetch_to(url, &path, &self.cfg) {
            Ok(Fetched::Saved { bytes }) => {
                tracing::info!(url, path = %path.display(), bytes, "image saved");
                UrlOutcome::Saved(SavedImage { filename, path, bytes })
            }
            Ok(Fetched::Duplicate) => {
                tracing::info!(url, path = %path.display(), "duplicate skipped");
                UrlOutcome::Duplicate { filename, path }
            }
            Err(e) => self.failed(url, e),
        }
    }

    fn failed(&self, url: &str, e: FetchError) -> UrlOutcome {
        tracing::warn!(url, kind = e.kind(), "fetch failed: {}", e);
        UrlOutcome::Failed(e)
    }
}
