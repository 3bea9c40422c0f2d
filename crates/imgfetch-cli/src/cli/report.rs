//! Human-readable console lines. Not machine-readable; logs go elsewhere.

use imgfetch_core::{FetchError, RunSummary, UrlOutcome};
use std::io::{self, Write};

pub const PROMPT: &str = "Please enter image URLs separated by commas:";

/// Printed once, right before the first URL's status lines.
pub const FETCHING: &str = "Fetching images...";

pub fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Welcome to imgfetch")?;
    writeln!(out, "Collect images from the web, one URL at a time.")?;
    writeln!(out)
}

/// Status lines for one URL.
pub fn outcome_lines(url: &str, outcome: &UrlOutcome) -> Vec<String> {
    match outcome {
        UrlOutcome::Saved(saved) => vec![
            format!("✓ Successfully fetched: {}", saved.filename),
            format!("✓ Image saved to {}", saved.path.display()),
        ],
        UrlOutcome::Duplicate { filename, .. } => {
            vec![format!("⚠ Skipping duplicate: {}", filename)]
        }
        UrlOutcome::Failed(err) => vec![failure_line(url, err)],
    }
}

fn failure_line(url: &str, err: &FetchError) -> String {
    match err {
        FetchError::Transport(e) => format!("✗ Connection error for {}: {}", url, e),
        FetchError::Validation(e) => format!("✗ Skipping {}: {}", url, e),
        FetchError::EmptyInput | FetchError::Unexpected(_) => {
            format!("✗ Unexpected error for {}: {}", url, err)
        }
    }
}

pub fn empty_input_line() -> &'static str {
    "✗ No valid URLs provided. Exiting."
}

pub fn summary_line(summary: &RunSummary) -> String {
    format!(
        "Done: {} URL(s) attempted: {} saved, {} duplicate(s) skipped, {} failed.",
        summary.attempted(),
        summary.saved,
        summary.duplicates,
        summary.failed
    )
}
