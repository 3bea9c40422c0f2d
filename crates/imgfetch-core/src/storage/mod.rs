//! Disk I/O and file lifecycle for fetched images.
//!
//! The output directory is flat. Bodies are streamed into a uniquely named
//! hidden temp file (`.imgfetch-XXXXXX.part`) in the same directory and linked
//! to the final name only after the transfer completes, so a final path either
//! holds a complete body or does not exist. Existing entries, including other
//! saved images whose names end in `.part`, are never overwritten.

mod writer;

pub use writer::ImageWriter;

use anyhow::{Context, Result};
use std::path::Path;

/// Prefix of in-flight temp files.
pub const TEMP_PREFIX: &str = ".imgfetch-";
/// Suffix of in-flight temp files.
pub const TEMP_SUFFIX: &str = ".part";

/// Creates the output directory (and parents). Succeeds if it already exists.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))
}

/// True if any filesystem entry (file, dir, or dangling symlink) sits at `path`.
pub fn entry_exists(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

/// What the persister decided for a destination.
#[derive(Debug)]
pub enum Begin {
    /// Something already exists at the destination; nothing was opened.
    Duplicate,
    /// A fresh temp file is open and ready for chunks.
    Write(ImageWriter),
}

/// Duplicate check followed by opening a writer for `final_path`.
pub fn begin(final_path: &Path) -> Result<Begin> {
    if entry_exists(final_path) {
        tracing::debug!(path = %final_path.display(), "destination exists, skipping");
        return Ok(Begin::Duplicate);
    }
    Ok(Begin::Write(ImageWriter::create(final_path)?))
}
