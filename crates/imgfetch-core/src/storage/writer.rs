//! Sequential chunk writer for a single fetched image.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::{TEMP_PREFIX, TEMP_SUFFIX};

/// Streams chunks into a fresh temp file next to the final path. Dropping the
/// writer without calling [`ImageWriter::finalize`] closes and removes it.
#[derive(Debug)]
pub struct ImageWriter {
    temp: NamedTempFile,
    final_path: PathBuf,
    bytes_written: u64,
}

impl ImageWriter {
    /// Create a uniquely named temp file in the directory of `final_path`.
    /// Never opens or truncates an existing entry.
    pub fn create(final_path: &Path) -> Result<Self> {
        let dir = match final_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let temp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(TEMP_SUFFIX)
            .tempfile_in(dir)
            .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
        Ok(ImageWriter {
            temp,
            final_path: final_path.to_path_buf(),
            bytes_written: 0,
        })
    }

    /// Append one chunk. Empty chunks are ignored.
    pub fn write_chunk(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        self.temp
            .write_all(data)
            .with_context(|| format!("write {}", self.temp.path().display()))?;
        self.bytes_written += data.len() as u64;
        Ok(())
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn temp_path(&self) -> &Path {
        self.temp.path()
    }

    /// Sync, then link the temp file onto the final path without replacing
    /// anything already there. On failure the temp file is removed.
    pub fn finalize(self) -> Result<u64> {
        self.temp
            .as_file()
            .sync_all()
            .with_context(|| format!("sync {}", self.temp.path().display()))?;
        let ImageWriter {
            temp,
            final_path,
            bytes_written,
        } = self;
        temp.persist_noclobber(&final_path)
            .with_context(|| format!("failed to store {} (refusing to overwrite)", final_path.display()))?;
        Ok(bytes_written)
    }
}
