//! URL parsing and destination resolution.
//!
//! Maps a URL onto a flat file inside the output directory: the last path
//! segment when it is a safe filename, otherwise a SHA-256 fingerprint of the
//! URL with the default image extension.

mod fingerprint;
mod path;
mod sanitize;

pub use fingerprint::fingerprint_filename;
pub use path::last_path_segment;
pub use sanitize::is_safe_filename;

use crate::error::TransportError;
use std::path::{Path, PathBuf};
use url::Url;

/// Where one URL's image is (or would be) stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub filename: String,
    pub path: PathBuf,
}

/// Parses `raw` and requires an `http` or `https` scheme.
pub fn parse_http_url(raw: &str) -> Result<Url, TransportError> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(TransportError::UnsupportedScheme(other.to_string())),
    }
}

/// Derives the filename for `url`.
///
/// # Examples
///
/// - `https://example.com/cat.jpg` → `"cat.jpg"`
/// - `https://example.com/` → `"<sha256 hex of the URL>.jpg"`
pub fn derive_filename(raw_url: &str, url: &Url, default_extension: &str) -> String {
    match last_path_segment(url) {
        Some(seg) if is_safe_filename(seg) => seg.to_string(),
        Some(seg) => {
            tracing::warn!(url = raw_url, segment = seg, "unsafe path segment, using fingerprint name");
            fingerprint_filename(raw_url, default_extension)
        }
        None => fingerprint_filename(raw_url, default_extension),
    }
}

/// Resolves the destination for `raw_url` inside `output_dir`.
pub fn resolve_destination(
    raw_url: &str,
    output_dir: &Path,
    default_extension: &str,
) -> Result<Destination, TransportError> {
    let url = parse_http_url(raw_url)?;
    let filename = derive_filename(raw_url, &url, default_extension);
    let path = output_dir.join(&filename);
    Ok(Destination { filename, path })
}
