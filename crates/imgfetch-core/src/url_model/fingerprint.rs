//! Deterministic fallback names for URLs without a usable filename.

use sha2::{Digest, Sha256};

/// SHA-256 of the URL string as lowercase hex, followed by `.{extension}`.
pub fn fingerprint_filename(url: &str, extension: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    let ext = extension.trim_start_matches('.');
    if ext.is_empty() {
        hex::encode(digest)
    } else {
        format!("{}.{}", hex::encode(digest), ext)
    }
}
