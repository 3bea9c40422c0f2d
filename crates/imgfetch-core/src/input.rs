//! Input collection: one comma-separated line in, ordered URL list out.

use crate::error::FetchError;

/// Splits `raw` on commas, trims each piece and drops empty ones.
///
/// Order and duplicates are preserved. Returns [`FetchError::EmptyInput`] when
/// nothing is left, before any network or filesystem work happens.
pub fn collect_urls(raw: &str) -> Result<Vec<String>, FetchError> {
    let urls: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if urls.is_empty() {
        return Err(FetchError::EmptyInput);
    }
    Ok(urls)
}
