//! Filename extraction from URL path.

use url::Url;

/// Returns the final segment of the URL path, exactly as it appears (still
/// percent-encoded).
///
/// Returns `None` for a root path or a path ending in `/`.
pub fn last_path_segment(url: &Url) -> Option<&str> {
    let segment = url.path().rsplit('/').next()?;
    if segment.is_empty() {
        return None;
    }
    Some(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(s: &str) -> Option<String> {
        last_path_segment(&Url::parse(s).unwrap()).map(str::to_string)
    }

    #[test]
    fn normal() {
        assert_eq!(seg("https://example.com/a/b/cat.jpg").as_deref(), Some("cat.jpg"));
        assert_eq!(seg("https://example.com/single").as_deref(), Some("single"));
    }

    #[test]
    fn root_or_empty() {
        assert_eq!(seg("https://example.com/"), None);
        assert_eq!(seg("https://example.com"), None);
        assert_eq!(seg("https://example.com/gallery/"), None);
    }

    #[test]
    fn query_and_fragment_ignored() {
        assert_eq!(seg("https://example.com/pic.png?w=200#top").as_deref(), Some("pic.png"));
        assert_eq!(seg("https://example.com/?id=42"), None);
    }

    #[test]
    fn keeps_percent_encoding() {
        assert_eq!(seg("https://example.com/my%20cat.jpg").as_deref(), Some("my%20cat.jpg"));
    }
}
