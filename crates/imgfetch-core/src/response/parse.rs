//! Parse HTTP response header lines into ResponseMeta.

use super::ResponseMeta;

/// Parse collected header lines into ResponseMeta. Later status lines win.
pub fn parse_headers(lines: &[String]) -> ResponseMeta {
    let mut meta = ResponseMeta::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            meta.status = line
                .split_whitespace()
                .nth(1)
                .and_then(|code| code.parse::<u32>().ok());
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-type") {
                meta.content_type = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("content-length") {
                meta.content_length = Some(value.to_string());
            }
        }
    }

    meta
}
