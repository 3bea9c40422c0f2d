//! Response metadata read from HTTP headers.
//!
//! Only the declared values are captured; nothing here is checked against the
//! bytes actually transferred.

mod parse;

pub use parse::parse_headers;

/// Status and the headers the safety checks look at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMeta {
    /// Status code from the last `HTTP/` status line, if one was seen.
    pub status: Option<u32>,
    /// Raw `Content-Type` value, if present.
    pub content_type: Option<String>,
    /// Raw `Content-Length` value, if present. Interpreted by the validator.
    pub content_length: Option<String>,
}

impl ResponseMeta {
    pub fn is_success(&self) -> bool {
        matches!(self.status, Some(200..=299))
    }
}

/// Accumulates raw header lines across redirects, keeping only the block that
/// belongs to the latest response.
#[derive(Debug, Default)]
pub struct HeaderCollector {
    lines: Vec<String>,
}

impl HeaderCollector {
    /// Feed one raw header line as delivered by libcurl (may include CRLF).
    pub fn push(&mut self, data: &[u8]) {
        let Ok(s) = std::str::from_utf8(data) else {
            return;
        };
        let line = s.trim_end();
        if line.starts_with("HTTP/") {
            self.lines.clear();
        }
        if !line.is_empty() {
            self.lines.push(line.to_string());
        }
    }

    pub fn meta(&self) -> ResponseMeta {
        parse_headers(&self.lines)
    }
}
