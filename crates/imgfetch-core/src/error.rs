//! Error taxonomy for the fetch pipeline.
//!
//! Every per-URL step returns one of these; the orchestrator inspects the
//! variant to decide how to report it and never lets it abort the run.

use thiserror::Error;

/// Failure of the whole run or of one URL's processing.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Nothing left after splitting and trimming the input line.
    #[error("no valid URLs provided")]
    EmptyInput,
    /// DNS, connect, timeout or non-2xx status.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Response headers failed the safety checks.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Anything else, mostly filesystem failures.
    #[error("{0:#}")]
    Unexpected(anyhow::Error),
}

impl FetchError {
    /// Short category label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::EmptyInput => "empty_input",
            FetchError::Transport(_) => "transport",
            FetchError::Validation(_) => "validation",
            FetchError::Unexpected(_) => "unexpected",
        }
    }
}

impl From<anyhow::Error> for FetchError {
    fn from(e: anyhow::Error) -> Self {
        FetchError::Unexpected(e)
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("unsupported scheme {0:?} (only http and https)")]
    UnsupportedScheme(String),
    #[error("{0}")]
    Curl(#[from] curl::Error),
    #[error("HTTP {0}")]
    Http(u32),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid file type {0:?}; only image files are allowed")]
    InvalidContentType(String),
    /// `declared` is the header value as sent; it may not fit in a `u64`.
    #[error("file is too large ({declared} bytes, limit is {limit} bytes)")]
    ContentTooLarge { declared: String, limit: u64 },
    #[error("invalid Content-Length {0:?}")]
    InvalidContentLength(String),
}
