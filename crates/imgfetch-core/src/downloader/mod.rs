//! HTTP GET of one image with libcurl.
//!
//! The body is never buffered: the [`ImageHandler`] checks the final response's
//! status and headers when the first chunk arrives and either streams chunks to
//! a temp file or aborts the transfer. Redirects are followed.

mod handler;

pub use handler::ImageHandler;

use handler::SinkState;

use crate::config::FetcherConfig;
use crate::error::{FetchError, TransportError};
use std::path::Path;

/// Result of a transfer that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    Saved { bytes: u64 },
    Duplicate,
}

fn configure(
    easy: &mut curl::easy::Easy2<ImageHandler>,
    url: &str,
    cfg: &FetcherConfig,
) -> Result<(), curl::Error> {
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(cfg.max_redirects)?;
    easy.connect_timeout(cfg.connect_timeout())?;
    // Stall timeout: under 1 byte/s for `timeout_secs` aborts the transfer.
    easy.low_speed_limit(1)?;
    easy.low_speed_time(cfg.timeout())?;
    easy.buffer_size(cfg.chunk_size)?;
    Ok(())
}

/// GETs `url` and persists the body at `destination`.
///
/// Runs in the current thread and blocks until the transfer finishes, fails,
/// or stalls for longer than the configured timeout. Nothing is retried.
pub fn fetch_to(url: &str, destination: &Path, cfg: &FetcherConfig) -> Result<Fetched, FetchError> {
    let handler = ImageHandler::new(destination.to_path_buf(), cfg.max_content_length);
    let mut easy = curl::easy::Easy2::new(handler);
    configure(&mut easy, url, cfg).map_err(TransportError::Curl)?;

    let performed = easy.perform();
    tracing::debug!(url, code = ?easy.response_code().ok(), ok = performed.is_ok(), "transfer finished");

    let handler = easy.get_mut();
    if performed.is_ok() {
        // Empty bodies never reach `write`; decide on headers alone.
        handler.decide();
    }
    let state = std::mem::replace(&mut handler.state, SinkState::Pending);

    match (state, performed) {
        (SinkState::Rejected(e), _) => Err(e),
        (SinkState::Duplicate, _) => Ok(Fetched::Duplicate),
        (SinkState::Writing(writer), Ok(())) => {
            let bytes = writer.finalize()?;
            Ok(Fetched::Saved { bytes })
        }
        // Dropping the writer removes the partial temp file.
        (SinkState::Writing(_), Err(e)) | (SinkState::Pending, Err(e)) => {
            Err(TransportError::Curl(e).into())
        }
        (SinkState::Pending, Ok(())) => {
            Err(anyhow::anyhow!("transfer finished without a decision").into())
        }
    }
}
