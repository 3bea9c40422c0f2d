//! Easy2 Handler for one image transfer.
//! Validates status and headers on the first body chunk, then streams chunks to storage.

use std::path::PathBuf;

use crate::error::{FetchError, TransportError};
use crate::response::{HeaderCollector, ResponseMeta};
use crate::storage::{self, Begin, ImageWriter};
use crate::validate::validate_response;

/// Where the handler is in the transfer.
#[derive(Debug)]
pub(super) enum SinkState {
    /// Headers still arriving; nothing decided.
    Pending,
    Writing(ImageWriter),
    /// Destination already exists; transfer aborted on purpose.
    Duplicate,
    /// A check failed; transfer aborted on purpose.
    Rejected(FetchError),
}

/// Handler state for a single GET. Implements curl's Handler for Easy2.
pub struct ImageHandler {
    pub(super) headers: HeaderCollector,
    pub(super) destination: PathBuf,
    pub(super) max_content_length: u64,
    pub(super) state: SinkState,
}

impl ImageHandler {
    pub fn new(destination: PathBuf, max_content_length: u64) -> Self {
        Self {
            headers: HeaderCollector::default(),
            destination,
            max_content_length,
            state: SinkState::Pending,
        }
    }

    /// Runs status, safety and duplicate checks against the headers seen so far
    /// and moves out of `Pending`. No-op once decided.
    pub(super) fn decide(&mut self) {
        if !matches!(self.state, SinkState::Pending) {
            return;
        }
        let meta = self.headers.meta();
        self.state = match check(&meta, self.max_content_length) {
            Err(e) => SinkState::Rejected(e),
            Ok(()) => match storage::begin(&self.destination) {
                Ok(Begin::Duplicate) => SinkState::Duplicate,
                Ok(Begin::Write(w)) => {
                    tracing::debug!(
                        path = %self.destination.display(),
                        temp = %w.temp_path().display(),
                        "staging image body"
                    );
                    SinkState::Writing(w)
                }
                Err(e) => SinkState::Rejected(FetchError::Unexpected(e)),
            },
        };
    }
}

fn check(meta: &ResponseMeta, max_content_length: u64) -> Result<(), FetchError> {
    if !meta.is_success() {
        return Err(TransportError::Http(meta.status.unwrap_or(0)).into());
    }
    validate_response(meta, max_content_length)?;
    Ok(())
}

impl curl::easy::Handler for ImageHandler {
    fn header(&mut self, data: &[u8]) -> bool {
        self.headers.push(data);
        true
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, curl::easy::WriteError> {
        self.decide();
        let writer = match &mut self.state {
            SinkState::Writing(w) => w,
            // Returning fewer bytes than offered makes libcurl abort the transfer.
            _ => return Ok(0),
        };
        match writer.write_chunk(data) {
            Ok(()) => Ok(data.len()),
            Err(e) => {
                tracing::warn!(path = %self.destination.display(), "image write failed: {:#}", e);
                self.state = SinkState::Rejected(FetchError::Unexpected(e));
                Ok(0)
            }
        }
    }
}
