pub mod config;
pub mod logging;

pub mod downloader;
pub mod error;
pub mod input;
pub mod pipeline;
pub mod response;
pub mod storage;
pub mod url_model;
pub mod validate;

pub use config::FetcherConfig;
pub use error::{FetchError, TransportError, ValidationError};
pub use pipeline::{Pipeline, RunSummary, SavedImage, UrlOutcome};
