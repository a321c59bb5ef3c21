//! Error taxonomy shared by the API server and its clients.

use thiserror::Error;

/// Result type alias for service operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the service. None of these are retried; every
/// external-call failure propagates to the caller as a request failure.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed configuration at startup. Fatal: the server
    /// refuses to start, so no request ever observes this.
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed request fields, rejected before any external call.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Interval token outside the supported set.
    #[error("unsupported interval: {0}")]
    UnsupportedInterval(String),

    /// Exchange API failure (transport error or non-2xx response).
    #[error("exchange fetch failed: {0}")]
    Fetch(String),

    /// Object store write failure.
    #[error("object store upload failed: {0}")]
    Upload(String),

    /// Query engine failure, cancellation, or completion timeout.
    #[error("analytics query failed: {0}")]
    Query(String),
}
