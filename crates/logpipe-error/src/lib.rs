//! Shared error types for the log-ingestion pipeline.
//!
//! Every component catches and translates its own failures at its
//! boundary; no raw library error ever leaks into an HTTP response body
//! beyond a `detail` string (spec §7).

#![warn(missing_docs)]

mod http;

pub use http::ErrorResponse;

/// Request failed the §4.5 validation rules.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A single field failed its bounds check.
    #[error("{field}: {message}")]
    Field {
        /// Name of the offending field.
        field: String,
        /// Human-readable reason.
        message: String,
    },

    /// A batch request had zero or too many records.
    #[error("batch must contain between {min} and {max} records, got {actual}")]
    BatchSize {
        /// Minimum allowed batch size.
        min: usize,
        /// Maximum allowed batch size.
        max: usize,
        /// Actual batch size submitted.
        actual: usize,
    },
}

/// The durable stream (C1) could not be reached or a stream op failed.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The underlying connection is unavailable.
    #[error("stream unavailable: {0}")]
    Unavailable(String),

    /// A returned stream ID did not match the `\d+-\d+` shape.
    #[error("malformed stream id: {0}")]
    MalformedId(String),
}

/// The relational store (C3/C4) could not be reached or a query failed.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Could not acquire a connection or the connection dropped.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A write transaction failed and was rolled back.
    #[error("store write failed: {0}")]
    WriteFailed(String),
}

/// The read-through cache (C2) is always best-effort; this type exists
/// so call sites are explicit about what they are choosing to swallow.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Cache op failed; callers proceed as on a cache miss.
    #[error("cache unavailable: {0}")]
    Unavailable(String),
}

/// Aggregate error type for the HTTP surface.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// See [`ValidationError`].
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// See [`StreamError`].
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// See [`StoreError`].
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A fault with no more specific classification. Mapped to 500.
    #[error("internal error: {message}")]
    Internal {
        /// Description safe to show in a `detail` field.
        message: String,
    },
}

impl PipelineError {
    /// Stable error code, independent of the `Display` message, used for
    /// log correlation and the `error` field of the JSON response.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Stream(_) => "stream_unavailable",
            Self::Store(_) => "store_unavailable",
            Self::Internal { .. } => "internal_error",
        }
    }
}
