//! Error types for key search.

use thiserror::Error;

/// Errors that end a key search.
#[derive(Debug, Error)]
pub enum KeygenError {
    /// The cancellation token fired before any worker found a key.
    #[error("key search cancelled")]
    Cancelled,

    /// Reading seed bytes failed.
    #[error("random source error: {0}")]
    RandomSource(String),

    /// A search was requested with zero workers.
    #[error("key search needs at least one worker")]
    NoWorkers,

    /// Every worker exited without a result or a cancellation.
    #[error("key search worker failed: {0}")]
    WorkerFailed(String),
}

/// Result type for key search.
pub type Result<T> = std::result::Result<T, KeygenError>;
