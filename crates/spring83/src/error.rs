//! Error types for the Spring '83 facade.

use spring83_client::ClientError;
use spring83_core::CoreError;
use spring83_keygen::KeygenError;
use thiserror::Error;

/// Errors from publishing, fetching, key files, and key search.
#[derive(Debug, Error)]
pub enum Error {
    /// Key or board error detected locally.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Network or server error.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Key search error.
    #[error(transparent)]
    Keygen(#[from] KeygenError),

    /// Reading or writing a keypair or content file.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, Error>;
