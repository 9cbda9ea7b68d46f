//! # Spring '83 Keygen
//!
//! Parallel search for vanity keypairs.
//!
//! Valid Spring '83 keys end in a suffix that encodes their expiry month, so
//! roughly one candidate in eleven million is acceptable. [`search`] spreads
//! the generate-and-test loop over a pool of threads and returns the first
//! match.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use spring83_core::VanityRule;
//! use spring83_keygen::{search, KeygenConfig, OsEntropy};
//! use tokio_util::sync::CancellationToken;
//!
//! let cancel = CancellationToken::new();
//! let config = KeygenConfig::default();
//! let outcome = search(&cancel, &OsEntropy, &VanityRule::default(), config.parallelism)?;
//! println!("{} after {} candidates", outcome.key.public_key(), outcome.candidates);
//! # Ok::<(), spring83_keygen::KeygenError>(())
//! ```
//!
//! ## Cancellation
//!
//! Workers check the [`CancellationToken`](tokio_util::sync::CancellationToken)
//! once per candidate, so a cancelled search returns
//! [`KeygenError::Cancelled`] after at most one more iteration per worker.

pub mod error;
pub mod search;
pub mod source;

pub use error::{KeygenError, Result};
pub use search::{search, search_blocking, KeygenConfig, SearchOutcome};
pub use source::{OsEntropy, SeedSource, SeededSource};
