//! Seed sources for key search.
//!
//! Every worker in a search reads from the same source, so sources must be
//! safe to read concurrently.

use std::sync::Mutex;

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

use crate::error::{KeygenError, Result};

/// A concurrency-safe supply of 32-byte seeds.
pub trait SeedSource: Send + Sync {
    /// Overwrite `seed` with fresh bytes.
    fn fill_seed(&self, seed: &mut [u8; 32]) -> Result<()>;
}

/// The operating system's CSPRNG. Use this for real keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl SeedSource for OsEntropy {
    fn fill_seed(&self, seed: &mut [u8; 32]) -> Result<()> {
        OsRng
            .try_fill_bytes(seed)
            .map_err(|e| KeygenError::RandomSource(e.to_string()))
    }
}

/// A reproducible source: a seeded ChaCha generator behind a lock.
///
/// With a single worker the sequence of candidates, and so the key found,
/// is the same on every run.
#[derive(Debug)]
pub struct SeededSource {
    rng: Mutex<StdRng>,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl SeedSource for SeededSource {
    fn fill_seed(&self, seed: &mut [u8; 32]) -> Result<()> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| KeygenError::RandomSource("seeded source lock poisoned".into()))?;
        rng.fill_bytes(seed);
        Ok(())
    }
}
