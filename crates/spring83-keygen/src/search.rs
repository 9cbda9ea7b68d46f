//! Parallel generate-and-test key search.
//!
//! `parallelism` workers each loop: read a seed, derive the keypair, test
//! the public key. The first worker to finish (with a key or an error)
//! fills a single-assignment slot and raises a flag; the others see the
//! flag or the cancellation token on their next iteration and exit. All
//! workers are joined before [`search`] returns.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::{Duration, Instant};

use spring83_core::{KeyMaterial, KeyPredicate};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::{KeygenError, Result};
use crate::source::SeedSource;

/// Configuration for key search.
#[derive(Debug, Clone)]
pub struct KeygenConfig {
    /// Number of worker threads.
    pub parallelism: usize,
}

impl Default for KeygenConfig {
    fn default() -> Self {
        Self {
            parallelism: thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

/// A successful search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The key that satisfied the predicate.
    pub key: KeyMaterial,
    /// Candidates examined across all workers.
    pub candidates: u64,
    /// Wall time from start until every worker had exited.
    pub elapsed: Duration,
}

/// Shared completion state for one search.
struct Race {
    done: AtomicBool,
    slot: OnceLock<Result<KeyMaterial>>,
}

impl Race {
    /// Offer a result. Only the first offer is kept; later ones are dropped.
    fn finish(&self, result: Result<KeyMaterial>) {
        let _ = self.slot.set(result);
        self.done.store(true, Ordering::Release);
    }

    fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }
}

/// Search for a keypair whose public key satisfies `predicate`.
///
/// Blocks the calling thread until a key is found, the source fails, or
/// `cancel` fires. Runs unbounded otherwise.
pub fn search<S, P>(
    cancel: &CancellationToken,
    source: &S,
    predicate: &P,
    parallelism: usize,
) -> Result<SearchOutcome>
where
    S: SeedSource + ?Sized,
    P: KeyPredicate + ?Sized,
{
    if parallelism == 0 {
        return Err(KeygenError::NoWorkers);
    }

    let start = Instant::now();
    let race = Race {
        done: AtomicBool::new(false),
        slot: OnceLock::new(),
    };

    debug!(parallelism, "starting key search");

    let (candidates, failures) = thread::scope(|scope| {
        let workers: Vec<_> = (0..parallelism)
            .map(|id| {
                let race = &race;
                scope.spawn(move || run_worker(id, cancel, source, predicate, race))
            })
            .collect();

        let mut candidates = 0u64;
        let mut failures = 0usize;
        for worker in workers {
            match worker.join() {
                Ok(examined) => candidates += examined,
                Err(_) => failures += 1,
            }
        }
        (candidates, failures)
    });

    let elapsed = start.elapsed();

    match race.slot.into_inner() {
        Some(Ok(key)) => {
            info!(
                pubkey = %key.public_key(),
                candidates,
                elapsed_ms = elapsed.as_millis() as u64,
                "found key"
            );
            Ok(SearchOutcome {
                key,
                candidates,
                elapsed,
            })
        }
        Some(Err(e)) => Err(e),
        None if cancel.is_cancelled() => {
            debug!(candidates, "key search cancelled");
            Err(KeygenError::Cancelled)
        }
        None => Err(KeygenError::WorkerFailed(format!(
            "{failures} of {parallelism} workers panicked"
        ))),
    }
}

/// Run [`search`] on tokio's blocking pool.
///
/// Cancelling `cancel` (for example on Ctrl-C) ends the search with
/// [`KeygenError::Cancelled`].
pub async fn search_blocking(
    cancel: CancellationToken,
    source: Arc<dyn SeedSource>,
    predicate: Arc<dyn KeyPredicate>,
    parallelism: usize,
) -> Result<SearchOutcome> {
    tokio::task::spawn_blocking(move || search(&cancel, &*source, &*predicate, parallelism))
        .await
        .map_err(|e| KeygenError::WorkerFailed(e.to_string()))?
}

/// One worker's loop. Returns the number of candidates it examined.
fn run_worker<S, P>(
    id: usize,
    cancel: &CancellationToken,
    source: &S,
    predicate: &P,
    race: &Race,
) -> u64
where
    S: SeedSource + ?Sized,
    P: KeyPredicate + ?Sized,
{
    let mut seed = [0u8; 32];
    let mut examined = 0u64;

    while !race.is_done() && !cancel.is_cancelled() {
        if let Err(e) = source.fill_seed(&mut seed) {
            race.finish(Err(e));
            break;
        }

        let key = KeyMaterial::derive(&seed);
        examined += 1;

        if predicate.accepts(&key.public_key()) {
            race.finish(Ok(key));
            break;
        }
    }

    debug!(worker = id, examined, "key search worker exiting");
    examined
}
