//! Injectable randomness for fault injection
//!
//! The chaos middleware draws a fresh uniform percentage for each injection
//! stage. The source is a trait so tests and demos can force deterministic
//! outcomes instead of relying on thread-local entropy.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform percentage draws for injection decisions
pub trait FaultRandom: Send + Sync + fmt::Debug {
    /// Draw a uniform random integer in `[0, 100)`
    fn percent(&self) -> u8;
}

/// Production source backed by the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngRandom;

impl FaultRandom for ThreadRngRandom {
    fn percent(&self) -> u8 {
        rand::rng().random_range(0..100)
    }
}

/// Deterministic source replaying a fixed sequence of draws, cycling once
/// exhausted
///
/// Useful in tests that need exact injection outcomes at non-extreme rates.
#[derive(Debug)]
pub struct FixedSequenceRandom {
    draws: Vec<u8>,
    cursor: AtomicUsize,
}

impl FixedSequenceRandom {
    /// Create a source replaying `draws` in order
    ///
    /// Values are clamped into `[0, 100)`. An empty sequence always draws 0.
    pub fn new(draws: Vec<u8>) -> Self {
        let draws = draws.into_iter().map(|d| d.min(99)).collect();
        Self {
            draws,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl FaultRandom for FixedSequenceRandom {
    fn percent(&self) -> u8 {
        if self.draws.is_empty() {
            return 0;
        }
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.draws[i % self.draws.len()]
    }
}

/// Seedable source for reproducible randomized runs
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    /// Create a source seeded with `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl fmt::Debug for SeededRandom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeededRandom").finish_non_exhaustive()
    }
}

impl FaultRandom for SeededRandom {
    fn percent(&self) -> u8 {
        self.rng.lock().random_range(0..100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_rng_stays_in_range() {
        let source = ThreadRngRandom;
        for _ in 0..1000 {
            assert!(source.percent() < 100);
        }
    }

    #[test]
    fn fixed_sequence_replays_in_order() {
        let source = FixedSequenceRandom::new(vec![0, 50, 99]);
        assert_eq!(source.percent(), 0);
        assert_eq!(source.percent(), 50);
        assert_eq!(source.percent(), 99);
    }

    #[test]
    fn fixed_sequence_cycles() {
        let source = FixedSequenceRandom::new(vec![7, 42]);
        assert_eq!(source.percent(), 7);
        assert_eq!(source.percent(), 42);
        assert_eq!(source.percent(), 7);
    }

    #[test]
    fn fixed_sequence_clamps_out_of_range_draws() {
        let source = FixedSequenceRandom::new(vec![100, 255]);
        assert_eq!(source.percent(), 99);
        assert_eq!(source.percent(), 99);
    }

    #[test]
    fn fixed_sequence_empty_draws_zero() {
        let source = FixedSequenceRandom::new(vec![]);
        assert_eq!(source.percent(), 0);
    }

    #[test]
    fn seeded_source_is_reproducible() {
        let a = SeededRandom::new(1234);
        let b = SeededRandom::new(1234);
        let draws_a: Vec<u8> = (0..32).map(|_| a.percent()).collect();
        let draws_b: Vec<u8> = (0..32).map(|_| b.percent()).collect();
        assert_eq!(draws_a, draws_b);
        assert!(draws_a.iter().all(|&d| d < 100));
    }
}
