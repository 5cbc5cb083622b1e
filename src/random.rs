//! Randomness shared by all operators.
//!
//! Operators never touch a generator directly; they draw through the
//! [`RandomSource`] capability, which keeps them deterministic under a
//! seeded source in tests and unbiased in production.
//!
//! # Process-wide source
//!
//! [`with_thread_source`] hands out a generator that lives for the whole
//! thread. It is seeded once from OS entropy on first use and is never
//! reseeded afterwards, so calls issued back-to-back draw from one
//! continuous stream instead of restarting from clock-derived seeds.
//! Each thread owns its own instance, which serialises access without a lock.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::cell::RefCell;

/// Uniform randomness used by the operators.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn uniform_unit(&mut self) -> f64;

    /// Uniform integer in `[min, max]`, inclusive on both ends.
    ///
    /// # Panics
    /// Panics if `min > max`.
    fn uniform_int(&mut self, min: usize, max: usize) -> usize;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn uniform_unit(&mut self) -> f64 {
        (**self).uniform_unit()
    }

    fn uniform_int(&mut self, min: usize, max: usize) -> usize {
        (**self).uniform_int(min, max)
    }
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: RngCore> RngSource<R> {
    /// Wraps a generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns the wrapped generator.
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    fn uniform_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Rejection sampling over the full `u64` output.
    ///
    /// Raw draws at or above the largest multiple of the range width are
    /// discarded and redrawn, so every value in `[min, max]` is equally likely.
    fn uniform_int(&mut self, min: usize, max: usize) -> usize {
        assert!(min <= max, "uniform_int: min ({min}) > max ({max})");

        let span = (max - min) as u64;
        let Some(width) = span.checked_add(1) else {
            // [min, max] covers every u64 value, so min is 0.
            return self.rng.next_u64() as usize;
        };

        // 2^64 mod width values at the top of the range would be over-represented.
        let rejected = (u64::MAX % width + 1) % width;
        let limit = u64::MAX - rejected;
        loop {
            let raw = self.rng.next_u64();
            if raw <= limit {
                return min + (raw % width) as usize;
            }
        }
    }
}

/// Creates a deterministic generator from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a deterministic [`RandomSource`] from a seed.
pub fn seeded_source(seed: u64) -> RngSource<StdRng> {
    RngSource::new(create_rng(seed))
}

/// Creates a [`RandomSource`] seeded from OS entropy.
pub fn entropy_source() -> RngSource<StdRng> {
    RngSource::new(StdRng::from_os_rng())
}

thread_local! {
    static THREAD_SOURCE: RefCell<RngSource<StdRng>> = RefCell::new(entropy_source());
}

/// Runs `f` with this thread's long-lived source.
///
/// # Panics
/// Panics if called re-entrantly from inside `f`.
pub fn with_thread_source<T>(f: impl FnOnce(&mut RngSource<StdRng>) -> T) -> T {
    THREAD_SOURCE.with(|cell| f(&mut cell.borrow_mut()))
}

/// Draws `count` distinct integers uniformly from `[min, max]`.
///
/// Values are returned in draw order. Duplicates are redrawn, which keeps
/// every `count`-subset equally likely.
///
/// # Panics
/// Panics if `min > max` or `count` exceeds the size of the range.
pub fn sample_distinct<S: RandomSource + ?Sized>(
    source: &mut S,
    min: usize,
    max: usize,
    count: usize,
) -> Vec<usize> {
    assert!(min <= max, "sample_distinct: min ({min}) > max ({max})");
    assert!(
        count == 0 || count - 1 <= max - min,
        "sample_distinct: cannot draw {count} distinct values from [{min}, {max}]"
    );

    let mut drawn = Vec::with_capacity(count);
    while drawn.len() < count {
        let candidate = source.uniform_int(min, max);
        if !drawn.contains(&candidate) {
            drawn.push(candidate);
        }
    }
    drawn
}
