//! Stochastic genetic operators for binary-encoded individuals.
//!
//! Provides the three operators used inside a generational GA loop:
//!
//! - **Bit-flip mutation**: flips each non-elite gene with probability `Pm`.
//! - **N-point crossover**: builds each child from two distinct parents
//!   split at `N` distinct random points.
//! - **Tournament selection**: runs independent k-tournaments over the
//!   non-elite rows and returns the winners with their fitness.
//!
//! The operators live in [`ga`] and take an explicit
//! [`RandomSource`](random::RandomSource). The functions at the crate root
//! ([`mutate`], [`crossover`], [`select`]) use the calling thread's
//! long-lived source instead.
//!
//! # Architecture
//!
//! Every call validates its arguments before drawing randomness or
//! allocating output and returns [`GenopsError::InvalidArgument`] on any
//! violated precondition. The crate logs through the `log` facade and
//! never installs a logger.

pub mod error;
pub mod ga;
pub mod random;

pub use error::{GenopsError, Result};

use ga::{CrossoverConfig, MutationConfig, Population, SelectionConfig, Survivors};
use random::with_thread_source;

/// Bit-flip mutation with the thread's random source.
///
/// Rows `0..elitism_no` are copied unchanged.
pub fn mutate(population: &Population, pm: f64, elitism_no: usize) -> Result<Population> {
    let config = MutationConfig::default()
        .with_probability(pm)
        .with_elitism(elitism_no);
    with_thread_source(|source| ga::bitflip_mutation(population, &config, source))
}

/// N-point crossover producing `my` children, with the thread's random source.
pub fn crossover(parentpool: &Population, n: usize, my: usize) -> Result<Population> {
    let config = CrossoverConfig::default().with_points(n).with_offspring(my);
    with_thread_source(|source| ga::npoint_crossover(parentpool, &config, source))
}

/// Runs `no_survivors` k-tournaments over rows `eliterows..m`, with the
/// thread's random source.
pub fn select(
    k: usize,
    fitness: &[f64],
    population: &Population,
    no_survivors: usize,
    eliterows: usize,
) -> Result<Survivors> {
    let config = SelectionConfig::default()
        .with_tournament_size(k)
        .with_survivors(no_survivors)
        .with_elitism(eliterows);
    with_thread_source(|source| ga::tournament_selection(population, fitness, &config, source))
}
