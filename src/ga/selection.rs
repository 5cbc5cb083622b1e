//! Tournament selection.
//!
//! Survivors are chosen by running independent k-tournaments over the
//! non-elite rows. Higher fitness is better.
//!
//! # References
//!
//! - Eiben & Smith (2003), *Introduction to Evolutionary Computing*, pp. 84-85
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::config::SelectionConfig;
use super::types::{Population, Survivors};
use crate::error::{GenopsError, Result};
use crate::random::{sample_distinct, RandomSource};
use log::{debug, trace};

/// k-tournament selection.
///
/// Runs `config.survivors` tournaments. Each draws `config.tournament_size`
/// distinct contenders from rows `elitism..m` and keeps the fittest; the
/// winner's row and fitness are appended in tournament order.
///
/// Elite rows never compete. Preserving them in the next generation is the
/// caller's job.
///
/// # Errors
/// [`InvalidArgument`](GenopsError::InvalidArgument) if `fitness.len() != m`,
/// `elitism > m`, or the tournament size is not in `[1, m - elitism]`.
///
/// # Examples
///
/// ```
/// use u_genops::ga::{tournament_selection, Population, SelectionConfig};
/// use u_genops::random::seeded_source;
///
/// let pop = Population::from_rows(vec![
///     vec![false, false],
///     vec![true, true],
///     vec![true, false],
/// ]).unwrap();
/// let fitness = [0.1, 0.9, 0.5];
/// let config = SelectionConfig::default().with_tournament_size(3).with_survivors(1);
///
/// let out = tournament_selection(&pop, &fitness, &config, &mut seeded_source(1)).unwrap();
/// assert_eq!(out.population.row(0), &[true, true]);
/// assert_eq!(out.fitness, vec![0.9]);
/// ```
pub fn tournament_selection<S: RandomSource + ?Sized>(
    population: &Population,
    fitness: &[f64],
    config: &SelectionConfig,
    source: &mut S,
) -> Result<Survivors> {
    let m = population.n_individuals();
    if fitness.len() != m {
        return Err(GenopsError::invalid(format!(
            "fitness vector has {} entries for {m} individuals",
            fitness.len()
        )));
    }
    config.validate(m)?;
    debug!(
        "tournament selection: k={}, {} survivors from {m} rows ({} elite)",
        config.tournament_size, config.survivors, config.elitism
    );

    let mut winners = Population::with_capacity(config.survivors, population.n_genes());
    let mut winner_fitness = Vec::with_capacity(config.survivors);
    for round in 0..config.survivors {
        let contenders = sample_distinct(source, config.elitism, m - 1, config.tournament_size);
        let winner = run_tournament(fitness, &contenders);
        trace!("tournament {round}: contenders {contenders:?}, winner {winner}");

        winners.push_row(population.row(winner));
        winner_fitness.push(fitness[winner]);
    }

    Ok(Survivors {
        population: winners,
        fitness: winner_fitness,
    })
}

/// Index of the fittest contender.
///
/// Only a strictly greater fitness replaces the current best, so ties go to
/// the contender drawn first. A `NaN` fitness never wins unless it was drawn
/// first.
///
/// # Panics
/// Panics if `contenders` is empty or holds an index outside `fitness`.
pub fn run_tournament(fitness: &[f64], contenders: &[usize]) -> usize {
    let (&first, rest) = contenders
        .split_first()
        .expect("tournament needs at least one contender");

    let mut best = first;
    for &idx in rest {
        if fitness[idx] > fitness[best] {
            best = idx;
        }
    }
    best
}
