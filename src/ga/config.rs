//! Operator parameters.
//!
//! Each operator takes a small parameter object with a `Default`, builder
//! methods, and a `validate` that checks every precondition against the
//! shape of the population it will run on.
//!
//! # Builder Pattern
//!
//! ```
//! use u_genops::ga::{MutationConfig, SelectionConfig};
//!
//! let mutation = MutationConfig::default()
//!     .with_probability(1.0 / 256.0)
//!     .with_elitism(3);
//!
//! let selection = SelectionConfig::default()
//!     .with_tournament_size(3)
//!     .with_survivors(50)
//!     .with_elitism(2);
//! ```

use crate::error::{GenopsError, Result};

/// Parameters for bit-flip mutation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MutationConfig {
    /// Independent per-gene flip probability `Pm` in `[0, 1]`.
    pub probability: f64,

    /// Number of leading rows excluded from mutation.
    pub elitism: usize,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            probability: 0.01,
            elitism: 0,
        }
    }
}

impl MutationConfig {
    /// Sets the per-gene flip probability.
    ///
    /// Not clamped: out-of-range values are reported by [`validate`](Self::validate).
    pub fn with_probability(mut self, pm: f64) -> Self {
        self.probability = pm;
        self
    }

    /// Sets the number of elite rows.
    pub fn with_elitism(mut self, rows: usize) -> Self {
        self.elitism = rows;
        self
    }

    /// Checks the parameters against a population of `n_individuals` rows.
    pub fn validate(&self, n_individuals: usize) -> Result<()> {
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(GenopsError::invalid(format!(
                "mutation probability {} outside [0, 1]",
                self.probability
            )));
        }
        if self.elitism > n_individuals {
            return Err(GenopsError::invalid(format!(
                "elitism {} exceeds population size {n_individuals}",
                self.elitism
            )));
        }
        Ok(())
    }
}

/// Parameters for N-point crossover.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrossoverConfig {
    /// Number of crossover points `N` in `[1, n_genes]`.
    pub points: usize,

    /// Number of children to produce.
    pub offspring: usize,
}

impl Default for CrossoverConfig {
    fn default() -> Self {
        Self {
            points: 2,
            offspring: 0,
        }
    }
}

impl CrossoverConfig {
    /// Sets the number of crossover points.
    pub fn with_points(mut self, n: usize) -> Self {
        self.points = n;
        self
    }

    /// Sets the number of children.
    pub fn with_offspring(mut self, n: usize) -> Self {
        self.offspring = n;
        self
    }

    /// Checks the parameters against an `n_individuals × n_genes` parent pool.
    pub fn validate(&self, n_individuals: usize, n_genes: usize) -> Result<()> {
        if self.points < 1 || self.points > n_genes {
            return Err(GenopsError::invalid(format!(
                "crossover point count out of range: {} not in [1, {n_genes}]",
                self.points
            )));
        }
        if n_individuals < 2 {
            return Err(GenopsError::invalid(format!(
                "crossover needs at least 2 parents, got {n_individuals}"
            )));
        }
        Ok(())
    }
}

/// Parameters for k-tournament selection.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionConfig {
    /// Contenders per tournament (`k`).
    ///
    /// - k=2: light pressure
    /// - k=3-5: moderate pressure
    /// - k = eligible rows: always picks the fittest eligible row
    pub tournament_size: usize,

    /// Number of tournaments to run, one survivor each.
    pub survivors: usize,

    /// Number of leading rows that never enter a tournament.
    pub elitism: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            tournament_size: 3,
            survivors: 0,
            elitism: 0,
        }
    }
}

impl SelectionConfig {
    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the number of survivors.
    pub fn with_survivors(mut self, n: usize) -> Self {
        self.survivors = n;
        self
    }

    /// Sets the number of elite rows.
    pub fn with_elitism(mut self, rows: usize) -> Self {
        self.elitism = rows;
        self
    }

    /// Checks the parameters against a population of `n_individuals` rows.
    pub fn validate(&self, n_individuals: usize) -> Result<()> {
        if self.elitism > n_individuals {
            return Err(GenopsError::invalid(format!(
                "elitism {} exceeds population size {n_individuals}",
                self.elitism
            )));
        }
        let eligible = n_individuals - self.elitism;
        if self.tournament_size < 1 || self.tournament_size > eligible {
            return Err(GenopsError::invalid(format!(
                "tournament size {} not in [1, {eligible}] (non-elite rows)",
                self.tournament_size
            )));
        }
        Ok(())
    }
}
