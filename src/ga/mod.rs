//! Genetic operators for binary chromosomes.
//!
//! Each operator is a pure function of its inputs and the draws it takes
//! from a [`RandomSource`](crate::random::RandomSource). Operators never call
//! each other.
//!
//! # Key Types
//!
//! - [`Population`]: `m × n` boolean gene matrix, one chromosome per row
//! - [`Survivors`]: selected rows together with their fitness
//! - [`MutationConfig`], [`CrossoverConfig`], [`SelectionConfig`]: operator parameters
//!
//! # Operators
//!
//! - [`bitflip_mutation`]: independent per-gene flips, elite rows untouched
//! - [`npoint_crossover`]: children from two distinct parents split at N points
//! - [`tournament_selection`]: k-tournaments over the non-elite rows
//!
//! # References
//!
//! - Eiben & Smith (2003), *Introduction to Evolutionary Computing*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod selection;
mod types;

pub use config::{CrossoverConfig, MutationConfig, SelectionConfig};
pub use operators::{bitflip_mutation, bitflip_mutation_in_place, npoint_crossover};
pub use selection::{run_tournament, tournament_selection};
pub use types::{Population, Survivors};
