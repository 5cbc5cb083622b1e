//! Population model shared by the operators.
//!
//! A [`Population`] is an `m × n` matrix of boolean genes stored row-major:
//! each row is one chromosome, each column one gene locus. Row order matters
//! because operators with an elitism parameter treat a prefix of rows as
//! protected.

use crate::error::{GenopsError, Result};

/// An `m × n` matrix of binary chromosomes.
///
/// # Examples
///
/// ```
/// use u_genops::ga::Population;
///
/// let pop = Population::from_rows(vec![
///     vec![true, false, true],
///     vec![false, true, false],
/// ]).unwrap();
/// assert_eq!(pop.n_individuals(), 2);
/// assert_eq!(pop.n_genes(), 3);
/// assert_eq!(pop.row(1), &[false, true, false]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Population {
    rows: usize,
    cols: usize,
    genes: Vec<bool>,
}

impl Population {
    /// Creates a population of `rows` chromosomes with `cols` genes, all `false`.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            genes: vec![false; rows * cols],
        }
    }

    /// Builds a population from one `Vec<bool>` per chromosome.
    ///
    /// Returns [`GenopsError::InvalidArgument`] if the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|r| r.len() != cols) {
            return Err(GenopsError::invalid(format!(
                "row {bad} has {} genes, expected {cols}",
                rows[bad].len()
            )));
        }
        let n_rows = rows.len();
        Ok(Self {
            rows: n_rows,
            cols,
            genes: rows.into_iter().flatten().collect(),
        })
    }

    /// Builds a population from a row-major gene buffer.
    ///
    /// Returns [`GenopsError::InvalidArgument`] if `genes.len() != rows * cols`.
    pub fn from_flat(rows: usize, cols: usize, genes: Vec<bool>) -> Result<Self> {
        if rows.checked_mul(cols) != Some(genes.len()) {
            return Err(GenopsError::invalid(format!(
                "gene buffer of length {} does not fit a {rows}x{cols} population",
                genes.len()
            )));
        }
        Ok(Self { rows, cols, genes })
    }

    /// Number of chromosomes (`m`).
    pub fn n_individuals(&self) -> usize {
        self.rows
    }

    /// Number of genes per chromosome (`n`).
    pub fn n_genes(&self) -> usize {
        self.cols
    }

    /// Returns `true` if the population has no chromosomes.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Gene at (`individual`, `locus`).
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    pub fn get(&self, individual: usize, locus: usize) -> bool {
        assert!(locus < self.cols, "locus {locus} out of bounds");
        self.row(individual)[locus]
    }

    /// Chromosome at row `individual`.
    ///
    /// # Panics
    /// Panics if `individual >= n_individuals()`.
    pub fn row(&self, individual: usize) -> &[bool] {
        assert!(
            individual < self.rows,
            "individual {individual} out of bounds for {} rows",
            self.rows
        );
        let start = individual * self.cols;
        &self.genes[start..start + self.cols]
    }

    /// Mutable chromosome at row `individual`.
    ///
    /// # Panics
    /// Panics if `individual >= n_individuals()`.
    pub fn row_mut(&mut self, individual: usize) -> &mut [bool] {
        assert!(
            individual < self.rows,
            "individual {individual} out of bounds for {} rows",
            self.rows
        );
        let start = individual * self.cols;
        &mut self.genes[start..start + self.cols]
    }

    /// Iterates over chromosomes in row order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[bool]> + '_ {
        // Indexed by hand: chunks_exact rejects a zero chunk size when n = 0.
        (0..self.rows).map(move |i| &self.genes[i * self.cols..(i + 1) * self.cols])
    }

    /// Row-major gene buffer.
    pub fn as_slice(&self) -> &[bool] {
        &self.genes
    }

    /// Splits the population into one `Vec<bool>` per chromosome.
    pub fn into_rows(self) -> Vec<Vec<bool>> {
        self.rows().map(<[bool]>::to_vec).collect()
    }

    /// Bitwise complement of every gene.
    pub fn complement(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            genes: self.genes.iter().map(|&g| !g).collect(),
        }
    }

    /// Appends a chromosome copied from `genes`.
    pub(crate) fn push_row(&mut self, genes: &[bool]) {
        debug_assert_eq!(genes.len(), self.cols);
        self.genes.extend_from_slice(genes);
        self.rows += 1;
    }

    /// Empty population with room for `rows` chromosomes of `cols` genes.
    pub(crate) fn with_capacity(rows: usize, cols: usize) -> Self {
        Self {
            rows: 0,
            cols,
            genes: Vec::with_capacity(rows * cols),
        }
    }
}

/// Output of tournament selection: the winning chromosomes and their fitness.
///
/// `fitness[i]` always belongs to `population.row(i)`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Survivors {
    /// Selected chromosomes, one per tournament, in tournament order.
    pub population: Population,
    /// Fitness of each selected chromosome.
    pub fitness: Vec<f64>,
}

impl Survivors {
    /// Number of survivors.
    pub fn len(&self) -> usize {
        self.fitness.len()
    }

    /// Returns `true` if no tournament was run.
    pub fn is_empty(&self) -> bool {
        self.fitness.is_empty()
    }
}
