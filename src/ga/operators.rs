//! Variation operators for binary chromosomes.
//!
//! # Mutation
//!
//! - [`bitflip_mutation`]: flip each non-elite gene with probability `Pm` — O(m·n)
//! - [`bitflip_mutation_in_place`]: same, writing into the caller's population
//!
//! # Crossover
//!
//! - [`npoint_crossover`]: N-point crossover, one child per requested slot — O(my·n)
//!
//! # References
//!
//! - Eiben & Smith (2003), *Introduction to Evolutionary Computing*, pp. 52-53

use super::config::{CrossoverConfig, MutationConfig};
use super::types::Population;
use crate::error::Result;
use crate::random::{sample_distinct, RandomSource};
use log::{debug, trace};

// ============================================================================
// Mutation operators
// ============================================================================

/// Bit-flip mutation into a new population.
///
/// Every gene of rows `elitism..m` is flipped independently with
/// probability `config.probability`. Elite rows are copied verbatim.
///
/// # Errors
/// [`InvalidArgument`](crate::GenopsError::InvalidArgument) if the
/// probability is outside `[0, 1]` or `elitism > m`.
///
/// # Examples
///
/// ```
/// use u_genops::ga::{bitflip_mutation, MutationConfig, Population};
/// use u_genops::random::seeded_source;
///
/// let pop = Population::from_rows(vec![
///     vec![true, false, true],
///     vec![false, true, false],
/// ]).unwrap();
/// let config = MutationConfig::default().with_probability(1.0).with_elitism(1);
/// let mutated = bitflip_mutation(&pop, &config, &mut seeded_source(0)).unwrap();
/// assert_eq!(mutated.row(0), &[true, false, true]);
/// assert_eq!(mutated.row(1), &[true, false, true]);
/// ```
pub fn bitflip_mutation<S: RandomSource + ?Sized>(
    population: &Population,
    config: &MutationConfig,
    source: &mut S,
) -> Result<Population> {
    config.validate(population.n_individuals())?;

    let mut mutated = population.clone();
    bitflip_mutation_in_place(&mut mutated, config, source)?;
    Ok(mutated)
}

/// Bit-flip mutation applied directly to `population`.
///
/// On error `population` is left untouched.
pub fn bitflip_mutation_in_place<S: RandomSource + ?Sized>(
    population: &mut Population,
    config: &MutationConfig,
    source: &mut S,
) -> Result<()> {
    config.validate(population.n_individuals())?;
    debug!(
        "bitflip mutation: {}x{} population, pm={}, elitism={}",
        population.n_individuals(),
        population.n_genes(),
        config.probability,
        config.elitism
    );

    let mut flipped = 0usize;
    for individual in config.elitism..population.n_individuals() {
        for gene in population.row_mut(individual) {
            if source.uniform_unit() < config.probability {
                *gene = !*gene;
                flipped += 1;
            }
        }
    }

    trace!("bitflip mutation flipped {flipped} genes");
    Ok(())
}

// ============================================================================
// Crossover operators
// ============================================================================

/// N-point crossover.
///
/// Produces `config.offspring` children. Each child gets its own pair of
/// distinct parents and its own `config.points` distinct crossover points,
/// and fills exactly one output row.
///
/// # Algorithm (Eiben & Smith, 2003)
///
/// 1. Draw parents `P1 != P2` uniformly from the pool
/// 2. Draw `N` distinct points from `[0, n-1]` and sort them
/// 3. Split the loci into `N + 1` segments at those points
/// 4. Copy even segments from `P1` and odd segments from `P2`
///
/// # Errors
/// [`InvalidArgument`](crate::GenopsError::InvalidArgument) if `N` is not in
/// `[1, n]` or the pool has fewer than 2 rows.
pub fn npoint_crossover<S: RandomSource + ?Sized>(
    parentpool: &Population,
    config: &CrossoverConfig,
    source: &mut S,
) -> Result<Population> {
    let m = parentpool.n_individuals();
    let n = parentpool.n_genes();
    config.validate(m, n)?;
    debug!(
        "{}-point crossover: {m}x{n} parent pool, {} children",
        config.points, config.offspring
    );

    let mut children = Population::with_capacity(config.offspring, n);
    for child in 0..config.offspring {
        let (p1, p2) = pick_parents(m, source);
        let points = crossover_points(n, config.points, source);
        trace!("child {child}: parents ({p1}, {p2}), points {points:?}");

        let genes = build_child(parentpool.row(p1), parentpool.row(p2), &points);
        children.push_row(&genes);
    }
    Ok(children)
}

/// Draws `count` distinct crossover points from `[0, n_genes - 1]`, sorted ascending.
///
/// # Panics
/// Panics if `count` is not in `[0, n_genes]` or `n_genes == 0`.
pub fn crossover_points<S: RandomSource + ?Sized>(
    n_genes: usize,
    count: usize,
    source: &mut S,
) -> Vec<usize> {
    assert!(n_genes > 0, "chromosomes must have at least one gene");
    let mut points = sample_distinct(source, 0, n_genes - 1, count);
    points.sort_unstable();
    points
}

/// Assembles one child from two parents and sorted crossover points.
///
/// A point `p` opens a new segment at locus `p`, so locus `j` belongs to
/// segment `#{points <= j}`. Even segments come from `parent1`, odd
/// segments from `parent2`.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn build_child(parent1: &[bool], parent2: &[bool], points: &[usize]) -> Vec<bool> {
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "parents must have equal length"
    );
    debug_assert!(points.windows(2).all(|w| w[0] < w[1]), "points must be sorted");

    let mut segment = 0;
    parent1
        .iter()
        .zip(parent2)
        .enumerate()
        .map(|(locus, (&a, &b))| {
            while segment < points.len() && points[segment] <= locus {
                segment += 1;
            }
            if segment % 2 == 0 {
                a
            } else {
                b
            }
        })
        .collect()
}

/// Two distinct row indices from `[0, m - 1]`; `P2` is redrawn until it differs.
fn pick_parents<S: RandomSource + ?Sized>(m: usize, source: &mut S) -> (usize, usize) {
    let p1 = source.uniform_int(0, m - 1);
    let mut p2 = source.uniform_int(0, m - 1);
    while p2 == p1 {
        p2 = source.uniform_int(0, m - 1);
    }
    (p1, p2)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenopsError;
    use crate::random::testing::ScriptedSource;
    use crate::random::seeded_source;
    use proptest::prelude::*;

    fn pop(rows: &[&[u8]]) -> Population {
        Population::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|&g| g == 1).collect())
                .collect(),
        )
        .unwrap()
    }

    fn random_population(rows: usize, cols: usize, seed: u64) -> Population {
        let mut source = seeded_source(seed);
        let genes = (0..rows * cols)
            .map(|_| source.uniform_int(0, 1) == 1)
            .collect();
        Population::from_flat(rows, cols, genes).unwrap()
    }

    // ---- Bit-flip mutation ----

    #[test]
    fn test_mutation_scenario_with_elite_row() {
        let population = pop(&[&[1, 0, 1], &[0, 1, 0]]);
        let config = MutationConfig::default()
            .with_probability(1.0)
            .with_elitism(1);
        let mutated = bitflip_mutation(&population, &config, &mut seeded_source(42)).unwrap();
        assert_eq!(mutated, pop(&[&[1, 0, 1], &[1, 0, 1]]));
    }

    #[test]
    fn test_mutation_zero_probability_is_identity() {
        let population = random_population(20, 16, 1);
        let config = MutationConfig::default().with_probability(0.0);
        let mutated = bitflip_mutation(&population, &config, &mut seeded_source(42)).unwrap();
        assert_eq!(mutated, population);
    }

    #[test]
    fn test_mutation_full_probability_complements() {
        let population = random_population(20, 16, 2);
        let config = MutationConfig::default().with_probability(1.0);
        let mutated = bitflip_mutation(&population, &config, &mut seeded_source(42)).unwrap();
        assert_eq!(mutated, population.complement());
    }

    #[test]
    fn test_mutation_flip_rate_matches_probability() {
        let population = Population::new(200, 100);
        let config = MutationConfig::default().with_probability(0.1);
        let mutated = bitflip_mutation(&population, &config, &mut seeded_source(7)).unwrap();
        let flipped = mutated.as_slice().iter().filter(|&&g| g).count();
        // Expected 2000 of 20000.
        assert!(
            (1700..2300).contains(&flipped),
            "flip count {flipped} far from expectation"
        );
    }

    #[test]
    fn test_mutation_all_rows_elite() {
        let population = random_population(4, 8, 3);
        let config = MutationConfig::default()
            .with_probability(1.0)
            .with_elitism(4);
        let mutated = bitflip_mutation(&population, &config, &mut seeded_source(0)).unwrap();
        assert_eq!(mutated, population);
    }

    #[test]
    fn test_mutation_in_place() {
        let mut population = pop(&[&[1, 1], &[0, 0]]);
        let config = MutationConfig::default().with_probability(1.0);
        bitflip_mutation_in_place(&mut population, &config, &mut seeded_source(0)).unwrap();
        assert_eq!(population, pop(&[&[0, 0], &[1, 1]]));
    }

    #[test]
    fn test_mutation_rejects_bad_probability_without_drawing() {
        let population = pop(&[&[1, 0]]);
        let config = MutationConfig::default().with_probability(1.5);
        // An empty script panics on any draw.
        let err = bitflip_mutation(&population, &config, &mut ScriptedSource::default());
        assert!(matches!(err, Err(GenopsError::InvalidArgument(_))));
    }

    #[test]
    fn test_mutation_rejects_elitism_beyond_population() {
        let mut population = pop(&[&[1, 0], &[0, 1]]);
        let before = population.clone();
        let config = MutationConfig::default().with_elitism(3);
        let err = bitflip_mutation_in_place(&mut population, &config, &mut ScriptedSource::default());
        assert!(err.is_err());
        assert_eq!(population, before);
    }

    // ---- N-point crossover ----

    #[test]
    fn test_crossover_scenario_forced_point() {
        let parents = pop(&[&[1, 1, 1, 1], &[0, 0, 0, 0]]);
        let config = CrossoverConfig::default().with_points(1).with_offspring(1);

        // P1 = 0, P2 = 1, point = 2
        let mut source = ScriptedSource::with_ints(&[0, 1, 2]);
        let children = npoint_crossover(&parents, &config, &mut source).unwrap();
        assert_eq!(children, pop(&[&[1, 1, 0, 0]]));

        // P1 = 1, P2 = 0, point = 2
        let mut source = ScriptedSource::with_ints(&[1, 0, 2]);
        let children = npoint_crossover(&parents, &config, &mut source).unwrap();
        assert_eq!(children, pop(&[&[0, 0, 1, 1]]));
    }

    #[test]
    fn test_crossover_redraws_same_parent() {
        let parents = pop(&[&[1, 1, 1], &[0, 0, 0], &[1, 0, 1]]);
        let config = CrossoverConfig::default().with_points(1).with_offspring(1);
        // P1 = 2, P2 drawn 2 twice before settling on 1, point = 1
        let mut source = ScriptedSource::with_ints(&[2, 2, 2, 1, 1]);
        let children = npoint_crossover(&parents, &config, &mut source).unwrap();
        assert_eq!(children, pop(&[&[1, 0, 0]]));
    }

    #[test]
    fn test_crossover_redraws_duplicate_points() {
        let parents = pop(&[&[1, 1, 1, 1, 1], &[0, 0, 0, 0, 0]]);
        let config = CrossoverConfig::default().with_points(2).with_offspring(1);
        // parents (0, 1), points 3, 3 (dup), 1 -> sorted [1, 3]
        let mut source = ScriptedSource::with_ints(&[0, 1, 3, 3, 1]);
        let children = npoint_crossover(&parents, &config, &mut source).unwrap();
        assert_eq!(children, pop(&[&[1, 0, 0, 1, 1]]));
    }

    #[test]
    fn test_build_child_single_point_is_classic() {
        let p1 = [true; 6];
        let p2 = [false; 6];
        for point in 0..6 {
            let child = build_child(&p1, &p2, &[point]);
            let expected: Vec<bool> = (0..6).map(|j| j < point).collect();
            assert_eq!(child, expected, "point {point}");
        }
    }

    #[test]
    fn test_build_child_alternates_segments() {
        let p1 = [true; 8];
        let p2 = [false; 8];
        let child = build_child(&p1, &p2, &[2, 3, 6]);
        assert_eq!(
            child,
            vec![true, true, false, true, true, true, false, false]
        );
    }

    #[test]
    fn test_crossover_every_locus_a_point() {
        let parents = pop(&[&[1, 1, 1, 1], &[0, 0, 0, 0]]);
        let config = CrossoverConfig::default().with_points(4).with_offspring(100);
        let children = npoint_crossover(&parents, &config, &mut seeded_source(42)).unwrap();

        let a = vec![false, true, false, true];
        let b = vec![true, false, true, false];
        let mut seen = (false, false);
        for child in children.rows() {
            if child == a.as_slice() {
                seen.0 = true;
            } else if child == b.as_slice() {
                seen.1 = true;
            } else {
                panic!("unexpected child {child:?}");
            }
        }
        assert!(seen.0 && seen.1, "both parent orders should occur");
    }

    #[test]
    fn test_crossover_odd_offspring_count() {
        let parents = random_population(5, 12, 9);
        let config = CrossoverConfig::default().with_points(3).with_offspring(7);
        let children = npoint_crossover(&parents, &config, &mut seeded_source(1)).unwrap();
        assert_eq!(children.n_individuals(), 7);
        assert_eq!(children.n_genes(), 12);
    }

    #[test]
    fn test_crossover_zero_offspring() {
        let parents = random_population(2, 4, 0);
        let config = CrossoverConfig::default().with_points(1).with_offspring(0);
        let children = npoint_crossover(&parents, &config, &mut ScriptedSource::default()).unwrap();
        assert!(children.is_empty());
        assert_eq!(children.n_genes(), 4);
    }

    #[test]
    fn test_crossover_rejects_bad_points() {
        let parents = random_population(4, 4, 0);
        let mut source = ScriptedSource::default();
        for points in [0, 5] {
            let config = CrossoverConfig::default().with_points(points).with_offspring(2);
            let err = npoint_crossover(&parents, &config, &mut source).unwrap_err();
            assert!(err.to_string().contains("crossover point count out of range"));
        }
    }

    #[test]
    fn test_crossover_rejects_single_parent() {
        let parents = random_population(1, 4, 0);
        let config = CrossoverConfig::default().with_points(1).with_offspring(2);
        assert!(npoint_crossover(&parents, &config, &mut ScriptedSource::default()).is_err());
    }

    #[test]
    fn test_crossover_points_sorted_and_distinct() {
        let mut source = seeded_source(11);
        for _ in 0..200 {
            let points = crossover_points(10, 4, &mut source);
            assert_eq!(points.len(), 4);
            assert!(points.windows(2).all(|w| w[0] < w[1]), "{points:?}");
            assert!(points.iter().all(|&p| p < 10));
        }
    }

    proptest! {
        #[test]
        fn prop_mutation_preserves_elite_rows(
            seed in any::<u64>(),
            rows in 1usize..12,
            cols in 1usize..12,
            pm in 0.0f64..=1.0,
            elite_frac in 0.0f64..=1.0,
        ) {
            let population = random_population(rows, cols, seed);
            let elitism = (rows as f64 * elite_frac) as usize;
            let config = MutationConfig::default()
                .with_probability(pm)
                .with_elitism(elitism);
            let mutated = bitflip_mutation(&population, &config, &mut seeded_source(seed ^ 1))
                .unwrap();

            prop_assert_eq!(mutated.n_individuals(), rows);
            prop_assert_eq!(mutated.n_genes(), cols);
            for i in 0..elitism {
                prop_assert_eq!(mutated.row(i), population.row(i));
            }
        }

        #[test]
        fn prop_crossover_children_come_from_two_parents(
            seed in any::<u64>(),
            rows in 2usize..6,
            cols in 1usize..10,
            point_frac in 0.0f64..1.0,
            offspring in 0usize..8,
        ) {
            let parents = random_population(rows, cols, seed);
            let points = 1 + (point_frac * cols as f64) as usize;
            let config = CrossoverConfig::default()
                .with_points(points.min(cols))
                .with_offspring(offspring);
            let children = npoint_crossover(&parents, &config, &mut seeded_source(seed ^ 2))
                .unwrap();

            prop_assert_eq!(children.n_individuals(), offspring);
            prop_assert_eq!(children.n_genes(), cols);
            for child in children.rows() {
                let explained = (0..rows).any(|p1| {
                    (0..rows).filter(|&p2| p2 != p1).any(|p2| {
                        child.iter().enumerate().all(|(j, &g)| {
                            g == parents.get(p1, j) || g == parents.get(p2, j)
                        })
                    })
                });
                prop_assert!(explained, "child {:?} not built from any parent pair", child);
            }
        }
    }
}
