//! GA evolutionary loop execution.
//!
//! One generation ([`reproduce`]):
//!
//! 1. Draw `count` parents from the population by roulette wheel.
//! 2. Pair parents `(0, 1), (2, 3), ...`; with an odd `count` the last
//!    parent takes no part in crossover.
//! 3. Each pair yields two children by three-segment crossover; each child
//!    gets one mutation trial.
//! 4. Infeasible children are discarded.
//! 5. The next generation is a second roulette draw of `count` candidates
//!    over `parents ∪ surviving children`.
//!
//! [`run`] applies [`reproduce`] a fixed number of times to an initial
//! random population. [`GaRunner`] wraps the same loop behind a
//! [`GaConfig`] and records statistics.

use super::config::GaConfig;
use super::operators::{mutate, three_segment_crossover};
use super::selection::select;
use super::types::{best_candidate, Candidate, Catalog, Chromosome, Population};
use crate::error::Result;
use crate::random::{rng_from_seed, RandomSource};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The population after the last generation.
    pub population: Population,

    /// The highest-value candidate of the final population (first on ties).
    ///
    /// `None` only when the population is empty, which requires a run of
    /// zero generations over an empty initial population.
    pub best: Option<Candidate>,

    /// Total number of generations executed.
    pub generations: usize,

    /// Number of feasible candidates in the initial population.
    pub initial_population_size: usize,

    /// Best total value after initialisation and after each generation.
    pub value_history: Vec<u64>,
}

impl GaResult {
    /// Best total value of the final population, `0` if it is empty.
    pub fn best_value(&self) -> u64 {
        self.best.as_ref().map_or(0, Candidate::total_value)
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use knapsack_ga::ga::{Catalog, GaConfig, GaRunner};
///
/// let catalog = Catalog::from_pairs([(2, 3), (3, 4), (4, 5), (5, 6)]);
/// let config = GaConfig::new(5)
///     .with_population_size(8)
///     .with_max_generations(20)
///     .with_seed(3);
/// match GaRunner::run(&catalog, &config) {
///     Ok(result) => assert!(result.best_value() <= 7),
///     Err(e) => println!("run collapsed: {e}"),
/// }
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with a generator seeded from `config.seed`.
    pub fn run(catalog: &Catalog, config: &GaConfig) -> Result<GaResult> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(catalog, config, &mut rng)
    }

    /// Runs the GA drawing from `rng`; `config.seed` is ignored.
    pub fn run_with_rng<R: RandomSource>(
        catalog: &Catalog,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult> {
        config.validate()?;

        tracing::info!(
            items = catalog.len(),
            capacity = config.capacity,
            population = config.population_size,
            mutation_rate = config.mutation_rate,
            generations = config.max_generations,
            "starting knapsack GA"
        );

        let mut population =
            initial_population(config.population_size, catalog, config.capacity, rng)?;
        let initial_population_size = population.len();

        let mut value_history = Vec::with_capacity(config.max_generations + 1);
        value_history.push(best_value(&population));

        for generation in 0..config.max_generations {
            population = breed(
                &population,
                config.population_size,
                catalog,
                config.capacity,
                config.mutation_rate,
                config.parallel,
                rng,
            )?;
            let best = best_value(&population);
            value_history.push(best);
            tracing::debug!(generation, best, "generation complete");
        }

        let best = best_candidate(&population).cloned();
        tracing::info!(
            best_value = best.as_ref().map_or(0, Candidate::total_value),
            "knapsack GA finished"
        );

        Ok(GaResult {
            population,
            best,
            generations: config.max_generations,
            initial_population_size,
            value_history,
        })
    }
}

/// Runs the evolution loop and returns the final population.
///
/// Draws an initial population of `population_count` random candidates
/// (infeasible ones discarded), then applies [`reproduce`] exactly
/// `generations` times.
///
/// # Errors
/// [`GaError::EmptyPopulation`](crate::GaError::EmptyPopulation) if no initial candidate is feasible and
/// `generations > 0`; [`GaError::InvalidConfig`](crate::GaError::InvalidConfig) for out-of-range
/// parameters.
pub fn run<R: RandomSource>(
    catalog: &Catalog,
    capacity: u64,
    population_count: usize,
    mutation_rate: f64,
    generations: usize,
    rng: &mut R,
) -> Result<Population> {
    let config = GaConfig {
        capacity,
        population_size: population_count,
        mutation_rate,
        max_generations: generations,
        ..GaConfig::default()
    };
    GaRunner::run_with_rng(catalog, &config, rng).map(|result| result.population)
}

/// Draws `count` uniformly random chromosomes, keeping only feasible ones.
///
/// Infeasible draws are not replaced, so the result may hold fewer than
/// `count` candidates.
pub fn initial_population<R: RandomSource>(
    count: usize,
    catalog: &Catalog,
    capacity: u64,
    rng: &mut R,
) -> Result<Population> {
    let mut population = Vec::with_capacity(count);
    for _ in 0..count {
        let chromosome: Chromosome = (0..catalog.len()).map(|_| rng.next_bit()).collect();
        let candidate = Candidate::new(catalog, chromosome)?;
        if candidate.is_feasible(capacity) {
            population.push(candidate);
        }
    }

    if population.len() < count {
        tracing::warn!(
            requested = count,
            feasible = population.len(),
            "initial population smaller than requested"
        );
    }
    Ok(population)
}

/// Produces the next generation of exactly `count` candidates.
///
/// # Errors
/// [`GaError::EmptyPopulation`](crate::GaError::EmptyPopulation) if `population` is empty and `count > 0`.
pub fn reproduce<R: RandomSource>(
    population: &[Candidate],
    count: usize,
    catalog: &Catalog,
    capacity: u64,
    mutation_rate: f64,
    rng: &mut R,
) -> Result<Population> {
    breed(population, count, catalog, capacity, mutation_rate, false, rng)
}

fn breed<R: RandomSource>(
    population: &[Candidate],
    count: usize,
    catalog: &Catalog,
    capacity: u64,
    mutation_rate: f64,
    parallel: bool,
    rng: &mut R,
) -> Result<Population> {
    let parents = select(population, count, rng)?;

    // All draws happen here, in order, before any evaluation.
    let mut children: Vec<Chromosome> = Vec::with_capacity(parents.len());
    for pair in parents.chunks_exact(2) {
        let (mut c1, mut c2) = three_segment_crossover(pair[0].chromosome(), pair[1].chromosome())?;
        mutate(&mut c1, mutation_rate, rng);
        mutate(&mut c2, mutation_rate, rng);
        children.push(c1);
        children.push(c2);
    }

    let offspring = evaluate_children(catalog, children, parallel)?;
    let survivors: Vec<Candidate> = offspring
        .into_iter()
        .filter(|c| c.is_feasible(capacity))
        .collect();

    tracing::trace!(
        parents = parents.len(),
        survivors = survivors.len(),
        "offspring filtered"
    );

    let mut pool = parents;
    pool.extend(survivors);
    select(&pool, count, rng)
}

#[cfg(feature = "parallel")]
fn evaluate_children(
    catalog: &Catalog,
    children: Vec<Chromosome>,
    parallel: bool,
) -> Result<Vec<Candidate>> {
    if parallel {
        children
            .into_par_iter()
            .map(|c| Candidate::new(catalog, c))
            .collect()
    } else {
        children
            .into_iter()
            .map(|c| Candidate::new(catalog, c))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_children(
    catalog: &Catalog,
    children: Vec<Chromosome>,
    _parallel: bool,
) -> Result<Vec<Candidate>> {
    children
        .into_iter()
        .map(|c| Candidate::new(catalog, c))
        .collect()
}

fn best_value(population: &[Candidate]) -> u64 {
    best_candidate(population).map_or(0, Candidate::total_value)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::fitness::evaluate;
    use crate::GaError;
    use crate::random::{create_rng, ScriptedSource};
    use proptest::prelude::*;

    fn small_catalog() -> Catalog {
        Catalog::from_pairs([(2, 3), (3, 4), (4, 5), (5, 6)])
    }

    /// First seed whose initial draw yields at least one feasible candidate.
    fn viable_seed(catalog: &Catalog, capacity: u64, count: usize) -> u64 {
        (0..1000)
            .find(|&seed| {
                let mut rng = create_rng(seed);
                !initial_population(count, catalog, capacity, &mut rng)
                    .unwrap()
                    .is_empty()
            })
            .expect("some seed yields a feasible candidate")
    }

    fn assert_cache_fresh(catalog: &Catalog, population: &[Candidate]) {
        for c in population {
            let (value, weight) = evaluate(catalog, c.chromosome()).unwrap();
            assert_eq!(c.total_value(), value);
            assert_eq!(c.total_weight(), weight);
        }
    }

    // ---- Initial population ----

    #[test]
    fn test_initial_population_filters_infeasible() {
        let cat = small_catalog();
        // draws: 1111 (w14, dropped), 1000 (w2), 0100 (w3), 1100 (w5)
        let mut src = ScriptedSource::new().with_bits(&[
            true, true, true, true, //
            true, false, false, false, //
            false, true, false, false, //
            true, true, false, false,
        ]);
        let pop = initial_population(4, &cat, 5, &mut src).unwrap();
        assert_eq!(pop.len(), 3);
        assert_eq!(pop[0].chromosome(), &[true, false, false, false]);
        assert_eq!(pop[1].chromosome(), &[false, true, false, false]);
        assert_eq!(pop[2].chromosome(), &[true, true, false, false]);
        assert!(pop.iter().all(|c| c.total_weight() <= 5));
        assert_cache_fresh(&cat, &pop);
    }

    #[test]
    fn test_initial_population_may_be_empty() {
        let cat = small_catalog();
        let mut src = ScriptedSource::new().with_bits(&[true; 8]);
        let pop = initial_population(2, &cat, 5, &mut src).unwrap();
        assert!(pop.is_empty());
    }

    // ---- Reproduce ----

    #[test]
    fn test_reproduce_scripted_generation() {
        let cat = Catalog::from_pairs([(1, 1), (1, 1), (1, 1)]);
        let a = Candidate::new(&cat, vec![true, false, false]).unwrap();
        let b = Candidate::new(&cat, vec![false, false, true]).unwrap();
        let pop = vec![a.clone(), b.clone()];

        // parent draws: total 2, 0.1 -> a, 0.9 -> b
        // mutation trials: none (rate 0 never flips)
        // children (p1 = 1, p2 = 2): [1,0,0] and [0,0,1]
        // final draws over pool [a, b, c1, c2] (total 4)
        let mut src = ScriptedSource::new().with_units(&[
            0.1, 0.9, // parents
            0.5, 0.5, // mutation trials
            0.0, 0.3, // a, b
        ]);
        let next = reproduce(&pop, 2, &cat, 3, 0.0, &mut src).unwrap();
        assert_eq!(next, vec![a, b]);
        assert!(src.units.is_empty());
    }

    #[test]
    fn test_reproduce_discards_infeasible_children() {
        let cat = Catalog::from_pairs([(1, 1), (1, 1), (1, 1)]);
        let a = Candidate::new(&cat, vec![true, false, false]).unwrap();
        let b = Candidate::new(&cat, vec![false, true, true]).unwrap();
        let pop = vec![a.clone(), b.clone()];

        // parents a, b; children [1,1,0] (w2) and [0,0,1] (w1); the first
        // child mutates at index 2 -> [1,1,1] (w3 > capacity 2, dropped)
        // pool = [a, b, c2], values 1 + 2 + 1 = 4
        let mut src = ScriptedSource::new()
            .with_units(&[
                0.1, 0.9, // parents: total 3, thresholds 0.3 -> a, 2.7 -> b
                0.99, 0.0, // mutate c1, leave c2
                0.99, 0.99, // final draws: threshold 3.96 -> c2 both times
            ])
            .with_indices(&[2]);
        let next = reproduce(&pop, 2, &cat, 2, 0.5, &mut src).unwrap();
        let c2 = Candidate::new(&cat, vec![false, false, true]).unwrap();
        assert_eq!(next, vec![c2.clone(), c2]);
    }

    #[test]
    fn test_reproduce_odd_count_skips_last_parent() {
        let cat = Catalog::from_pairs([(1, 1), (1, 1), (1, 1)]);
        let a = Candidate::new(&cat, vec![true, false, false]).unwrap();
        let pop = vec![a.clone()];

        // 3 parents, one pair -> two mutation trials, not three
        let mut src = ScriptedSource::new().with_units(&[
            0.0, 0.0, 0.0, // parents
            0.0, 0.0, // mutation trials
            0.0, 0.0, 0.0, // final draws
        ]);
        let next = reproduce(&pop, 3, &cat, 3, 0.0, &mut src).unwrap();
        assert_eq!(next.len(), 3);
        assert!(src.units.is_empty());
    }

    #[test]
    fn test_reproduce_empty_population() {
        let cat = small_catalog();
        let mut rng = create_rng(42);
        let err = reproduce(&[], 4, &cat, 5, 0.1, &mut rng).unwrap_err();
        assert!(matches!(err, GaError::EmptyPopulation));
    }

    // ---- Evolution driver ----

    #[test]
    fn test_small_end_to_end_is_reproducible() {
        let cat = small_catalog();
        let seed = viable_seed(&cat, 5, 4);

        let first = run(&cat, 5, 4, 0.0, 1, &mut create_rng(seed)).unwrap();
        let second = run(&cat, 5, 4, 0.0, 1, &mut create_rng(seed)).unwrap();

        assert_eq!(first.len(), 4);
        assert!(first.iter().all(|c| c.total_weight() <= 5));
        assert_cache_fresh(&cat, &first);
        assert_eq!(first, second);
        assert_eq!(format!("{first:?}"), format!("{second:?}"));
    }

    #[test]
    fn test_run_collapses_without_feasible_start() {
        let cat = Catalog::from_pairs([(10, 1), (10, 1)]);
        // only the empty selection fits; force every draw to include an item
        let mut src = ScriptedSource::new().with_bits(&[true; 6]);
        let err = run(&cat, 5, 3, 0.1, 1, &mut src).unwrap_err();
        assert!(matches!(err, GaError::EmptyPopulation));
    }

    #[test]
    fn test_zero_generations_returns_initial_population() {
        let cat = small_catalog();
        let seed = viable_seed(&cat, 5, 4);
        let initial = initial_population(4, &cat, 5, &mut create_rng(seed)).unwrap();
        let result = run(&cat, 5, 4, 0.3, 0, &mut create_rng(seed)).unwrap();
        assert_eq!(result, initial);
    }

    #[test]
    fn test_run_rejects_invalid_rate() {
        let cat = small_catalog();
        let err = run(&cat, 5, 4, 1.5, 1, &mut create_rng(1)).unwrap_err();
        assert!(matches!(err, GaError::InvalidConfig(_)));
    }

    #[test]
    fn test_runner_statistics() {
        let cat = Catalog::from_pairs((1..=20).map(|i| (i, i * 2)));
        let config = GaConfig::new(100)
            .with_population_size(30)
            .with_max_generations(25)
            .with_mutation_rate(0.2)
            .with_seed(42);
        let result = GaRunner::run(&cat, &config).unwrap();

        assert_eq!(result.generations, 25);
        assert_eq!(result.value_history.len(), 26);
        assert_eq!(result.population.len(), 30);
        assert!(result.initial_population_size <= 30);
        assert_eq!(result.best_value(), *result.value_history.last().unwrap());
        let best = result.best.as_ref().unwrap();
        assert!(best.total_weight() <= 100);
        assert!(result
            .population
            .iter()
            .all(|c| c.total_value() <= best.total_value()));
    }

    #[test]
    fn test_runner_seed_determinism() {
        let cat = Catalog::from_pairs((1..=15).map(|i| (i, 16 - i)));
        let config = GaConfig::new(60)
            .with_population_size(20)
            .with_max_generations(30)
            .with_seed(7);
        let a = GaRunner::run(&cat, &config).unwrap();
        let b = GaRunner::run(&cat, &config).unwrap();
        assert_eq!(a.population, b.population);
        assert_eq!(a.value_history, b.value_history);
    }

    #[test]
    fn test_runner_keeps_dominant_item() {
        // everything fits; item 9 is worth more than all others combined
        let cat = Catalog::from_pairs((0..10).map(|i| (1, 1u64 << i)));
        let config = GaConfig::new(10)
            .with_population_size(50)
            .with_max_generations(100)
            .with_mutation_rate(0.1)
            .with_seed(42);
        let result = GaRunner::run(&cat, &config).unwrap();
        assert_eq!(result.initial_population_size, 50);
        assert!(
            result.best_value() >= 512,
            "expected the dominant item to survive, best = {}",
            result.best_value()
        );
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let cat = Catalog::from_pairs((1..=20).map(|i| (i, i + 3)));
        let config = GaConfig::new(50)
            .with_population_size(40)
            .with_max_generations(20)
            .with_seed(11);
        let seq = GaRunner::run(&cat, &config).unwrap();
        let par = GaRunner::run(&cat, &config.clone().with_parallel(true)).unwrap();
        assert_eq!(seq.population, par.population);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_every_generation_is_feasible_and_fresh(
            items in prop::collection::vec((1u64..20, 0u64..20), 1..16),
            capacity in 20u64..80,
            count in 1usize..12,
            rate in 0.0f64..=1.0,
            seed in any::<u64>(),
        ) {
            let cat = Catalog::from_pairs(items);
            let mut rng = create_rng(seed);
            let mut pop = initial_population(count, &cat, capacity, &mut rng).unwrap();
            prop_assume!(!pop.is_empty());
            for _ in 0..5 {
                pop = reproduce(&pop, count, &cat, capacity, rate, &mut rng).unwrap();
                prop_assert_eq!(pop.len(), count);
                for c in &pop {
                    prop_assert!(c.total_weight() <= capacity);
                    let (v, w) = evaluate(&cat, c.chromosome()).unwrap();
                    prop_assert_eq!((v, w), (c.total_value(), c.total_weight()));
                }
            }
        }
    }
}
