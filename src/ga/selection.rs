//! Roulette wheel (fitness-proportionate) selection.
//!
//! Each candidate is drawn with probability `total_value / Σ total_value`,
//! independently and with replacement. Draw order is preserved in the
//! output.
//!
//! When every candidate has zero value the proportions are undefined, so
//! the wheel falls back to uniform selection over the population.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1

use super::types::{Candidate, Population};
use crate::error::{GaError, Result};
use crate::random::RandomSource;

/// Draws `count` candidates from `population` by roulette wheel.
///
/// Returns an empty population for `count == 0`. Fails with
/// [`GaError::EmptyPopulation`] when `population` is empty and
/// `count > 0`.
pub fn select<R: RandomSource>(
    population: &[Candidate],
    count: usize,
    rng: &mut R,
) -> Result<Population> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if population.is_empty() {
        return Err(GaError::EmptyPopulation);
    }

    let weights: Vec<f64> = population
        .iter()
        .map(|c| c.total_value() as f64)
        .collect();
    let total: f64 = weights.iter().sum();

    if total <= 0.0 {
        tracing::warn!(
            population = population.len(),
            "all candidates have zero value, selecting uniformly"
        );
        return Ok((0..count)
            .map(|_| population[rng.next_index(population.len())].clone())
            .collect());
    }

    Ok((0..count)
        .map(|_| population[spin(&weights, total, rng)].clone())
        .collect())
}

/// A single spin of the wheel; returns the selected index.
///
/// Zero-weight slots are never returned while `total > 0`.
fn spin<R: RandomSource>(weights: &[f64], total: f64, rng: &mut R) -> usize {
    let threshold = rng.next_unit() * total;
    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (i, &w) in weights.iter().enumerate() {
        if w > 0.0 {
            last_positive = i;
        }
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    last_positive // floating-point fallback
}
