//! Bit-string genetic operators.
//!
//! # Crossover
//!
//! [`three_segment_crossover`] cuts both parents at fixed thirds and swaps
//! the middle segment. The cut points depend only on the chromosome length
//! (see [`crossover_points`]), so crossover consumes no randomness.
//!
//! # Mutation
//!
//! [`mutate`] is a per-chromosome trial: with probability `mutation_rate`
//! exactly one uniformly chosen bit is toggled, otherwise nothing changes.

use crate::error::{GaError, Result};
use crate::random::RandomSource;

// ============================================================================
// Crossover
// ============================================================================

/// Cut points `(p1, p2)` with `p1 = len / 3` and `p2 = 2 * p1`.
///
/// Uses integer floor division, so for lengths not divisible by three the
/// last segment is the longest.
pub fn crossover_points(len: usize) -> (usize, usize) {
    let p1 = len / 3;
    (p1, 2 * p1)
}

/// Three-segment crossover.
///
/// With `(p1, p2)` from [`crossover_points`]:
///
/// - child1 = `a[..p1] + b[p1..p2] + a[p2..]`
/// - child2 = `b[..p1] + a[p1..p2] + b[p2..]`
///
/// # Errors
/// [`GaError::ShapeMismatch`] if the parents differ in length.
pub fn three_segment_crossover(a: &[bool], b: &[bool]) -> Result<(Vec<bool>, Vec<bool>)> {
    if a.len() != b.len() {
        return Err(GaError::ShapeMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let (p1, p2) = crossover_points(a.len());
    let child1 = build_child(a, b, p1, p2);
    let child2 = build_child(b, a, p1, p2);
    Ok((child1, child2))
}

/// Outer segments from `outer`, middle segment from `middle`.
fn build_child(outer: &[bool], middle: &[bool], p1: usize, p2: usize) -> Vec<bool> {
    let mut child = Vec::with_capacity(outer.len());
    child.extend_from_slice(&outer[..p1]);
    child.extend_from_slice(&middle[p1..p2]);
    child.extend_from_slice(&outer[p2..]);
    child
}

// ============================================================================
// Mutation
// ============================================================================

/// Single-bit mutation trial.
///
/// Draws `p` uniform in `[0, 1)`; if `p >= 1 - mutation_rate`, toggles the
/// bit at a uniformly drawn position. Returns the flipped position, or
/// `None` if the chromosome was left unchanged.
///
/// An empty chromosome is never modified.
pub fn mutate<R: RandomSource>(
    chromosome: &mut [bool],
    mutation_rate: f64,
    rng: &mut R,
) -> Option<usize> {
    let p = rng.next_unit();
    if p < 1.0 - mutation_rate || chromosome.is_empty() {
        return None;
    }
    let pos = rng.next_index(chromosome.len());
    chromosome[pos] = !chromosome[pos];
    Some(pos)
}

// ============================================================================
// Tests
// ============================================================================
