//! Fitness evaluation and the feasibility predicate.

use super::types::Catalog;
use crate::error::{GaError, Result};

/// Sums value and weight over the selected items.
///
/// Returns `(total_value, total_weight)`. Pure and `O(n)`.
pub fn evaluate(catalog: &Catalog, chromosome: &[bool]) -> Result<(u64, u64)> {
    if chromosome.len() != catalog.len() {
        return Err(GaError::ShapeMismatch {
            expected: catalog.len(),
            actual: chromosome.len(),
        });
    }

    let (value, weight) = catalog
        .items()
        .iter()
        .zip(chromosome)
        .filter(|&(_, &selected)| selected)
        .fold((0u64, 0u64), |(v, w), (item, _)| {
            (v.saturating_add(item.value), w.saturating_add(item.weight))
        });

    Ok((value, weight))
}

/// `weight <= capacity`.
#[inline]
pub fn is_feasible(total_weight: u64, capacity: u64) -> bool {
    total_weight <= capacity
}
