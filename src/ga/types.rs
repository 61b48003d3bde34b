//! Core data types: items, the catalog, candidates and populations.
//!
//! Bit `i` of every chromosome refers to `catalog[i]`. A [`Candidate`] can
//! only be built through evaluation against a catalog, so its cached totals
//! always match its chromosome.

use super::fitness;
use crate::error::Result;

/// A knapsack item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub weight: u64,
    pub value: u64,
}

impl Item {
    pub fn new(weight: u64, value: u64) -> Self {
        Self { weight, value }
    }
}

/// The ordered, immutable list of items for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Builds a catalog from `(weight, value)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u64, u64)>,
    {
        Self::new(pairs.into_iter().map(|(w, v)| Item::new(w, v)).collect())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }
}

/// One inclusion bit per catalog item.
pub type Chromosome = Vec<bool>;

/// A chromosome together with its cached total weight and value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Candidate {
    chromosome: Chromosome,
    total_weight: u64,
    total_value: u64,
}

impl Candidate {
    /// Evaluates `chromosome` against `catalog` and caches the totals.
    ///
    /// Fails with [`GaError::ShapeMismatch`](crate::GaError::ShapeMismatch)
    /// when the lengths differ.
    pub fn new(catalog: &Catalog, chromosome: Chromosome) -> Result<Self> {
        let (total_value, total_weight) = fitness::evaluate(catalog, &chromosome)?;
        Ok(Self {
            chromosome,
            total_weight,
            total_value,
        })
    }

    pub fn chromosome(&self) -> &[bool] {
        &self.chromosome
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    pub fn total_value(&self) -> u64 {
        self.total_value
    }

    /// Whether this candidate fits in a knapsack of `capacity`.
    pub fn is_feasible(&self, capacity: u64) -> bool {
        fitness::is_feasible(self.total_weight, capacity)
    }

    /// Consumes the candidate, returning its chromosome.
    pub fn into_chromosome(self) -> Chromosome {
        self.chromosome
    }

    /// Renders the chromosome as a `[0, 1, ...]` list.
    pub fn chromosome_string(&self) -> String {
        let bits: Vec<&str> = self
            .chromosome
            .iter()
            .map(|&b| if b { "1" } else { "0" })
            .collect();
        format!("[{}]", bits.join(", "))
    }
}

/// An ordered collection of candidates; duplicates are allowed.
pub type Population = Vec<Candidate>;

/// Returns the candidate with the highest total value.
///
/// Ties go to the earliest candidate in population order. Returns `None`
/// for an empty population.
pub fn best_candidate(population: &[Candidate]) -> Option<&Candidate> {
    let mut best: Option<&Candidate> = None;
    for candidate in population {
        match best {
            Some(b) if candidate.total_value <= b.total_value => {}
            _ => best = Some(candidate),
        }
    }
    best
}
