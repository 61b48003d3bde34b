//! Random number sources.
//!
//! Every operator draws its randomness through [`RandomSource`], passed in
//! explicitly. Any [`rand::Rng`] is a source, so production code uses a
//! seeded [`StdRng`] from [`create_rng`]; tests substitute scripted doubles
//! to force particular draws.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The three primitive draws the GA needs.
pub trait RandomSource {
    /// A fair coin flip.
    fn next_bit(&mut self) -> bool;

    /// A uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// A uniform index in `0..len`.
    ///
    /// `len` must be positive.
    fn next_index(&mut self, len: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn next_bit(&mut self) -> bool {
        self.random_bool(0.5)
    }

    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Creates a deterministic generator from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from OS entropy when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// A source that replays pre-recorded draws, for forcing specific outcomes.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedSource {
    pub bits: std::collections::VecDeque<bool>,
    pub units: std::collections::VecDeque<f64>,
    pub indices: std::collections::VecDeque<usize>,
}

#[cfg(test)]
impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bits(mut self, bits: &[bool]) -> Self {
        self.bits.extend(bits.iter().copied());
        self
    }

    pub fn with_units(mut self, units: &[f64]) -> Self {
        self.units.extend(units.iter().copied());
        self
    }

    pub fn with_indices(mut self, indices: &[usize]) -> Self {
        self.indices.extend(indices.iter().copied());
        self
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn next_bit(&mut self) -> bool {
        self.bits.pop_front().expect("scripted bits exhausted")
    }

    fn next_unit(&mut self) -> f64 {
        self.units.pop_front().expect("scripted units exhausted")
    }

    fn next_index(&mut self, len: usize) -> usize {
        let idx = self.indices.pop_front().expect("scripted indices exhausted");
        assert!(idx < len, "scripted index {idx} out of range 0..{len}");
        idx
    }
}
