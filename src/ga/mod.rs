//! Genetic Algorithm for the 0/1 knapsack problem.
//!
//! A candidate is a bit string with one bit per catalog item. Each
//! generation draws parents by roulette wheel, recombines them with a fixed
//! three-segment crossover, applies a single-bit mutation trial per child,
//! drops infeasible children, and draws the next generation by a second
//! roulette wheel over parents and survivors.
//!
//! # Key Types
//!
//! - [`Catalog`] / [`Item`]: the items, indexed by bit position
//! - [`Candidate`]: a chromosome with cached total weight and value
//! - [`GaConfig`]: run parameters
//! - [`GaRunner`]: executes the evolutionary loop
//! - [`GaResult`]: final population, best candidate and statistics
//!
//! # Submodules
//!
//! - [`fitness`]: evaluation and the feasibility predicate
//! - [`operators`]: three-segment crossover and single-bit mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod fitness;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{initial_population, reproduce, run, GaResult, GaRunner};
pub use selection::select;
pub use types::{best_candidate, Candidate, Catalog, Chromosome, Item, Population};
