//! Genetic-algorithm solver for the 0/1 knapsack problem.
//!
//! Given items with `(weight, value)` pairs and a capacity, evolves a
//! population of item selections toward one with maximal total value whose
//! total weight stays within the capacity.
//!
//! - [`ga`]: candidates, fitness, roulette wheel selection, crossover,
//!   mutation, and the generation loop.
//! - [`random`]: the injectable random source all operators draw from.
//! - [`io`]: loaders for the item list and configuration text files.
//!
//! # Example
//!
//! ```
//! use knapsack_ga::ga::{Catalog, GaConfig, GaRunner};
//!
//! let catalog = Catalog::from_pairs([(12, 4), (2, 2), (1, 1), (4, 10), (1, 2)]);
//! let config = GaConfig::new(15)
//!     .with_population_size(40)
//!     .with_max_generations(50)
//!     .with_seed(42);
//! let result = GaRunner::run(&catalog, &config).unwrap();
//! let best = result.best.unwrap();
//! assert!(best.total_weight() <= 15);
//! ```

pub mod error;
pub mod ga;
pub mod io;
pub mod random;

pub use error::{GaError, Result};
