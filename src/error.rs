//! Error type shared by the solver and the input loaders.

use std::path::PathBuf;

/// Errors produced by the knapsack GA.
#[derive(Debug, thiserror::Error)]
pub enum GaError {
    /// Selection or reproduction was attempted over zero candidates.
    ///
    /// Happens when no feasible candidate survives initialisation, after
    /// which the run cannot meaningfully continue.
    #[error("cannot select from an empty population")]
    EmptyPopulation,

    /// A chromosome does not have one bit per catalog item.
    #[error("chromosome length {actual} does not match catalog length {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An input file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file was read but its contents are malformed.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A required configuration setting is absent.
    #[error("missing required setting `{0}`")]
    MissingSetting(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GaError>;
