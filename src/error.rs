//! Error types for the ACO engine.

use thiserror::Error;

/// Unified error type for colony setup and optimization.
///
/// Per-ant construction failures (invalid routes) are retried internally
/// and never surface here; only a retry-budget exhaustion does, as
/// [`AcoError::ConstructionDeadlock`]. Non-positive RNG seeds are
/// auto-corrected inside the random engine and are not an error.
#[derive(Debug, Error)]
pub enum AcoError {
    /// An ant exhausted its construction retry budget without producing
    /// a valid tour. Under a restricted adjacency this means some city
    /// is unreachable and the run cannot make progress.
    #[error("ant {ant} failed to construct a valid tour in iteration {iteration} after {retries} attempts")]
    ConstructionDeadlock {
        /// Index of the stuck ant.
        ant: usize,
        /// Iteration (1-based) in which the deadlock occurred.
        iteration: usize,
        /// The exhausted retry budget.
        retries: usize,
    },

    /// A city record in the input stream is missing fields or carries
    /// non-numeric values. Fatal at setup; no partial initialization.
    #[error("malformed city record at line {line}: {reason}")]
    MalformedInput {
        /// 1-based line number in the input stream.
        line: usize,
        /// What was wrong with the record.
        reason: String,
    },

    /// The colony configuration failed validation.
    #[error("invalid colony configuration: {0}")]
    InvalidConfig(String),

    /// A city index is outside the graph.
    #[error("city {city} out of bounds for graph of {num_cities} cities")]
    CityOutOfBounds {
        /// The offending index.
        city: usize,
        /// Number of cities in the graph.
        num_cities: usize,
    },

    /// I/O failure while reading the city input stream.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
