use thiserror::Error;

/// Convenience result type for collection operations.
pub type CollectionResult<T> = Result<T, CollectionError>;

/// Error type returned by the fallible collection utilities.
///
/// Most utilities are total and never fail; this enum covers the few that have a defined
/// failure mode (seedless reduce over nothing, checked dedup, engine setup, JSON input).
#[derive(Debug, Error)]
pub enum CollectionError {
    /// `reduce` was called on an empty collection without a seed, so there is no accumulator.
    #[error("cannot reduce an empty collection without an initial accumulator")]
    EmptyWithoutSeed,

    /// A sequence passed as pre-sorted is not in ascending order.
    #[error("sequence is not sorted: element at index {index} is less than its predecessor")]
    NotSorted { index: usize },

    /// Execution options failed validation.
    #[error("invalid execution options: {message}")]
    InvalidOptions { message: String },

    /// The engine's worker pool could not be created.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// `serde_json` failed to read or write JSON text.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON was well-formed but cannot be represented as a collection value.
    #[error("invalid json input: {message}")]
    InvalidJson { message: String },
}
