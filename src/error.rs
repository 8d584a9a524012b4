//! Error types for the benchmark harness.
//!
//! The kernels themselves never return errors: a length mismatch is a
//! caller bug and panics.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    /// A variant disagreed with the reference on the same input pair.
    #[error("variant '{variant}' disagrees with the reference at size {size}: expected {expected}, got {got}")]
    Mismatch {
        variant: &'static str,
        size: usize,
        expected: i32,
        got: i32,
    },

    #[error("no reference variant registered")]
    MissingReference,

    #[error("algorithm '{0}' not found")]
    UnknownAlgorithm(String),

    #[error("unknown kernel path '{0}' (expected wide, narrow or scalar)")]
    UnknownKernel(String),

    #[error("unknown pin strategy '{0}' (expected global, per-sample or off)")]
    UnknownPinStrategy(String),

    #[error("failed to write CSV report")]
    Csv(#[from] std::io::Error),
}
