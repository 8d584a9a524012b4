//! # Binary Dot Product
//!
//! Signed byte (`i8`) dot product with a scalar reference loop and SIMD
//! variants built on widening multiply-accumulate, plus the micro-benchmark
//! harness that compares them.
//!
//! ```
//! use binary_dot_product::math::dot_product::dot_product;
//!
//! assert_eq!(dot_product(&[1, 2, 3], &[4, 5, 6]), 32);
//! ```

pub mod error;
pub mod math;
pub mod registry;
pub mod utils;

pub use error::BenchError;

/// Re-export tui from utils
pub use utils::tui;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::math::dot_product::{self, dot_product, KernelPath};
    pub use crate::registry::{build_registry, AlgorithmRegistry, AlgorithmRunner};
}
