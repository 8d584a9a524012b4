//! Dot product implementations.
//!
//! This module contains all implementation variants of the signed byte dot
//! product. Every variant returns the same `i32` for the same input.

mod lanes;
mod original;

#[cfg(target_arch = "aarch64")]
mod aarch64_neon;
#[cfg(target_arch = "x86_64")]
mod x86_64_avx2;
#[cfg(target_arch = "x86_64")]
mod x86_64_sse2;

pub use lanes::dot_product_lanes;
pub use original::{dot_product_original, SAFE_LEN};

#[cfg(target_arch = "aarch64")]
pub use aarch64_neon::dot_product_aarch64_neon;
#[cfg(target_arch = "x86_64")]
pub use x86_64_avx2::dot_product_x86_64_avx2;
#[cfg(target_arch = "x86_64")]
pub use x86_64_sse2::dot_product_x86_64_sse2;

use crate::utils::VariantInfo;

/// Type alias for dot product function signature
pub type DotProductFn = fn(&[i8], &[i8]) -> i32;

/// Name of the reference variant every other variant is checked against.
pub const REFERENCE: &str = "original";

/// Get all available variants for the current CPU
pub fn available_variants() -> Vec<VariantInfo<DotProductFn>> {
    let mut variants: Vec<VariantInfo<DotProductFn>> = vec![
        VariantInfo {
            name: REFERENCE,
            description: "Scalar reference loop",
            function: dot_product_original,
        },
        VariantInfo {
            name: "lanes",
            description: "Portable lane arrays, 16 bytes per step, four accumulators",
            function: dot_product_lanes,
        },
    ];

    #[cfg(target_arch = "x86_64")]
    {
        variants.push(VariantInfo {
            name: "x86_64-sse2",
            description: "SSE2 narrow path, 16 bytes per step, four accumulators",
            function: dot_product_x86_64_sse2,
        });

        if super::dispatch::wide_available() {
            variants.push(VariantInfo {
                name: "x86_64-avx2",
                description: "AVX2 wide path, 8 bytes per step, one accumulator",
                function: dot_product_x86_64_avx2,
            });
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        variants.push(VariantInfo {
            name: "aarch64-neon",
            description: "NEON narrow path, 16 bytes per step, four accumulators",
            function: dot_product_aarch64_neon,
        });
    }

    variants
}
