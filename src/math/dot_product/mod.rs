//! # Signed Byte Dot Product
//!
//! `dot(a, b) = Σ(a[i] * b[i])` over `i8` inputs, accumulated in `i32`.
//!
//! ## Why widening
//!
//! A byte-by-byte product overflows a byte, so every product is formed in
//! i16 lanes (`|x * y| <= 16384`) and widened again to i32 before it is
//! accumulated. SIMD widening conversions only double a lane's width per
//! call, which shapes the two code paths:
//!
//! - **Wide** (>= 256-bit registers): 8 bytes per step, one widen to i16, one
//!   widen to i32, a single accumulator.
//! - **Narrow** (128-bit registers): 16 bytes per step, each widen split in
//!   two halves, four independent accumulators.
//!
//! Leftover elements that don't fill a step go through the scalar loop.
//! All variants return bit-identical results.

pub mod bench;
pub mod code;
pub mod dispatch;
pub mod test;

pub use code::*;
pub use dispatch::{dot_product, KernelPath};

use std::sync::Arc;

use log::debug;

use crate::error::BenchError;
use crate::registry::AlgorithmRunner;
use crate::utils::bench::random_pair;
use crate::utils::timer::Variant;

/// Input lengths exercising both chunk-aligned and ragged-tail cases.
pub const DEFAULT_SIZES: [usize; 8] = [1, 128, 207, 256, 300, 512, 702, 1024];

/// Seed used by [`DotProductRunner::verify`].
const VERIFY_SEED: u64 = 0x5eed_d07;

/// Runner for the signed byte dot product
pub struct DotProductRunner;

/// Run every variant on `a`/`b` and compare with the reference.
///
/// Returns the agreed value.
pub fn check_variants(a: &[i8], b: &[i8]) -> Result<i32, BenchError> {
    let variants = code::available_variants();
    let reference = variants
        .iter()
        .find(|v| v.name == REFERENCE)
        .ok_or(BenchError::MissingReference)?;

    let expected = (reference.function)(a, b);

    for variant in variants.iter().filter(|v| v.name != REFERENCE) {
        let got = (variant.function)(a, b);
        if got != expected {
            return Err(BenchError::Mismatch {
                variant: variant.name,
                size: a.len(),
                expected,
                got,
            });
        }
    }

    Ok(expected)
}

impl AlgorithmRunner for DotProductRunner {
    fn name(&self) -> &'static str {
        "dot_product_i8"
    }

    fn description(&self) -> &'static str {
        "Dot product of signed byte vectors with widening multiply-accumulate"
    }

    fn category(&self) -> &'static str {
        "math"
    }

    fn available_variants(&self) -> Vec<&'static str> {
        code::available_variants().iter().map(|v| v.name).collect()
    }

    fn prepare_trial<'a>(
        &'a self,
        size: usize,
        seed: u64,
        calls_per_sample: usize,
    ) -> Result<Vec<Variant<'a>>, BenchError> {
        let (a, b) = random_pair(size, seed);

        let expected = check_variants(&a, &b)?;
        debug!("trial size={} seed={}: all variants agree on {}", size, seed, expected);

        Ok(bench::variant_closures(Arc::new(a), Arc::new(b), calls_per_sample))
    }

    fn verify(&self) -> Result<(), BenchError> {
        // Every length around both step sizes, plus the benchmark sizes
        let sizes = (0..=40).chain(DEFAULT_SIZES).chain([1023, 2048]);

        for (i, size) in sizes.enumerate() {
            let (a, b) = random_pair(size, VERIFY_SEED.wrapping_add(i as u64));
            check_variants(&a, &b)?;
        }

        Ok(())
    }
}
