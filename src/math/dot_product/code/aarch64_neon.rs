//! aarch64 NEON implementation (narrow regime).
//!
//! NEON registers are 128 bits wide, so a 16-byte chunk is widened in two
//! halves at each step, with four i32 accumulators.

use std::arch::aarch64::*;

use super::original::scalar_sum;

/// Bytes consumed per step.
pub const GROUP: usize = 16;

/// Compute the dot product using NEON SIMD instructions.
///
/// # Panics
/// Panics if the vectors have different lengths.
pub fn dot_product_aarch64_neon(a: &[i8], b: &[i8]) -> i32 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    // Safety: NEON is mandatory on aarch64.
    unsafe { dot_product_neon(a, b) }
}

#[target_feature(enable = "neon")]
unsafe fn dot_product_neon(a: &[i8], b: &[i8]) -> i32 {
    let len = a.len();
    let upper_bound = len - len % GROUP;

    let mut acc1 = vdupq_n_s32(0);
    let mut acc2 = vdupq_n_s32(0);
    let mut acc3 = vdupq_n_s32(0);
    let mut acc4 = vdupq_n_s32(0);

    let mut i = 0;
    while i < upper_bound {
        let va8 = vld1q_s8(a.as_ptr().add(i));
        let vb8 = vld1q_s8(b.as_ptr().add(i));

        let prod16_1 = vmulq_s16(vmovl_s8(vget_low_s8(va8)), vmovl_s8(vget_low_s8(vb8)));
        let prod16_2 = vmulq_s16(vmovl_high_s8(va8), vmovl_high_s8(vb8));

        acc1 = vaddq_s32(acc1, vmovl_s16(vget_low_s16(prod16_1)));
        acc2 = vaddq_s32(acc2, vmovl_high_s16(prod16_1));
        acc3 = vaddq_s32(acc3, vmovl_s16(vget_low_s16(prod16_2)));
        acc4 = vaddq_s32(acc4, vmovl_high_s16(prod16_2));

        i += GROUP;
    }

    let res = vaddvq_s32(vaddq_s32(vaddq_s32(acc1, acc2), vaddq_s32(acc3, acc4)));
    res.wrapping_add(scalar_sum(&a[upper_bound..], &b[upper_bound..]))
}
