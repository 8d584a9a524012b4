//! x86_64 AVX2 implementation (wide regime).
//!
//! With 256-bit registers one step handles 8 bytes: they widen once to eight
//! i16 lanes (128 bits), multiply, and widen once more to eight i32 lanes
//! that fill a single 256-bit accumulator.

use std::arch::x86_64::*;

use super::original::scalar_sum;
use super::x86_64_sse2::dot_product_x86_64_sse2;

/// Bytes consumed per step.
pub const GROUP: usize = 8;

/// Compute the dot product using AVX2 SIMD instructions.
///
/// AVX2 support is checked at runtime; without it the call is served by the
/// SSE2 kernel, which returns the same value.
///
/// # Panics
/// Panics if the vectors have different lengths.
pub fn dot_product_x86_64_avx2(a: &[i8], b: &[i8]) -> i32 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    if is_x86_feature_detected!("avx2") {
        // Safety: AVX2 support was verified above.
        unsafe { dot_product_avx2(a, b) }
    } else {
        dot_product_x86_64_sse2(a, b)
    }
}

#[target_feature(enable = "avx2")]
unsafe fn dot_product_avx2(a: &[i8], b: &[i8]) -> i32 {
    let len = a.len();
    let upper_bound = len - len % GROUP;

    let mut acc = _mm256_setzero_si256();
    let mut i = 0;
    while i < upper_bound {
        // 8 bytes into the low half of an xmm register
        let va8 = _mm_loadl_epi64(a.as_ptr().add(i) as *const __m128i);
        let vb8 = _mm_loadl_epi64(b.as_ptr().add(i) as *const __m128i);

        let va16 = _mm_cvtepi8_epi16(va8);
        let vb16 = _mm_cvtepi8_epi16(vb8);
        let prod16 = _mm_mullo_epi16(va16, vb16);

        let prod32 = _mm256_cvtepi16_epi32(prod16);
        acc = _mm256_add_epi32(acc, prod32);

        i += GROUP;
    }

    let res = reduce_add(acc);
    res.wrapping_add(scalar_sum(&a[upper_bound..], &b[upper_bound..]))
}

/// Horizontal sum of eight i32 lanes.
#[target_feature(enable = "avx2")]
unsafe fn reduce_add(v: __m256i) -> i32 {
    // [a, b, c, d, e, f, g, h]
    let lo = _mm256_castsi256_si128(v);
    let hi = _mm256_extracti128_si256(v, 1);
    let sum128 = _mm_add_epi32(lo, hi); // [a+e, b+f, c+g, d+h]

    let swapped = _mm_shuffle_epi32(sum128, 0b01_00_11_10);
    let sum64 = _mm_add_epi32(sum128, swapped);
    let swapped = _mm_shuffle_epi32(sum64, 0b10_11_00_01);
    let sum32 = _mm_add_epi32(sum64, swapped);

    _mm_cvtsi128_si32(sum32)
}
