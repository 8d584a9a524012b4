//! x86_64 SSE2 implementation (narrow regime).
//!
//! SSE2 is available on all x86_64 CPUs but its 128-bit registers cannot hold
//! a widened chunk in one piece. Each 16-byte chunk is split into two i16
//! halves, and each i16 product into two i32 halves, feeding four
//! independent accumulators.

use std::arch::x86_64::*;

use super::original::scalar_sum;

/// Bytes consumed per step.
pub const GROUP: usize = 16;

/// Compute the dot product using SSE2 SIMD instructions.
///
/// # Panics
/// Panics if the vectors have different lengths.
pub fn dot_product_x86_64_sse2(a: &[i8], b: &[i8]) -> i32 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    // Safety: SSE2 is part of the x86_64 baseline.
    unsafe { dot_product_sse2(a, b) }
}

#[target_feature(enable = "sse2")]
unsafe fn dot_product_sse2(a: &[i8], b: &[i8]) -> i32 {
    let len = a.len();
    let upper_bound = len - len % GROUP;

    let mut acc1 = _mm_setzero_si128();
    let mut acc2 = _mm_setzero_si128();
    let mut acc3 = _mm_setzero_si128();
    let mut acc4 = _mm_setzero_si128();

    let mut i = 0;
    while i < upper_bound {
        let va8 = _mm_loadu_si128(a.as_ptr().add(i) as *const __m128i);
        let vb8 = _mm_loadu_si128(b.as_ptr().add(i) as *const __m128i);

        let (va16_1, va16_2) = widen_i8(va8);
        let (vb16_1, vb16_2) = widen_i8(vb8);
        let prod16_1 = _mm_mullo_epi16(va16_1, vb16_1);
        let prod16_2 = _mm_mullo_epi16(va16_2, vb16_2);

        let (prod32_1, prod32_2) = widen_i16(prod16_1);
        let (prod32_3, prod32_4) = widen_i16(prod16_2);
        acc1 = _mm_add_epi32(acc1, prod32_1);
        acc2 = _mm_add_epi32(acc2, prod32_2);
        acc3 = _mm_add_epi32(acc3, prod32_3);
        acc4 = _mm_add_epi32(acc4, prod32_4);

        i += GROUP;
    }

    let res1 = _mm_add_epi32(acc1, acc2);
    let res2 = _mm_add_epi32(acc3, acc4);
    let res = reduce_add(_mm_add_epi32(res1, res2));

    res.wrapping_add(scalar_sum(&a[upper_bound..], &b[upper_bound..]))
}

/// Sign-extend 16 i8 lanes into two vectors of 8 i16 lanes.
///
/// Interleaving a byte with itself puts a copy in the high byte of each i16;
/// the arithmetic shift then drops the low copy and keeps the sign.
#[inline(always)]
unsafe fn widen_i8(v: __m128i) -> (__m128i, __m128i) {
    (
        _mm_srai_epi16(_mm_unpacklo_epi8(v, v), 8),
        _mm_srai_epi16(_mm_unpackhi_epi8(v, v), 8),
    )
}

/// Sign-extend 8 i16 lanes into two vectors of 4 i32 lanes.
#[inline(always)]
unsafe fn widen_i16(v: __m128i) -> (__m128i, __m128i) {
    (
        _mm_srai_epi32(_mm_unpacklo_epi16(v, v), 16),
        _mm_srai_epi32(_mm_unpackhi_epi16(v, v), 16),
    )
}

/// Horizontal sum of four i32 lanes.
#[inline(always)]
unsafe fn reduce_add(v: __m128i) -> i32 {
    // [a, b, c, d]
    let swapped = _mm_shuffle_epi32(v, 0b01_00_11_10); // [c, d, a, b]
    let sum64 = _mm_add_epi32(v, swapped);
    let swapped = _mm_shuffle_epi32(sum64, 0b10_11_00_01);
    let sum32 = _mm_add_epi32(sum64, swapped);
    _mm_cvtsi128_si32(sum32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lanes_i16(v: __m128i) -> [i16; 8] {
        unsafe { std::mem::transmute(v) }
    }

    fn lanes_i32(v: __m128i) -> [i32; 4] {
        unsafe { std::mem::transmute(v) }
    }

    #[test]
    fn test_widen_i8_sign_extends() {
        let bytes: [i8; 16] = [
            -128, -1, 0, 1, 127, -2, 2, -3, 3, 4, 5, 6, 7, 8, 9, -10,
        ];
        let (lo, hi) = unsafe { widen_i8(_mm_loadu_si128(bytes.as_ptr() as *const __m128i)) };
        assert_eq!(lanes_i16(lo), [-128, -1, 0, 1, 127, -2, 2, -3]);
        assert_eq!(lanes_i16(hi), [3, 4, 5, 6, 7, 8, 9, -10]);
    }

    #[test]
    fn test_widen_i16_sign_extends() {
        let shorts: [i16; 8] = [16384, -16384, 1, -1, 2, -2, 3, -3];
        let (lo, hi) = unsafe { widen_i16(_mm_loadu_si128(shorts.as_ptr() as *const __m128i)) };
        assert_eq!(lanes_i32(lo), [16384, -16384, 1, -1]);
        assert_eq!(lanes_i32(hi), [2, -2, 3, -3]);
    }

    #[test]
    fn test_reduce_add() {
        let ints: [i32; 4] = [1, -20, 300, -4000];
        let sum = unsafe { reduce_add(_mm_loadu_si128(ints.as_ptr() as *const __m128i)) };
        assert_eq!(sum, -3719);
    }
}
