//! Portable vectorized implementation over fixed-size lane arrays.
//!
//! Mirrors the narrow-register algorithm without intrinsics: each 16-byte
//! chunk is widened in two halves to i16, multiplied, widened again in two
//! halves to i32 and spread over four independent accumulators. LLVM turns
//! the fixed-size array loops into vector code on most targets.

use super::original::scalar_sum;

/// Bytes consumed per step (one 128-bit register of i8 lanes).
pub const GROUP: usize = 16;

const HALF: usize = GROUP / 2;
const QUARTER: usize = GROUP / 4;

type I16s = [i16; HALF];
type I32s = [i32; QUARTER];

/// Sign-extend one half of a byte chunk to i16 lanes.
#[inline(always)]
fn widen_bytes(chunk: &[i8], part: usize) -> I16s {
    let mut out = [0i16; HALF];
    for (lane, &x) in out.iter_mut().zip(&chunk[part * HALF..(part + 1) * HALF]) {
        *lane = x as i16;
    }
    out
}

/// Sign-extend one half of an i16 vector to i32 lanes.
#[inline(always)]
fn widen_shorts(v: &I16s, part: usize) -> I32s {
    let mut out = [0i32; QUARTER];
    for (lane, &x) in out.iter_mut().zip(&v[part * QUARTER..(part + 1) * QUARTER]) {
        *lane = x as i32;
    }
    out
}

#[inline(always)]
fn mul(a: &I16s, b: &I16s) -> I16s {
    // |x * y| <= 16384, never wraps
    let mut out = [0i16; HALF];
    for i in 0..HALF {
        out[i] = a[i] * b[i];
    }
    out
}

#[inline(always)]
fn add(a: &I32s, b: &I32s) -> I32s {
    let mut out = [0i32; QUARTER];
    for i in 0..QUARTER {
        out[i] = a[i].wrapping_add(b[i]);
    }
    out
}

#[inline(always)]
fn reduce(v: &I32s) -> i32 {
    v.iter().fold(0i32, |acc, &x| acc.wrapping_add(x))
}

/// Compute the dot product using portable lane arrays.
///
/// # Panics
/// Panics if the vectors have different lengths.
pub fn dot_product_lanes(a: &[i8], b: &[i8]) -> i32 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    let a_chunks = a.chunks_exact(GROUP);
    let b_chunks = b.chunks_exact(GROUP);
    let (a_tail, b_tail) = (a_chunks.remainder(), b_chunks.remainder());

    let mut acc1 = [0i32; QUARTER];
    let mut acc2 = [0i32; QUARTER];
    let mut acc3 = [0i32; QUARTER];
    let mut acc4 = [0i32; QUARTER];

    for (ca, cb) in a_chunks.zip(b_chunks) {
        let prod16_1 = mul(&widen_bytes(ca, 0), &widen_bytes(cb, 0));
        let prod16_2 = mul(&widen_bytes(ca, 1), &widen_bytes(cb, 1));

        acc1 = add(&acc1, &widen_shorts(&prod16_1, 0));
        acc2 = add(&acc2, &widen_shorts(&prod16_1, 1));
        acc3 = add(&acc3, &widen_shorts(&prod16_2, 0));
        acc4 = add(&acc4, &widen_shorts(&prod16_2, 1));
    }

    let res = reduce(&add(&add(&acc1, &acc2), &add(&acc3, &acc4)));
    res.wrapping_add(scalar_sum(a_tail, b_tail))
}
