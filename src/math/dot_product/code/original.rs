//! Original (reference) implementation of the signed byte dot product.
//!
//! This is the plain scalar loop that every other variant is checked against.
//!
//! # Overflow ceiling
//!
//! The largest product magnitude is `(-128) * (-128) = 16384`, so up to
//! [`SAFE_LEN`] elements can never leave the `i32` range. Longer inputs may.
//! Accumulation wraps in two's complement in every variant, which keeps all
//! of them bit-identical past the ceiling instead of guarding against it.

/// Longest input whose dot product is guaranteed to fit in an `i32`.
pub const SAFE_LEN: usize = (i32::MAX / (128 * 128)) as usize;

/// Compute the dot product of two signed byte vectors.
///
/// # Arguments
/// * `a` - First vector
/// * `b` - Second vector
///
/// # Panics
/// Panics if the vectors have different lengths.
///
/// # Example
/// ```
/// use binary_dot_product::math::dot_product::dot_product_original;
///
/// let a = [1, 2, 3];
/// let b = [4, 5, 6];
/// assert_eq!(dot_product_original(&a, &b), 32);
/// ```
pub fn dot_product_original(a: &[i8], b: &[i8]) -> i32 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    scalar_sum(a, b)
}

/// Scalar accumulation without the length check, used for vector tails.
#[inline(always)]
pub(crate) fn scalar_sum(a: &[i8], b: &[i8]) -> i32 {
    a.iter()
        .zip(b)
        .fold(0i32, |acc, (&x, &y)| acc.wrapping_add(x as i32 * y as i32))
}
