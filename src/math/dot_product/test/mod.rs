//! Test utilities for dot product implementations.

#[cfg(test)]
mod tests {
    use crate::math::dot_product::code::*;
    use crate::math::dot_product::dispatch::{dot_product, kernel_for, KernelPath};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Widest step across all variants; multiples of it are aligned for all.
    const MAX_GROUP: usize = 16;

    fn reference_i64(a: &[i8], b: &[i8]) -> i64 {
        a.iter().zip(b).map(|(&x, &y)| x as i64 * y as i64).sum()
    }

    fn assert_all_variants(a: &[i8], b: &[i8], expected: i32) {
        for variant in available_variants() {
            assert_eq!(
                (variant.function)(a, b),
                expected,
                "variant '{}' at len {}",
                variant.name,
                a.len()
            );
        }
        assert_eq!(dot_product(a, b), expected, "dispatch at len {}", a.len());
    }

    fn pattern(len: usize, mul: usize, add: usize) -> Vec<i8> {
        (0..len).map(|i| ((i * mul + add) % 256) as u8 as i8).collect()
    }

    #[test]
    fn test_known_value() {
        assert_all_variants(&[1, 2, 3], &[4, 5, 6], 32);
    }

    #[test]
    fn test_known_value_extremes() {
        assert_all_variants(&[-128, 127], &[127, -128], -32512);
    }

    #[test]
    fn test_empty() {
        assert_all_variants(&[], &[], 0);
    }

    #[test]
    fn test_single() {
        assert_all_variants(&[-7], &[9], -63);
    }

    #[test]
    fn test_chunk_aligned_lengths() {
        for len in [8, MAX_GROUP, 2 * MAX_GROUP, 256, 512, 1024] {
            let a = pattern(len, 31, 5);
            let b = pattern(len, 17, 200);
            let expected = dot_product_original(&a, &b);
            assert_all_variants(&a, &b, expected);
        }
    }

    #[test]
    fn test_one_past_chunk_boundary() {
        for len in [9, MAX_GROUP + 1, 2 * MAX_GROUP + 1, 257, 513, 1025] {
            let a = pattern(len, 13, 77);
            let b = pattern(len, 101, 3);
            let expected = dot_product_original(&a, &b);
            assert_all_variants(&a, &b, expected);

            // Only the last element reaches the tail loop
            let aligned = dot_product_original(&a[..len - 1], &b[..len - 1]);
            assert_eq!(expected - aligned, a[len - 1] as i32 * b[len - 1] as i32);
        }
    }

    #[test]
    fn test_ragged_tails_below_one_step() {
        for len in 0..MAX_GROUP {
            let a = pattern(len, 7, 250);
            let b = pattern(len, 11, 128);
            assert_all_variants(&a, &b, reference_i64(&a, &b) as i32);
        }
    }

    #[test]
    fn test_all_min_values() {
        // (-128)^2 is the largest product and must survive the i16 lanes
        let a = vec![i8::MIN; 1024];
        assert_all_variants(&a, &a, 1024 * 16384);
    }

    #[test]
    fn test_sizes_from_benchmark_parameter_set() {
        let mut rng = StdRng::seed_from_u64(0xbe7c);
        for len in [1, 128, 207, 256, 300, 512, 702, 1024] {
            let a: Vec<i8> = (0..len).map(|_| rng.random()).collect();
            let b: Vec<i8> = (0..len).map(|_| rng.random()).collect();
            assert_all_variants(&a, &b, reference_i64(&a, &b) as i32);
        }
    }

    #[test]
    fn test_safe_len_ceiling_fits() {
        let a = vec![i8::MIN; SAFE_LEN];
        let exact = reference_i64(&a, &a);
        assert!(exact <= i32::MAX as i64);
        assert_all_variants(&a, &a, exact as i32);
    }

    #[test]
    fn test_past_ceiling_wraps_consistently() {
        let a = vec![i8::MIN; SAFE_LEN + 2 * MAX_GROUP + 3];
        let exact = reference_i64(&a, &a);
        assert!(exact > i32::MAX as i64);
        assert_all_variants(&a, &a, exact as i32);
    }

    #[test]
    fn test_random_differential_1000_pairs() {
        let mut rng = StdRng::seed_from_u64(0xd07_d07);
        let variants = available_variants();

        for _ in 0..1000 {
            let len = rng.random_range(0..=2048usize);
            let a: Vec<i8> = (0..len).map(|_| rng.random()).collect();
            let b: Vec<i8> = (0..len).map(|_| rng.random()).collect();
            let expected = dot_product_original(&a, &b);

            for variant in &variants {
                assert_eq!((variant.function)(&a, &b), expected, "variant '{}' at len {}", variant.name, len);
            }
            for path in KernelPath::ALL {
                assert_eq!(kernel_for(path)(&a, &b), expected, "path {} at len {}", path, len);
            }
        }
    }

    #[test]
    #[should_panic(expected = "Vectors must have the same length")]
    fn test_original_length_mismatch_panics() {
        dot_product_original(&[1, 2, 3], &[1, 2]);
    }

    #[test]
    #[should_panic(expected = "Vectors must have the same length")]
    fn test_lanes_length_mismatch_panics() {
        dot_product_lanes(&[0; 32], &[0; 33]);
    }

    #[test]
    #[should_panic(expected = "Vectors must have the same length")]
    fn test_dispatch_length_mismatch_panics() {
        dot_product(&[0; 17], &[0; 16]);
    }

    #[test]
    fn test_every_variant_rejects_mismatch() {
        for variant in available_variants() {
            let outcome = std::panic::catch_unwind(|| (variant.function)(&[1; 20], &[1; 19]));
            assert!(outcome.is_err(), "variant '{}' accepted mismatched lengths", variant.name);
        }
    }

    fn equal_length_pair() -> impl Strategy<Value = (Vec<i8>, Vec<i8>)> {
        (0usize..=2048).prop_flat_map(|len| {
            (
                prop::collection::vec(any::<i8>(), len),
                prop::collection::vec(any::<i8>(), len),
            )
        })
    }

    proptest! {
        #[test]
        fn prop_variants_match_reference((a, b) in equal_length_pair()) {
            let expected = reference_i64(&a, &b) as i32;
            prop_assert_eq!(dot_product_original(&a, &b), expected);
            for variant in available_variants() {
                prop_assert_eq!((variant.function)(&a, &b), expected, "variant '{}'", variant.name);
            }
            prop_assert_eq!(dot_product(&a, &b), expected);
        }

        #[test]
        fn prop_commutative((a, b) in equal_length_pair()) {
            for variant in available_variants() {
                prop_assert_eq!((variant.function)(&a, &b), (variant.function)(&b, &a), "variant '{}'", variant.name);
            }
        }

        #[test]
        fn prop_split_at_step_boundary_adds_up((a, b) in equal_length_pair()) {
            let cut = a.len() - a.len() % MAX_GROUP;
            let whole = dot_product(&a, &b);
            let parts = dot_product(&a[..cut], &b[..cut])
                .wrapping_add(dot_product(&a[cut..], &b[cut..]));
            prop_assert_eq!(whole, parts);
        }
    }
}
