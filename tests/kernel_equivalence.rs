//! Public API checks for the dot product kernels.

use binary_dot_product::math::dot_product::dispatch::{kernel_for, resolve, selected};
use binary_dot_product::math::dot_product::{
    available_variants, check_variants, dot_product, dot_product_lanes, dot_product_original,
    KernelPath, DEFAULT_SIZES, REFERENCE, SAFE_LEN,
};
use binary_dot_product::prelude::build_registry;
use binary_dot_product::utils::random_pair;
use binary_dot_product::BenchError;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn known_values_through_dispatch() {
    assert_eq!(dot_product(&[1, 2, 3], &[4, 5, 6]), 32);
    assert_eq!(dot_product(&[-128, 127], &[127, -128]), -32512);
    assert_eq!(dot_product(&[], &[]), 0);
}

#[test]
fn reference_variant_is_listed_first() {
    let variants = available_variants();
    assert_eq!(variants[0].name, REFERENCE);
    assert!(variants.iter().any(|v| v.name == "lanes"));
}

#[test]
fn selected_kernel_is_supported() {
    let path = selected();
    assert!(path.is_supported());
    assert_eq!(resolve(Some(path.name())), path);
}

#[test]
fn check_variants_agrees_on_default_sizes() {
    for (i, &size) in DEFAULT_SIZES.iter().enumerate() {
        let (a, b) = random_pair(size, 1000 + i as u64);
        let value = check_variants(&a, &b).unwrap();
        assert_eq!(value, dot_product_original(&a, &b));
    }
}

#[test]
fn registry_prepares_checked_trials() {
    let registry = build_registry();
    let algo = registry.find("dot_product_i8").unwrap();
    let mut variants = algo.prepare_trial(300, 9, 2).unwrap();
    assert_eq!(variants.len(), algo.available_variants().len());

    let (a, b) = random_pair(300, 9);
    let expected = dot_product_original(&a, &b) as f64;
    for variant in &mut variants {
        let (_, result) = (variant.run)();
        assert_eq!(result, Some(expected), "variant {}", variant.name);
    }
}

#[test]
fn unknown_kernel_name_is_an_error() {
    let err = "avx1024".parse::<KernelPath>().unwrap_err();
    assert!(matches!(err, BenchError::UnknownKernel(ref s) if s == "avx1024"));
    assert!(err.to_string().contains("avx1024"));
}

#[test]
fn safe_len_matches_worst_case() {
    assert_eq!(SAFE_LEN, 131_071);
    assert!((SAFE_LEN as i64) * 16384 <= i32::MAX as i64);
    assert!((SAFE_LEN as i64 + 1) * 16384 > i32::MAX as i64);
}

#[test]
#[should_panic(expected = "Vectors must have the same length")]
fn mismatched_lengths_panic() {
    dot_product(&[1, 2, 3, 4, 5, 6, 7, 8, 9], &[1, 2, 3, 4, 5, 6, 7, 8]);
}

proptest! {
    #[test]
    fn every_path_matches_reference(
        (a, b) in (0usize..=2048).prop_flat_map(|len| (
            prop::collection::vec(any::<i8>(), len),
            prop::collection::vec(any::<i8>(), len),
        ))
    ) {
        let expected = dot_product_original(&a, &b);
        prop_assert_eq!(dot_product_lanes(&a, &b), expected);
        for path in KernelPath::ALL {
            prop_assert_eq!(kernel_for(path)(&a, &b), expected, "path {}", path);
        }
        prop_assert_eq!(dot_product(&b, &a), expected);
    }
}
