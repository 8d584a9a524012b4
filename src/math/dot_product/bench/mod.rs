//! Benchmark closures for the dot product variants.

use std::hint::black_box;
use std::sync::Arc;

use super::code::available_variants;
use crate::utils::clock::{elapsed, now};
use crate::utils::timer::Variant;

/// One closure per available variant. Each call times `calls` kernel
/// invocations on the shared inputs and reports the last result.
pub fn variant_closures<'a>(a: Arc<Vec<i8>>, b: Arc<Vec<i8>>, calls: usize) -> Vec<Variant<'a>> {
    available_variants()
        .into_iter()
        .map(|v| {
            let a = Arc::clone(&a);
            let b = Arc::clone(&b);
            let func = v.function;

            Variant {
                name: v.name,
                description: v.description,
                run: Box::new(move || {
                    let mut result = 0;
                    let start = now();
                    for _ in 0..calls {
                        result = black_box(func(black_box(a.as_slice()), black_box(b.as_slice())));
                    }
                    let total = elapsed(start);
                    (total, Some(result as f64))
                }),
            }
        })
        .collect()
}
