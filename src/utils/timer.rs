//! Unified timing system for micro-benchmarks.
//!
//! This module provides the timing infrastructure with:
//! - Support for both CPU cycles and wall-clock time (via features)
//! - Optional CPU core pinning for stable measurements
//! - Randomized variant execution to avoid ordering bias
//!
//! A sample times a batch of calls; statistics are reported per call.

use std::fmt;
use std::hint::black_box;
use std::str::FromStr;

use rand::seq::SliceRandom;

use super::clock::{to_units, Measurement};
use super::cpu_affinity::CpuPinGuard;
use crate::error::BenchError;

/// CPU pinning strategy during measurements
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PinStrategy {
    /// Pin once before all measurements
    Global,
    /// Pin for each sample
    #[default]
    PerSample,
    /// Never pin
    Off,
}

impl PinStrategy {
    pub const fn name(self) -> &'static str {
        match self {
            PinStrategy::Global => "global",
            PinStrategy::PerSample => "per-sample",
            PinStrategy::Off => "off",
        }
    }
}

impl fmt::Display for PinStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PinStrategy {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(PinStrategy::Global),
            "per-sample" | "per_sample" => Ok(PinStrategy::PerSample),
            "off" | "none" => Ok(PinStrategy::Off),
            _ => Err(BenchError::UnknownPinStrategy(s.to_string())),
        }
    }
}

/// Configuration for timing measurements
#[derive(Clone, Debug)]
pub struct TimingConfig {
    /// Warm-up samples per variant, discarded (default: 3)
    pub warmup_iterations: usize,
    /// Measured samples per variant (default: 5)
    pub runs_per_variant: usize,
    /// Kernel calls timed together in one sample (default: 10_000)
    pub calls_per_sample: usize,
    /// CPU pinning strategy (default: PerSample)
    pub pin_strategy: PinStrategy,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            warmup_iterations: 3,
            runs_per_variant: 5,
            calls_per_sample: 10_000,
            pin_strategy: PinStrategy::default(),
        }
    }
}

/// A variant to be measured
pub struct Variant<'a> {
    /// Unique name of the variant
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Runs one sample - returns (measurement, optional result value).
    /// Timing happens inside the closure to eliminate Fn trait overhead.
    pub run: Box<dyn FnMut() -> (Measurement, Option<f64>) + 'a>,
}

/// Result from measuring a single variant. Times are per call, in clock units.
#[derive(Clone, Debug, PartialEq)]
pub struct VariantResult {
    pub name: String,
    pub description: String,
    pub avg: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
    /// Number of measured samples
    pub samples: usize,
    pub calls_per_sample: usize,
    /// Result of the last sample, for cross-checking variants
    pub result_sample: Option<f64>,
}

impl VariantResult {
    /// Coefficient of variation.
    pub fn cv(&self) -> f64 {
        if self.avg > 0.0 {
            self.std_dev / self.avg
        } else {
            0.0
        }
    }

    /// Calls per 1000 clock units (ops/µs for time, ops/kcycle for cycles).
    pub fn throughput(&self) -> f64 {
        if self.avg > 0.0 {
            1000.0 / self.avg
        } else {
            f64::INFINITY
        }
    }
}

/// Measure multiple variants with randomized execution order.
///
/// 1. Warms up all variants
/// 2. Creates a shuffled task schedule
/// 3. Measures each sample, pinned according to the config
/// 4. Returns per-call statistics for every variant, in input order
pub fn measure_variants(mut variants: Vec<Variant>, config: &TimingConfig) -> Vec<VariantResult> {
    if variants.is_empty() {
        return Vec::new();
    }

    let samples = config.runs_per_variant;

    for variant in &mut variants {
        for _ in 0..config.warmup_iterations {
            black_box((variant.run)());
        }
    }

    // (variant_idx, sample_idx)
    let mut tasks: Vec<(usize, usize)> = (0..variants.len())
        .flat_map(|v| (0..samples).map(move |s| (v, s)))
        .collect();
    tasks.shuffle(&mut rand::rng());

    let mut measurements: Vec<Vec<u64>> = (0..variants.len())
        .map(|_| Vec::with_capacity(samples))
        .collect();
    let mut result_samples: Vec<Option<f64>> = vec![None; variants.len()];

    let _global_pin = (config.pin_strategy == PinStrategy::Global).then(CpuPinGuard::new);

    for (variant_idx, _) in tasks {
        let variant = &mut variants[variant_idx];
        let _sample_pin = (config.pin_strategy == PinStrategy::PerSample).then(CpuPinGuard::new);
        let (elapsed, result) = (variant.run)();

        measurements[variant_idx].push(to_units(elapsed));
        result_samples[variant_idx] = result;
    }

    variants
        .into_iter()
        .enumerate()
        .map(|(idx, variant)| {
            summarize(
                variant.name,
                variant.description,
                &measurements[idx],
                config.calls_per_sample,
                result_samples[idx],
            )
        })
        .collect()
}

/// Compute per-call statistics from raw sample totals
fn summarize(
    name: &str,
    description: &str,
    totals: &[u64],
    calls_per_sample: usize,
    result_sample: Option<f64>,
) -> VariantResult {
    let calls = calls_per_sample.max(1) as f64;
    let mut per_call: Vec<f64> = totals.iter().map(|&t| t as f64 / calls).collect();
    per_call.sort_by(f64::total_cmp);

    let (avg, std_dev) = mean_and_std_dev(&per_call);

    VariantResult {
        name: name.to_string(),
        description: description.to_string(),
        avg,
        median: calculate_median(&per_call),
        min: per_call.first().copied().unwrap_or(0.0),
        max: per_call.last().copied().unwrap_or(0.0),
        std_dev,
        samples: per_call.len(),
        calls_per_sample,
        result_sample,
    }
}

/// Mean and sample standard deviation.
pub fn mean_and_std_dev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    if values.len() < 2 {
        return (mean, 0.0);
    }
    let variance = values
        .iter()
        .map(|&v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / (values.len() - 1) as f64;
    (mean, variance.sqrt())
}

/// Median of an already sorted slice.
pub fn calculate_median(sorted: &[f64]) -> f64 {
    match sorted.len() {
        0 => 0.0,
        n if n % 2 == 1 => sorted[n / 2],
        n => (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0,
    }
}
