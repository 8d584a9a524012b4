//! Trial runner and CSV export.
//!
//! One trial per input size: fresh inputs, the cross-variant self-check,
//! then the timed measurement. A failed self-check aborts the run.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::{debug, info};

use super::clock::{throughput_unit, unit_name};
use super::timer::{measure_variants, TimingConfig, VariantResult};
use super::tui::sort_variants;
use crate::error::BenchError;
use crate::registry::AlgorithmRunner;

/// Results of one trial
#[derive(Clone, Debug)]
pub struct SizeReport {
    pub size: usize,
    pub results: Vec<VariantResult>,
}

/// Raw timing data for a single variant (used for CSV export)
#[derive(Clone, Debug, PartialEq)]
pub struct RawTimingData {
    pub algo_name: String,
    pub variant_name: String,
    pub input_size: usize,
    pub avg_per_call: f64,
    pub throughput: f64,
    pub result_sample: Option<f64>,
}

/// Trial seed for the `index`-th size of a run seeded with `seed`.
pub fn trial_seed(seed: u64, index: usize) -> u64 {
    seed.wrapping_add(index as u64)
}

/// Run one trial per size for `algo`.
pub fn run_algorithm(
    algo: &dyn AlgorithmRunner,
    sizes: &[usize],
    seed: u64,
    config: &TimingConfig,
) -> Result<Vec<SizeReport>, BenchError> {
    info!(
        "running {} over {} sizes ({} warmup, {} runs x {} calls)",
        algo.name(),
        sizes.len(),
        config.warmup_iterations,
        config.runs_per_variant,
        config.calls_per_sample
    );

    sizes
        .iter()
        .enumerate()
        .map(|(idx, &size)| {
            let variants = algo.prepare_trial(size, trial_seed(seed, idx), config.calls_per_sample)?;
            let mut results = measure_variants(variants, config);
            sort_variants(&mut results);
            debug!("size {} measured {} variants", size, results.len());
            Ok(SizeReport { size, results })
        })
        .collect()
}

/// Flatten reports into CSV rows
pub fn raw_timing_data(algo_name: &str, reports: &[SizeReport]) -> Vec<RawTimingData> {
    reports
        .iter()
        .flat_map(|report| {
            report.results.iter().map(move |r| RawTimingData {
                algo_name: algo_name.to_string(),
                variant_name: r.name.clone(),
                input_size: report.size,
                avg_per_call: r.avg,
                throughput: r.throughput(),
                result_sample: r.result_sample,
            })
        })
        .collect()
}

/// Write timing data as CSV
pub fn write_csv<W: Write>(mut out: W, data: &[RawTimingData]) -> io::Result<()> {
    writeln!(out, "algorithm,variant,input_size,avg_per_call,unit,throughput,throughput_unit,result")?;

    for entry in data {
        writeln!(
            out,
            "{},{},{},{:.3},{},{:.3},{},{}",
            entry.algo_name,
            entry.variant_name,
            entry.input_size,
            entry.avg_per_call,
            unit_name(),
            entry.throughput,
            throughput_unit(),
            entry.result_sample.map(|v| v.to_string()).unwrap_or_default()
        )?;
    }

    out.flush()
}

/// Export timing data to CSV file
pub fn export_csv(path: &Path, data: &[RawTimingData]) -> Result<(), BenchError> {
    let file = File::create(path)?;
    write_csv(BufWriter::new(file), data)?;
    info!("wrote {} rows to {}", data.len(), path.display());
    Ok(())
}
