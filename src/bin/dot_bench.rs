//! CLI for running the dot product benchmarks.
//!
//! Usage:
//!   dot-bench                       # Run all algorithms over the default sizes
//!   dot-bench --list                # List available algorithms
//!   dot-bench dot_product_i8        # Run a specific algorithm
//!   dot-bench --sizes 128,512 --csv data.csv
//!
//! Set `DOT_KERNEL=wide|narrow|scalar` to override kernel dispatch and
//! `RUST_LOG=debug` to see per-trial self-checks.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use binary_dot_product::math::dot_product::{dispatch, DEFAULT_SIZES};
use binary_dot_product::registry::{build_registry, AlgorithmRunner};
use binary_dot_product::tui;
use binary_dot_product::utils::runner;
use binary_dot_product::utils::timer::{PinStrategy, TimingConfig};
use binary_dot_product::BenchError;

#[derive(Parser, Debug)]
#[command(name = "dot-bench", version, about = "Scalar vs SIMD signed byte dot product benchmarks")]
struct Args {
    /// Name of a specific algorithm to run (omit for all)
    algorithm: Option<String>,

    /// List all available algorithms
    #[arg(short, long)]
    list: bool,

    /// Comma-separated input lengths
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_SIZES)]
    sizes: Vec<usize>,

    /// Warm-up samples per variant
    #[arg(long, default_value_t = 3)]
    warmup: usize,

    /// Measured samples per variant
    #[arg(short, long, default_value_t = 5)]
    runs: usize,

    /// Kernel calls per sample
    #[arg(long, default_value_t = 10_000)]
    batch: usize,

    /// Random seed for reproducible inputs (default: random)
    #[arg(long)]
    seed: Option<u64>,

    /// Export raw timings to CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// CPU pinning: global, per-sample or off
    #[arg(long, default_value = "per-sample")]
    pin: PinStrategy,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let registry = build_registry();

    if args.list {
        tui::print_available_algorithms(&registry);
        return Ok(());
    }

    let algorithms: Vec<&dyn AlgorithmRunner> = match &args.algorithm {
        Some(name) => vec![registry
            .find(name)
            .ok_or_else(|| BenchError::UnknownAlgorithm(name.clone()))
            .with_context(|| format!("available: {:?}", registry.list_names()))?],
        None => registry.all().iter().map(|a| a.as_ref()).collect(),
    };

    let config = TimingConfig {
        warmup_iterations: args.warmup,
        runs_per_variant: args.runs.max(1),
        calls_per_sample: args.batch.max(1),
        pin_strategy: args.pin,
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    let kernel = dispatch::selected();
    info!("seed {}, pinning {}", seed, config.pin_strategy);

    tui::print_header();

    let mut raw_data = Vec::new();
    for algo in algorithms {
        tui::print_algo_info_box(algo, kernel.name());

        let reports = runner::run_algorithm(algo, &args.sizes, seed, &config)
            .with_context(|| format!("benchmark '{}' aborted (seed {})", algo.name(), seed))?;

        for report in &reports {
            tui::print_results_table(&report.results, report.size, &config);
        }
        raw_data.extend(runner::raw_timing_data(algo.name(), &reports));
    }

    if let Some(path) = &args.csv {
        runner::export_csv(path, &raw_data)
            .with_context(|| format!("failed to export CSV to {}", path.display()))?;
        println!("  Raw data exported to: {}", path.display());
        println!();
    }

    println!("Note: Speedup is relative to the reference variant ('original').");
    Ok(())
}
