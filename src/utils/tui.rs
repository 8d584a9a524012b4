//! Text User Interface (TUI) utilities.
//!
//! Handles formatted output for the CLI.

use terminal_size::{terminal_size, Width};

use super::clock::{throughput_unit, unit_name};
use super::timer::{TimingConfig, VariantResult};
use crate::math::dot_product::REFERENCE;
use crate::registry::{AlgorithmRegistry, AlgorithmRunner};

/// Get the current terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Sorting priority: reference (0), portable Rust (1), intrinsics (2)
fn variant_sort_key(result: &VariantResult) -> (u8, String) {
    let name = result.name.to_lowercase();

    if name == REFERENCE {
        (0, String::new())
    } else if name.starts_with("x86_64") || name.starts_with("aarch64") {
        (2, name)
    } else {
        (1, name)
    }
}

/// Sort variants: reference first, then portable, then intrinsics
pub fn sort_variants(results: &mut [VariantResult]) {
    results.sort_by_key(variant_sort_key);
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

/// Print algorithm info box
pub fn print_algo_info_box(algo: &dyn AlgorithmRunner, kernel: &str) {
    let max_content_width = get_term_width().saturating_sub(4).max(40);

    let lines = [
        format!("Algorithm: {}", algo.name()),
        format!("Category:  {}", algo.category()),
        algo.description().to_string(),
        format!("Variants:  {}", algo.available_variants().join(", ")),
        format!("Dispatch:  {}", kernel),
    ];

    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(60)
        .min(max_content_width);

    let border = "─".repeat(content_width + 2);
    let row = |line: &str| {
        println!(
            "│ {:<width$} │",
            truncate(line, content_width),
            width = content_width
        )
    };

    println!("┌{}┐", border);
    for line in &lines[..3] {
        row(line.as_str());
    }
    println!("├{}┤", border);
    for line in &lines[3..] {
        row(line.as_str());
    }
    println!("└{}┘", border);
    println!();
}

/// Print results table for a single size
pub fn print_results_table(results: &[VariantResult], size: usize, config: &TimingConfig) {
    if results.is_empty() {
        return;
    }

    let term_width = get_term_width();
    let fixed_width = 80;
    let variant_col_width = term_width.saturating_sub(fixed_width).max(15);
    let table_width = variant_col_width + 72 + 7;

    let baseline = results.first().map(|r| r.avg).unwrap_or(1.0);
    let unit = unit_name();

    println!(
        "  Size: {} ({} runs x {} calls, per call in {})",
        size, config.runs_per_variant, config.calls_per_sample, unit
    );
    println!("  {}", "─".repeat(table_width));
    println!(
        "  {:<v_width$} {:>10} {:>10} {:>10} {:>9} {:>8} {:>12} {:>12}",
        "Variant",
        "Average",
        "Min",
        "Max",
        "Speedup",
        "CV",
        throughput_unit(),
        "Result",
        v_width = variant_col_width
    );
    println!("  {}", "─".repeat(table_width));

    for result in results {
        let speedup = if result.avg > 0.0 {
            baseline / result.avg
        } else {
            0.0
        };

        let value = result
            .result_sample
            .map(|v| format!("{}", v as i64))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "  {:<v_width$} {:>10.2} {:>10.2} {:>10.2} {:>8.2}x {:>7.2}% {:>12.2} {:>12}",
            truncate(&result.name, variant_col_width),
            result.avg,
            result.min,
            result.max,
            speedup,
            result.cv() * 100.0,
            result.throughput(),
            value,
            v_width = variant_col_width
        );
    }
    println!();
}

/// Print the application header
pub fn print_header() {
    let term_width = get_term_width().min(80);
    let title = " Binary Dot Product Benchmarks ";
    let padding = term_width.saturating_sub(title.len() + 2) / 2;
    let right_padding = term_width.saturating_sub(padding + title.len());

    let border = "═".repeat(term_width);

    println!("╔{}╗", border);
    println!(
        "║{}{}{}║",
        " ".repeat(padding),
        title,
        " ".repeat(right_padding)
    );
    println!("╚{}╝", border);
    println!();
}

/// Print the list of available algorithms
pub fn print_available_algorithms(registry: &AlgorithmRegistry) {
    println!("Available algorithms:");
    println!();
    for algo in registry.all() {
        println!(
            "  {:<20} [{}] - {}",
            algo.name(),
            algo.category(),
            algo.description()
        );
        println!("  {:<20} variants: {}", "", algo.available_variants().join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str) -> VariantResult {
        VariantResult {
            name: name.to_string(),
            description: String::new(),
            avg: 1.0,
            median: 1.0,
            min: 1.0,
            max: 1.0,
            std_dev: 0.0,
            samples: 1,
            calls_per_sample: 1,
            result_sample: None,
        }
    }

    #[test]
    fn test_sort_reference_first() {
        let mut results = vec![
            result("x86_64-sse2"),
            result("lanes"),
            result("x86_64-avx2"),
            result("original"),
        ];
        sort_variants(&mut results);
        let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["original", "lanes", "x86_64-avx2", "x86_64-sse2"]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("much too long", 8), "much ...");
        assert_eq!(truncate("╔═══╗", 5), "╔═══╗");
    }
}
