//! Algorithm registry for dynamic algorithm discovery and execution.
//!
//! The CLI and the registry-wide verification test go through this
//! interface rather than naming kernels directly.

use crate::error::BenchError;
use crate::utils::timer::Variant;

/// Trait that all algorithm benchmarkers must implement
pub trait AlgorithmRunner: Send + Sync {
    /// Name of the algorithm (e.g., "dot_product_i8")
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Category (e.g., "math")
    fn category(&self) -> &'static str;

    /// Get list of available variant names
    fn available_variants(&self) -> Vec<&'static str>;

    /// Set up one trial: fresh random inputs of `size` derived from `seed`,
    /// checked so that every variant agrees on them, then one closure per
    /// variant. Each closure times `calls_per_sample` calls.
    /// The runner will handle warmup, scheduling, and statistics.
    fn prepare_trial<'a>(
        &'a self,
        size: usize,
        seed: u64,
        calls_per_sample: usize,
    ) -> Result<Vec<Variant<'a>>, BenchError>;

    /// Verify correctness of all variants against the reference
    fn verify(&self) -> Result<(), BenchError>;
}

/// Global registry of all algorithms
pub struct AlgorithmRegistry {
    algorithms: Vec<Box<dyn AlgorithmRunner>>,
}

impl AlgorithmRegistry {
    pub fn new() -> Self {
        Self {
            algorithms: Vec::new(),
        }
    }

    pub fn register<A: AlgorithmRunner + 'static>(&mut self, algo: A) {
        self.algorithms.push(Box::new(algo));
    }

    pub fn all(&self) -> &[Box<dyn AlgorithmRunner>] {
        &self.algorithms
    }

    /// Find algorithm by name
    pub fn find(&self, name: &str) -> Option<&dyn AlgorithmRunner> {
        self.algorithms
            .iter()
            .find(|a| a.name() == name)
            .map(|a| a.as_ref())
    }

    pub fn list_names(&self) -> Vec<&'static str> {
        self.algorithms.iter().map(|a| a.name()).collect()
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the default registry with all algorithms
pub fn build_registry() -> AlgorithmRegistry {
    let mut registry = AlgorithmRegistry::new();

    registry.register(crate::math::dot_product::DotProductRunner);

    registry
}
