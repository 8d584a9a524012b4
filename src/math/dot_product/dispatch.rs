//! Runtime kernel selection.
//!
//! The CPU is probed once and one kernel path is chosen for the lifetime of
//! the process. Callers go through [`dot_product`], which jumps straight to
//! the cached function pointer.
//!
//! ```text
//! Path     Registers   Bytes/step  Accumulators  Kernel
//! ───────  ──────────  ──────────  ────────────  ─────────────────────────────
//! wide     >= 256 bit  8           1             AVX2
//! narrow   128 bit     16          4             SSE2 / NEON / portable lanes
//! scalar   -           1           1             reference loop
//! ```
//!
//! The `DOT_KERNEL` environment variable (`wide`, `narrow`, `scalar`)
//! overrides detection. An unsupported request falls back to detection.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use log::{info, warn};

use super::code::{dot_product_original, DotProductFn};
use crate::error::BenchError;

/// Environment variable that overrides kernel detection.
pub const KERNEL_ENV: &str = "DOT_KERNEL";

/// Closed set of kernel paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KernelPath {
    /// 256-bit (or wider) registers, one widen per step.
    Wide,
    /// 128-bit registers, widening split in halves.
    Narrow,
    /// Plain scalar loop.
    Scalar,
}

impl KernelPath {
    pub const ALL: [KernelPath; 3] = [KernelPath::Wide, KernelPath::Narrow, KernelPath::Scalar];

    pub const fn name(self) -> &'static str {
        match self {
            KernelPath::Wide => "wide",
            KernelPath::Narrow => "narrow",
            KernelPath::Scalar => "scalar",
        }
    }

    /// Bytes consumed per vectorized step.
    pub const fn group_size(self) -> usize {
        match self {
            KernelPath::Wide => 8,
            KernelPath::Narrow => 16,
            KernelPath::Scalar => 1,
        }
    }

    /// Whether this CPU can run the path natively.
    pub fn is_supported(self) -> bool {
        match self {
            KernelPath::Wide => wide_available(),
            KernelPath::Narrow | KernelPath::Scalar => true,
        }
    }
}

impl fmt::Display for KernelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KernelPath {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wide" => Ok(KernelPath::Wide),
            "narrow" => Ok(KernelPath::Narrow),
            "scalar" => Ok(KernelPath::Scalar),
            _ => Err(BenchError::UnknownKernel(s.to_string())),
        }
    }
}

/// True when registers of at least 256 bits are usable.
pub fn wide_available() -> bool {
    #[cfg(target_arch = "x86_64")]
    {
        is_x86_feature_detected!("avx2")
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        false
    }
}

/// Pick the best path for this CPU.
pub fn detect() -> KernelPath {
    if wide_available() {
        KernelPath::Wide
    } else {
        KernelPath::Narrow
    }
}

/// Resolve an optional override against the detected capabilities.
pub fn resolve(requested: Option<&str>) -> KernelPath {
    match requested.map(str::parse::<KernelPath>) {
        None => detect(),
        Some(Ok(path)) if path.is_supported() => path,
        Some(Ok(path)) => {
            warn!("{} kernel requested but not supported by this CPU", path);
            detect()
        }
        Some(Err(e)) => {
            warn!("{}; using detected kernel", e);
            detect()
        }
    }
}

/// The path used by [`dot_product`], decided on first use.
pub fn selected() -> KernelPath {
    static SELECTED: OnceLock<KernelPath> = OnceLock::new();

    *SELECTED.get_or_init(|| {
        let path = resolve(std::env::var(KERNEL_ENV).ok().as_deref());
        info!(
            "dot product kernel: {} ({} bytes per step)",
            path,
            path.group_size()
        );
        path
    })
}

/// Function implementing `path` on this target.
pub fn kernel_for(path: KernelPath) -> DotProductFn {
    match path {
        KernelPath::Wide => wide_kernel(),
        KernelPath::Narrow => narrow_kernel(),
        KernelPath::Scalar => dot_product_original as DotProductFn,
    }
}

fn wide_kernel() -> DotProductFn {
    #[cfg(target_arch = "x86_64")]
    {
        super::code::dot_product_x86_64_avx2 as DotProductFn
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        narrow_kernel()
    }
}

fn narrow_kernel() -> DotProductFn {
    #[cfg(target_arch = "x86_64")]
    {
        super::code::dot_product_x86_64_sse2 as DotProductFn
    }
    #[cfg(target_arch = "aarch64")]
    {
        super::code::dot_product_aarch64_neon as DotProductFn
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        super::code::dot_product_lanes as DotProductFn
    }
}

/// Dot product through the selected kernel.
///
/// # Panics
/// Panics if the vectors have different lengths.
///
/// # Example
/// ```
/// use binary_dot_product::math::dot_product::dot_product;
///
/// assert_eq!(dot_product(&[-128, 127], &[127, -128]), -32512);
/// ```
pub fn dot_product(a: &[i8], b: &[i8]) -> i32 {
    static KERNEL: OnceLock<DotProductFn> = OnceLock::new();

    let kernel = *KERNEL.get_or_init(|| kernel_for(selected()));
    kernel(a, b)
}
