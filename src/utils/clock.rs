//! Measurement clock: CPU cycle counter or wall-clock time.
//!
//! By default (`cpu_cycles` feature) samples are read from the cycle counter
//! for precise micro-benchmarking. Use `--features use_time` or
//! `--no-default-features` to measure wall-clock time instead.
//!
//! Either way a [`Measurement`] converts to plain `u64` units with
//! [`to_units`], labelled by [`unit_name`].

// Use CPU cycles if: cpu_cycles is enabled AND use_time is NOT enabled
// Use wall-clock time if: use_time is enabled OR cpu_cycles is disabled

#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
mod imp {
    pub type Stamp = u64;
    pub type Measurement = u64;

    #[inline(always)]
    pub fn now() -> Stamp {
        read_cycles()
    }

    #[inline(always)]
    pub fn elapsed(start: Stamp) -> Measurement {
        read_cycles().saturating_sub(start)
    }

    pub fn to_units(m: Measurement) -> u64 {
        m
    }

    pub const fn unit_name() -> &'static str {
        #[cfg(target_arch = "aarch64")]
        {
            "ticks"
        }
        #[cfg(not(target_arch = "aarch64"))]
        {
            "cycles"
        }
    }

    pub const fn throughput_unit() -> &'static str {
        #[cfg(target_arch = "aarch64")]
        {
            "ops/ktick"
        }
        #[cfg(not(target_arch = "aarch64"))]
        {
            "ops/kcycle"
        }
    }

    /// Read the CPU cycle counter.
    ///
    /// x86_64: RDTSC fenced by LFENCE so earlier instructions retire first.
    #[cfg(target_arch = "x86_64")]
    #[inline(always)]
    pub fn read_cycles() -> u64 {
        use core::arch::x86_64::{_mm_lfence, _rdtsc};
        unsafe {
            _mm_lfence();
            let cycles = _rdtsc();
            _mm_lfence();
            cycles
        }
    }

    /// Read the virtual timer counter.
    ///
    /// aarch64: CNTVCT_EL0 is readable from userspace. It ticks at a fixed
    /// frequency rather than per core cycle.
    #[cfg(target_arch = "aarch64")]
    #[inline(always)]
    pub fn read_cycles() -> u64 {
        let val: u64;
        unsafe {
            core::arch::asm!("isb", "mrs {}, cntvct_el0", out(reg) val);
        }
        val
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    pub fn read_cycles() -> u64 {
        compile_error!("cpu_cycles feature requires x86_64 or aarch64; build with --features use_time")
    }
}

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
mod imp {
    use std::time::{Duration, Instant};

    pub type Stamp = Instant;
    pub type Measurement = Duration;

    #[inline(always)]
    pub fn now() -> Stamp {
        Instant::now()
    }

    #[inline(always)]
    pub fn elapsed(start: Stamp) -> Measurement {
        start.elapsed()
    }

    pub fn to_units(m: Measurement) -> u64 {
        m.as_nanos() as u64
    }

    pub const fn unit_name() -> &'static str {
        "ns"
    }

    pub const fn throughput_unit() -> &'static str {
        "ops/µs"
    }
}

pub use imp::*;
