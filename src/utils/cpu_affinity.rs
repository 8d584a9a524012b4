//! Thread pinning for stable measurements.
//!
//! On Linux the measuring thread is pinned to the core it is running on via
//! `sched_setaffinity`, and the previous mask is restored afterwards. Other
//! platforms get a no-op guard.

#[cfg(target_os = "linux")]
mod platform {
    use std::mem;

    /// Affinity mask of the calling thread.
    pub fn current_mask() -> Option<libc::cpu_set_t> {
        unsafe {
            let mut set: libc::cpu_set_t = mem::zeroed();
            (libc::sched_getaffinity(0, mem::size_of::<libc::cpu_set_t>(), &mut set) == 0)
                .then_some(set)
        }
    }

    pub fn current_cpu() -> Option<usize> {
        let cpu = unsafe { libc::sched_getcpu() };
        usize::try_from(cpu).ok()
    }

    pub fn pin(core_id: usize) -> bool {
        unsafe {
            let mut set: libc::cpu_set_t = mem::zeroed();
            libc::CPU_ZERO(&mut set);
            libc::CPU_SET(core_id, &mut set);
            libc::sched_setaffinity(0, mem::size_of::<libc::cpu_set_t>(), &set) == 0
        }
    }

    pub fn restore(mask: &libc::cpu_set_t) -> bool {
        unsafe { libc::sched_setaffinity(0, mem::size_of::<libc::cpu_set_t>(), mask) == 0 }
    }

    pub type Saved = libc::cpu_set_t;
}

#[cfg(not(target_os = "linux"))]
mod platform {
    pub type Saved = ();

    pub fn current_mask() -> Option<Saved> {
        None
    }

    pub fn current_cpu() -> Option<usize> {
        None
    }

    pub fn pin(_core_id: usize) -> bool {
        false
    }

    pub fn restore(_mask: &Saved) -> bool {
        true
    }
}

/// Core the calling thread is currently running on, if the OS tells us.
pub fn current_cpu() -> Option<usize> {
    platform::current_cpu()
}

/// RAII guard for CPU pinning - pins on creation, restores on drop.
///
/// # Example
/// ```ignore
/// {
///     let _pin = CpuPinGuard::new(); // Thread pinned
///     // ... do timing measurements ...
/// } // Original affinity restored here
/// ```
pub struct CpuPinGuard {
    pinned_core: Option<usize>,
    saved: Option<platform::Saved>,
}

impl CpuPinGuard {
    /// Pin to the current core, saving the previous affinity.
    pub fn new() -> Self {
        let saved = platform::current_mask();
        let pinned_core = match (saved.is_some(), current_cpu()) {
            (true, Some(core)) if platform::pin(core) => Some(core),
            _ => None,
        };
        if pinned_core.is_none() {
            log::trace!("thread pinning unavailable, measuring unpinned");
        }
        Self { pinned_core, saved }
    }

    /// Core this thread is pinned to, if any.
    pub fn core_id(&self) -> Option<usize> {
        self.pinned_core
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned_core.is_some()
    }
}

impl Drop for CpuPinGuard {
    fn drop(&mut self) {
        if self.pinned_core.is_none() {
            return;
        }
        if let Some(saved) = &self.saved {
            if !platform::restore(saved) {
                log::warn!("failed to restore CPU affinity");
            }
        }
    }
}

impl Default for CpuPinGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_guard_reports_core() {
        let guard = CpuPinGuard::new();
        if guard.is_pinned() {
            assert!(guard.core_id().is_some());
        }
        drop(guard);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_pin_guard_restores_mask() {
        let before = platform::current_mask().expect("affinity readable");
        {
            let _guard = CpuPinGuard::new();
        }
        let after = platform::current_mask().expect("affinity readable");
        // cpu_set_t has no PartialEq; compare the set bits
        let cores = libc::CPU_SETSIZE as usize;
        for core in 0..cores {
            assert_eq!(
                unsafe { libc::CPU_ISSET(core, &before) },
                unsafe { libc::CPU_ISSET(core, &after) },
                "core {} membership changed",
                core
            );
        }
    }
}
