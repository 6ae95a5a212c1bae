pub trait PlatformExtensions {
    /// Memory page size in bytes.
    fn page_size() -> Option<u64>;
    /// Logical processors currently online.
    fn online_cpus() -> Option<usize>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(not(target_os = "linux"))]
mod fallback;

#[cfg(not(target_os = "linux"))]
use fallback as platform_impl;
#[cfg(target_os = "linux")]
use linux as platform_impl;

const DEFAULT_PAGE_SIZE: u64 = 4096;

/// Page size in KiB, for converting resident page counts.
pub fn page_size_kib() -> u64 {
    (platform_impl::Platform::page_size().unwrap_or(DEFAULT_PAGE_SIZE) / 1024).max(1)
}

pub fn online_cpus() -> usize {
    platform_impl::Platform::online_cpus().unwrap_or(1).max(1)
}
