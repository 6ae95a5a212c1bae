use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn page_size() -> Option<u64> {
        // SAFETY: sysconf has no preconditions and only reads configuration.
        let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        u64::try_from(size).ok().filter(|&s| s > 0)
    }

    fn online_cpus() -> Option<usize> {
        // SAFETY: as above.
        let count = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
        usize::try_from(count).ok().filter(|&c| c > 0)
    }
}
