use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn page_size() -> Option<u64> {
        None
    }

    fn online_cpus() -> Option<usize> {
        std::thread::available_parallelism().ok().map(|n| n.get())
    }
}
