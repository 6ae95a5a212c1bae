use std::collections::HashMap;

/// Tick fields kept from the previous cycle for one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSample {
    pub ticks: u64,
    pub start_time: u64,
}

/// Previous cycle's per-process CPU ticks, keyed by pid.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    entries: HashMap<u32, TickSample>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pid: u32) -> Option<TickSample> {
        self.entries.get(&pid).copied()
    }

    /// Prior ticks for `pid`, provided it is the same process (same start tick).
    pub fn previous_ticks(&self, pid: u32, start_time: u64) -> Option<u64> {
        self.get(pid)
            .filter(|prev| prev.start_time == start_time)
            .map(|prev| prev.ticks)
    }

    /// Swap in the current cycle's samples. Pids missing from `samples` are gone.
    pub fn replace<I>(&mut self, samples: I)
    where
        I: IntoIterator<Item = (u32, TickSample)>,
    {
        self.entries = samples.into_iter().collect();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
