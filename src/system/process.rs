use serde::Serialize;

/// Parent pid of kernel-managed tasks (kthreadd).
pub const KTHREADD_PID: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ProcessState {
    Running,
    Sleeping,
    DiskWait,
    Zombie,
    Stopped,
    TracingStop,
    Dead,
    Idle,
    Wakekill,
    Waking,
    Parked,
    Other(char),
}

impl ProcessState {
    pub fn from_code(code: char) -> Self {
        match code {
            'R' => ProcessState::Running,
            'S' => ProcessState::Sleeping,
            'D' => ProcessState::DiskWait,
            'Z' => ProcessState::Zombie,
            'T' => ProcessState::Stopped,
            't' => ProcessState::TracingStop,
            'X' | 'x' => ProcessState::Dead,
            'I' => ProcessState::Idle,
            'K' => ProcessState::Wakekill,
            'W' => ProcessState::Waking,
            'P' => ProcessState::Parked,
            other => ProcessState::Other(other),
        }
    }

    /// Single-character code as shown by `ps`.
    pub fn code(self) -> char {
        match self {
            ProcessState::Running => 'R',
            ProcessState::Sleeping => 'S',
            ProcessState::DiskWait => 'D',
            ProcessState::Zombie => 'Z',
            ProcessState::Stopped => 'T',
            ProcessState::TracingStop => 't',
            ProcessState::Dead => 'X',
            ProcessState::Idle => 'I',
            ProcessState::Wakekill => 'K',
            ProcessState::Waking => 'W',
            ProcessState::Parked => 'P',
            ProcessState::Other(c) => c,
        }
    }
}

/// One process as seen during a single sampling cycle.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessSample {
    pub pid: u32,
    pub ppid: u32,
    pub name: String,
    pub state: ProcessState,
    pub utime: u64,
    pub stime: u64,
    pub start_time: u64,
    pub memory_kb: u64,
    pub uid: u32,
    pub user: String,
    pub cpu_percent: f64,
    pub is_kernel_thread: bool,
}

impl ProcessSample {
    pub fn total_ticks(&self) -> u64 {
        self.utime.saturating_add(self.stime)
    }
}

/// Kernel/helper task heuristic: either condition alone is enough.
pub fn is_kernel_thread(ppid: u32, name: &str) -> bool {
    ppid == KTHREADD_PID || (name.len() >= 2 && name.starts_with('[') && name.ends_with(']'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_codes_round_trip_known_letters() {
        for code in ['R', 'S', 'D', 'Z', 'T', 't', 'X', 'I', 'K', 'W', 'P'] {
            assert_eq!(ProcessState::from_code(code).code(), code);
        }
        assert_eq!(ProcessState::from_code('?'), ProcessState::Other('?'));
    }

    #[test]
    fn kernel_thread_by_parent() {
        assert!(is_kernel_thread(2, "kworker/0:1"));
        assert!(!is_kernel_thread(1, "kworker/0:1"));
    }

    #[test]
    fn kernel_thread_by_brackets() {
        assert!(is_kernel_thread(1, "[migration]"));
        assert!(!is_kernel_thread(1, "["));
        assert!(!is_kernel_thread(1, "bash [x"));
    }
}
