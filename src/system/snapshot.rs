use serde::Serialize;

use super::metrics;
use super::process::ProcessSample;

/// Cumulative counters of one network interface. Not rates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NetworkInterfaceSample {
    pub name: String,
    pub rx_bytes: u64,
    pub rx_packets: u64,
    pub tx_bytes: u64,
    pub tx_packets: u64,
}

/// Published result of one sampling cycle. Never mutated after publication.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SystemSnapshot {
    pub cpu_percent: f64,
    pub memory_total_kb: u64,
    pub memory_used_kb: u64,
    pub memory_free_kb: u64,
    pub load_average: [f64; 3],
    /// Every readable process, counted before filtering.
    pub process_count: usize,
    pub processes: Vec<ProcessSample>,
    pub network_interfaces: Vec<NetworkInterfaceSample>,
}

impl SystemSnapshot {
    pub fn memory_percent(&self) -> f64 {
        metrics::memory_percent(self.memory_used_kb, self.memory_total_kb)
    }
}
