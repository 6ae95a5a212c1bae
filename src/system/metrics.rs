//! Percentages derived from pairs of cumulative counters.

use super::procfs::CpuTotals;

/// Tick deltas between two consecutive `/proc/stat` samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuDelta {
    pub total: u64,
    pub idle: u64,
}

/// `None` until there is a baseline to difference against.
pub fn cpu_delta(previous: Option<CpuTotals>, current: CpuTotals) -> Option<CpuDelta> {
    let previous = previous?;
    Some(CpuDelta {
        total: current.total.saturating_sub(previous.total),
        idle: current.idle.saturating_sub(previous.idle),
    })
}

/// `100 * (1 - idle/total)` over the delta, in `[0, 100]`.
pub fn system_cpu_percent(delta: Option<CpuDelta>) -> f64 {
    match delta {
        Some(d) if d.total > 0 => {
            (100.0 * (1.0 - d.idle as f64 / d.total as f64)).clamp(0.0, 100.0)
        }
        _ => 0.0,
    }
}

/// Share of one process over the interval, where a fully busy core is 100%.
///
/// Returns 0.0 without a previous sample or a usable system delta. The result
/// is clamped to `[0, 100 * cores]`.
pub fn process_cpu_percent(
    previous_ticks: Option<u64>,
    current_ticks: u64,
    delta_total: Option<u64>,
    cores: usize,
) -> f64 {
    let (Some(previous), Some(delta_total)) = (previous_ticks, delta_total) else {
        return 0.0;
    };
    if delta_total == 0 {
        return 0.0;
    }
    let cores = cores.max(1) as f64;
    let ticks = current_ticks.saturating_sub(previous) as f64;
    (100.0 * ticks * cores / delta_total as f64).clamp(0.0, 100.0 * cores)
}

pub fn memory_percent(used_kb: u64, total_kb: u64) -> f64 {
    if total_kb == 0 {
        return 0.0;
    }
    used_kb as f64 / total_kb as f64 * 100.0
}
