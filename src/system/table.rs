use super::metrics;
use super::process::{ProcessSample, is_kernel_thread};
use super::procfs::{ProcFs, ReadResult};
use super::store::{SnapshotStore, TickSample};
use super::users::{UserLookup, resolve_user};

/// Per-cycle inputs shared by every process row.
#[derive(Debug, Clone, Copy)]
pub struct CycleContext {
    /// System-wide tick delta since the previous cycle, if there is one.
    pub delta_total: Option<u64>,
    pub cores: usize,
    pub page_kib: u64,
}

/// Reads every live process, derives its CPU share against `store`, then
/// replaces `store` with this cycle's ticks.
///
/// Processes that vanish or carry a malformed record are skipped.
pub fn build_process_table(
    source: &ProcFs,
    users: &mut dyn UserLookup,
    store: &mut SnapshotStore,
    ctx: &CycleContext,
) -> Vec<ProcessSample> {
    let pids = match source.pids() {
        Ok(pids) => pids,
        Err(err) => {
            tracing::debug!(error = %err, "process list unavailable");
            Vec::new()
        }
    };

    let mut processes = Vec::with_capacity(pids.len());
    for pid in pids {
        match read_process(source, users, pid, ctx.page_kib) {
            Ok(mut process) => {
                let previous = store.previous_ticks(pid, process.start_time);
                process.cpu_percent = metrics::process_cpu_percent(
                    previous,
                    process.total_ticks(),
                    ctx.delta_total,
                    ctx.cores,
                );
                processes.push(process);
            }
            Err(err) if err.is_vanished() => {
                tracing::trace!(pid, "process exited before it could be read");
            }
            Err(err) => {
                tracing::debug!(pid, error = %err, "skipping process");
            }
        }
    }

    store.replace(processes.iter().map(|p| {
        (
            p.pid,
            TickSample {
                ticks: p.total_ticks(),
                start_time: p.start_time,
            },
        )
    }));

    processes
}

fn read_process(
    source: &ProcFs,
    users: &mut dyn UserLookup,
    pid: u32,
    page_kib: u64,
) -> ReadResult<ProcessSample> {
    let stat = source.process_stat(pid)?;
    let uid = match source.process_uid(pid) {
        Ok(uid) => uid,
        Err(err) if err.is_vanished() => return Err(err),
        Err(err) => {
            tracing::debug!(pid, error = %err, "owner unknown, assuming uid 0");
            0
        }
    };
    let is_kernel_thread = is_kernel_thread(stat.ppid, &stat.name);

    Ok(ProcessSample {
        pid,
        ppid: stat.ppid,
        user: resolve_user(users, uid),
        name: stat.name,
        state: stat.state,
        utime: stat.utime,
        stime: stat.stime,
        start_time: stat.start_time,
        memory_kb: stat.rss_pages.saturating_mul(page_kib),
        uid,
        cpu_percent: 0.0,
        is_kernel_thread,
    })
}
