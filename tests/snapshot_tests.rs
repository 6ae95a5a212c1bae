use insta::{assert_debug_snapshot, assert_snapshot};
use mtop::system::filter::{SortKey, ViewOptions, apply_view};
use mtop::system::process::{ProcessSample, ProcessState, is_kernel_thread};

fn mock_process(pid: u32, ppid: u32, name: &str, user: &str, memory_kb: u64, cpu: f64) -> ProcessSample {
    ProcessSample {
        pid,
        ppid,
        name: name.to_string(),
        state: ProcessState::Sleeping,
        utime: 0,
        stime: 0,
        start_time: 0,
        memory_kb,
        uid: 1000,
        user: user.to_string(),
        cpu_percent: cpu,
        is_kernel_thread: is_kernel_thread(ppid, name),
    }
}

fn fleet() -> Vec<ProcessSample> {
    vec![
        mock_process(1, 0, "systemd", "root", 12_000, 0.1),
        mock_process(2, 0, "kthreadd", "root", 0, 0.0),
        mock_process(14, 2, "kworker/0:1", "root", 0, 0.4),
        mock_process(310, 1, "chrome", "alice", 900_000, 35.0),
        mock_process(311, 310, "chrome_crashpad", "alice", 20_000, 0.0),
        mock_process(400, 1, "Chrome", "bob", 450_000, 12.5),
        mock_process(512, 1, "sshd", "root", 8_000, 0.0),
        mock_process(777, 1, "[bracketed]", "root", 0, 0.0),
        mock_process(900, 1, "postgres", "postgres", 450_000, 3.0),
    ]
}

fn rows(processes: &[ProcessSample]) -> String {
    processes
        .iter()
        .map(|p| format!("{}:{}", p.pid, p.name))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn default_view_orders_by_memory() {
    let view = apply_view(fleet(), &ViewOptions::default());
    assert_snapshot!(rows(&view), @"310:chrome 400:Chrome 900:postgres 311:chrome_crashpad 1:systemd 512:sshd 2:kthreadd");
}

#[test]
fn hidden_names_and_user_filter_compose() {
    let options = ViewOptions {
        sort_key: SortKey::Cpu,
        hide_processes: vec!["chrome".to_string()],
        show_only_users: vec!["alice".to_string(), "bob".to_string()],
        ..ViewOptions::default()
    };
    let view = apply_view(fleet(), &options);
    assert_snapshot!(rows(&view), @"400:Chrome");
}

#[test]
fn reversed_name_order_with_kernel_threads() {
    let options = ViewOptions {
        sort_key: SortKey::Name,
        reverse_sort: true,
        show_kernel_threads: true,
        max_processes: 4,
        ..ViewOptions::default()
    };
    let view = apply_view(fleet(), &options);
    assert_snapshot!(rows(&view), @"1:systemd 512:sshd 900:postgres 14:kworker/0:1");
}

#[test]
fn kernel_thread_flags() {
    let flags: Vec<(u32, bool)> = fleet()
        .iter()
        .map(|p| (p.pid, p.is_kernel_thread))
        .collect();
    assert_debug_snapshot!(flags, @r"
    [
        (
            1,
            false,
        ),
        (
            2,
            false,
        ),
        (
            14,
            true,
        ),
        (
            310,
            false,
        ),
        (
            311,
            false,
        ),
        (
            400,
            false,
        ),
        (
            512,
            false,
        ),
        (
            777,
            true,
        ),
        (
            900,
            false,
        ),
    ]
    ");
}
