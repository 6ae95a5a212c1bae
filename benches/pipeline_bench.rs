use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mtop::config::DisplayConfig;
use mtop::system::filter::{SortKey, ViewOptions, apply_view};
use mtop::system::process::{ProcessSample, ProcessState};
use mtop::system::procfs::{parse_net_dev, parse_pid_stat};
use mtop::ui::process_table;
use mtop::ui::theme::Theme;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use std::hint::black_box;

fn make_processes(n: usize) -> Vec<ProcessSample> {
    (0..n)
        .map(|i| {
            let pid = i as u32 + 1;
            ProcessSample {
                pid,
                ppid: if i == 0 { 0 } else { (i as u32 / 2) + 1 },
                name: format!("proc_{i}"),
                state: ProcessState::Running,
                utime: i as u64 * 3,
                stime: i as u64,
                start_time: 100 + i as u64,
                memory_kb: ((i * 7919) % n) as u64 * 64,
                uid: (i % 8) as u32,
                user: format!("u{}", i % 8),
                cpu_percent: (i % 100) as f64 * 0.75,
                is_kernel_thread: i % 10 == 0,
            }
        })
        .collect()
}

fn bench_apply_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_view_500_1000_2000");

    for size in [500usize, 1000, 2000] {
        let processes = make_processes(size);
        for key in [SortKey::Memory, SortKey::Cpu, SortKey::Name] {
            let options = ViewOptions {
                sort_key: key,
                hide_processes: vec!["proc_99".to_string()],
                ..ViewOptions::default()
            };
            group.bench_with_input(
                BenchmarkId::new(key.label(), size),
                &processes,
                |b, processes| {
                    b.iter(|| {
                        let view = apply_view(black_box(processes.clone()), black_box(&options));
                        black_box(view);
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_proc_parsers(c: &mut Criterion) {
    let stat = "4242 (Web Content (sandboxed)) S 1200 4242 1200 0 -1 4194560 90123 0 12 0 5321 877 0 0 20 0 31 0 981234 3123456000 45123 18446744073709551615 1 1 0 0 0 0 0 16781312 1082195192 0 0 0 17 3 0 0 0 0 0";
    c.bench_function("parse_pid_stat", |b| {
        b.iter(|| black_box(parse_pid_stat(black_box(stat))))
    });

    let mut net = String::from("Inter-|   Receive |  Transmit\n face |bytes packets|bytes packets\n");
    for i in 0..32 {
        net.push_str(&format!(
            "  veth{i}: {} {} 0 0 0 0 0 0 {} {} 0 0 0 0 0 0\n",
            i * 1000,
            i * 10,
            i * 2000,
            i * 20
        ));
    }
    c.bench_function("parse_net_dev_32_interfaces", |b| {
        b.iter(|| black_box(parse_net_dev(black_box(&net))))
    });
}

fn bench_process_table_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_table_render_500_1000_2000");
    let display = DisplayConfig::default();
    let theme = Theme::dark();

    for size in [500usize, 1000, 2000] {
        let rows = apply_view(
            make_processes(size),
            &ViewOptions {
                max_processes: 0,
                ..ViewOptions::default()
            },
        );

        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| {
                let backend = TestBackend::new(160, 50);
                let mut terminal = Terminal::new(backend).expect("bench terminal init failed");
                terminal
                    .draw(|frame| {
                        process_table::render(
                            frame,
                            Rect::new(0, 0, 160, 50),
                            black_box(rows),
                            &display,
                            &theme,
                        );
                    })
                    .expect("bench draw failed");
                black_box(terminal.backend());
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_apply_view,
    bench_proc_parsers,
    bench_process_table_render
);
criterion_main!(benches);
