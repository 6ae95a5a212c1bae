use super::filter::{ViewOptions, apply_view};
use super::metrics;
use super::platform;
use super::procfs::{CpuTotals, ProcFs};
use super::snapshot::SystemSnapshot;
use super::store::SnapshotStore;
use super::table::{CycleContext, build_process_table};
use super::users::{SystemUsers, UserLookup};

/// Runs sampling cycles and owns the state carried between them.
///
/// `refresh` takes `&mut self`, so a cycle cannot start while another one is
/// still in flight, and each call publishes a fresh [`SystemSnapshot`].
pub struct Collector {
    source: ProcFs,
    users: Box<dyn UserLookup>,
    store: SnapshotStore,
    previous_cpu: Option<CpuTotals>,
    cores: usize,
    page_kib: u64,
    options: ViewOptions,
    network_enabled: bool,
}

impl Collector {
    pub fn new(options: ViewOptions, network_enabled: bool) -> Self {
        Self::with_source(
            ProcFs::default(),
            Box::new(SystemUsers::new()),
            platform::online_cpus(),
            platform::page_size_kib(),
            options,
            network_enabled,
        )
    }

    /// Collector over an arbitrary proc tree with fixed machine parameters.
    pub fn with_source(
        source: ProcFs,
        users: Box<dyn UserLookup>,
        cores: usize,
        page_kib: u64,
        options: ViewOptions,
        network_enabled: bool,
    ) -> Self {
        Collector {
            source,
            users,
            store: SnapshotStore::new(),
            previous_cpu: None,
            cores: cores.max(1),
            page_kib,
            options,
            network_enabled,
        }
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    /// Takes effect from the next cycle.
    pub fn update_options(&mut self, options: ViewOptions) {
        self.options = options;
    }

    pub fn network_enabled(&self) -> bool {
        self.network_enabled
    }

    pub fn set_network_enabled(&mut self, enabled: bool) {
        self.network_enabled = enabled;
    }

    /// One full sampling cycle. Unreadable sources come back as zeros or empty lists.
    pub fn refresh(&mut self) -> SystemSnapshot {
        let _refresh_span = tracing::debug_span!("collector.refresh").entered();

        let current_cpu = match self.source.cpu_totals() {
            Ok(totals) => Some(totals),
            Err(err) => {
                tracing::debug!(error = %err, "cpu totals unavailable");
                None
            }
        };
        let delta = current_cpu.and_then(|current| metrics::cpu_delta(self.previous_cpu, current));
        // Process ticks are rebaselined every cycle, so a missed sample drops this baseline too.
        self.previous_cpu = current_cpu;
        let cpu_percent = metrics::system_cpu_percent(delta);

        let memory = self.source.memory().unwrap_or_else(|err| {
            tracing::debug!(error = %err, "memory totals unavailable");
            Default::default()
        });

        let load_average = self.source.load_average().unwrap_or_else(|err| {
            tracing::debug!(error = %err, "load average unavailable");
            [0.0; 3]
        });

        let network_interfaces = if self.network_enabled {
            self.source.network().unwrap_or_else(|err| {
                tracing::debug!(error = %err, "network counters unavailable");
                Vec::new()
            })
        } else {
            Vec::new()
        };

        let ctx = CycleContext {
            delta_total: delta.map(|d| d.total),
            cores: self.cores,
            page_kib: self.page_kib,
        };
        let processes = build_process_table(
            &self.source,
            self.users.as_mut(),
            &mut self.store,
            &ctx,
        );
        let process_count = processes.len();
        let processes = apply_view(processes, &self.options);

        tracing::debug!(
            cpu_percent,
            process_count,
            shown = processes.len(),
            interfaces = network_interfaces.len(),
            "cycle complete"
        );

        SystemSnapshot {
            cpu_percent,
            memory_total_kb: memory.total_kb,
            memory_used_kb: memory.used_kb,
            memory_free_kb: memory.free_kb,
            load_average,
            process_count,
            processes,
            network_interfaces,
        }
    }
}
