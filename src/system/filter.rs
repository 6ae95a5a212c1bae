use std::cmp::Ordering;

use crate::config::ProcessesConfig;

use super::process::ProcessSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Memory,
    Cpu,
    Pid,
    Name,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Memory => "Memory",
            SortKey::Cpu => "CPU",
            SortKey::Pid => "PID",
            SortKey::Name => "Name",
        }
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "cpu" => SortKey::Cpu,
            "pid" => SortKey::Pid,
            "name" => SortKey::Name,
            _ => SortKey::Memory,
        }
    }
}

/// Visibility and ordering rules for the process table.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    /// Rows kept after sorting; 0 keeps everything.
    pub max_processes: usize,
    pub sort_key: SortKey,
    pub reverse_sort: bool,
    pub show_kernel_threads: bool,
    pub hide_processes: Vec<String>,
    pub show_only_users: Vec<String>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        ViewOptions::from_config(&ProcessesConfig::default())
    }
}

impl ViewOptions {
    pub fn from_config(config: &ProcessesConfig) -> Self {
        ViewOptions {
            max_processes: config.max_processes,
            sort_key: SortKey::from_str_config(&config.sort_by),
            reverse_sort: config.reverse_sort,
            show_kernel_threads: config.show_kernel_threads,
            hide_processes: config.hide_processes.clone(),
            show_only_users: config.show_only_users.clone(),
        }
    }

    pub fn is_visible(&self, process: &ProcessSample) -> bool {
        if process.is_kernel_thread && !self.show_kernel_threads {
            return false;
        }
        if self
            .hide_processes
            .iter()
            .any(|hidden| process.name.contains(hidden.as_str()))
        {
            return false;
        }
        self.show_only_users.is_empty() || self.show_only_users.contains(&process.user)
    }

    /// Base order for the sort key, inverted as a whole when `reverse_sort` is set.
    pub fn compare(&self, a: &ProcessSample, b: &ProcessSample) -> Ordering {
        let ord = match self.sort_key {
            SortKey::Memory => b.memory_kb.cmp(&a.memory_kb),
            SortKey::Cpu => b.cpu_percent.total_cmp(&a.cpu_percent),
            SortKey::Pid => a.pid.cmp(&b.pid),
            SortKey::Name => a.name.cmp(&b.name),
        };
        if self.reverse_sort { ord.reverse() } else { ord }
    }
}

/// Filter, sort, then truncate to `max_processes`.
pub fn apply_view(processes: Vec<ProcessSample>, options: &ViewOptions) -> Vec<ProcessSample> {
    let mut visible: Vec<ProcessSample> = processes
        .into_iter()
        .filter(|p| options.is_visible(p))
        .collect();

    visible.sort_by(|a, b| options.compare(a, b));

    if options.max_processes > 0 {
        visible.truncate(options.max_processes);
    }
    visible
}
