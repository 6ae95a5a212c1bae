use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const MIN_UPDATE_INTERVAL_SECS: u64 = 1;
pub const MAX_UPDATE_INTERVAL_SECS: u64 = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub processes: ProcessesConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub update_interval_secs: u64,
    pub show_network_stats: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            update_interval_secs: 2,
            show_network_stats: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProcessesConfig {
    pub max_processes: usize,
    pub sort_by: String,
    pub reverse_sort: bool,
    pub show_kernel_threads: bool,
    pub hide_processes: Vec<String>,
    pub show_only_users: Vec<String>,
}

impl Default for ProcessesConfig {
    fn default() -> Self {
        ProcessesConfig {
            max_processes: 50,
            sort_by: "memory".to_string(),
            reverse_sort: false,
            show_kernel_threads: false,
            hide_processes: Vec::new(),
            show_only_users: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_colors: bool,
    pub show_cpu_bar: bool,
    pub show_memory_bar: bool,
    pub show_load_avg: bool,
    pub show_process_state: bool,
    pub show_process_user: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            show_colors: true,
            show_cpu_bar: true,
            show_memory_bar: true,
            show_load_avg: true,
            show_process_state: true,
            show_process_user: true,
        }
    }
}

pub fn clamp_interval(secs: u64) -> u64 {
    secs.clamp(MIN_UPDATE_INTERVAL_SECS, MAX_UPDATE_INTERVAL_SECS)
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("mtop").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "no config file, using defaults");
            return Config::default();
        }
    };
    let mut config: Config = match toml::from_str(&contents) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid config, using defaults");
            return Config::default();
        }
    };
    config.general.update_interval_secs = clamp_interval(config.general.update_interval_secs);
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.general.update_interval_secs, 2);
        assert!(config.general.show_network_stats);
        assert_eq!(config.processes.max_processes, 50);
        assert_eq!(config.processes.sort_by, "memory");
        assert!(!config.processes.show_kernel_threads);
        assert!(config.display.show_colors);
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[general]
update_interval_secs = 5
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.update_interval_secs, 5);
        // Other fields should be defaults
        assert!(config.general.show_network_stats);
        assert_eq!(config.processes.max_processes, 50);
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[general]
update_interval_secs = 1
show_network_stats = false

[processes]
max_processes = 20
sort_by = "cpu"
reverse_sort = true
show_kernel_threads = true
hide_processes = ["chrome", "electron"]
show_only_users = ["root"]

[display]
show_colors = false
show_process_user = false
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.update_interval_secs, 1);
        assert!(!config.general.show_network_stats);
        assert_eq!(config.processes.max_processes, 20);
        assert_eq!(config.processes.sort_by, "cpu");
        assert!(config.processes.reverse_sort);
        assert!(config.processes.show_kernel_threads);
        assert_eq!(config.processes.hide_processes, vec!["chrome", "electron"]);
        assert_eq!(config.processes.show_only_users, vec!["root"]);
        assert!(!config.display.show_colors);
        assert!(!config.display.show_process_user);
        assert!(config.display.show_cpu_bar);
    }

    #[test]
    fn missing_file_returns_default() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config.general.update_interval_secs, 2);
    }

    #[test]
    fn invalid_toml_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is not valid toml {{{{").unwrap();
        let config = load_config_from_path(&path);
        assert_eq!(config.general.update_interval_secs, 2);
    }

    #[test]
    fn out_of_range_interval_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general]\nupdate_interval_secs = 60\n").unwrap();
        assert_eq!(load_config_from_path(&path).general.update_interval_secs, 10);

        std::fs::write(&path, "[general]\nupdate_interval_secs = 0\n").unwrap();
        assert_eq!(load_config_from_path(&path).general.update_interval_secs, 1);
    }
}
