use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::config::{
    Config, DisplayConfig, MAX_UPDATE_INTERVAL_SECS, MIN_UPDATE_INTERVAL_SECS, clamp_interval,
};
use crate::system::collector::Collector;
use crate::system::filter::{SortKey, ViewOptions};
use crate::system::snapshot::SystemSnapshot;
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
}

pub const HELP_ENTRIES: [(&str, &str); 10] = [
    ("q, Q, Esc", "Quit"),
    ("m, M", "Sort by memory"),
    ("c, C", "Sort by CPU"),
    ("p, P", "Sort by PID"),
    ("n, N", "Sort by name"),
    ("r, R", "Reverse sort order"),
    ("t, T", "Toggle network statistics"),
    ("+, =", "Decrease update interval"),
    ("-, _", "Increase update interval"),
    ("h, H, ?", "Show this help"),
];

pub struct App {
    pub running: bool,
    pub collector: Collector,
    pub snapshot: SystemSnapshot,
    pub input_mode: InputMode,
    pub display: DisplayConfig,
    pub theme: Theme,
    update_interval_secs: u64,
}

impl App {
    pub fn new(config: Config) -> Self {
        let collector = Collector::new(
            ViewOptions::from_config(&config.processes),
            config.general.show_network_stats,
        );
        Self::with_collector(collector, &config)
    }

    /// Builds the app around an existing collector and takes the first sample.
    pub fn with_collector(mut collector: Collector, config: &Config) -> Self {
        let snapshot = collector.refresh();
        let theme = Theme::from_show_colors(config.display.show_colors);

        App {
            running: true,
            collector,
            snapshot,
            input_mode: InputMode::Normal,
            display: config.display.clone(),
            theme,
            update_interval_secs: clamp_interval(config.general.update_interval_secs),
        }
    }

    pub fn refresh_data(&mut self) {
        self.snapshot = self.collector.refresh();
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_secs)
    }

    pub fn update_interval_secs(&self) -> u64 {
        self.update_interval_secs
    }

    pub fn sort_key(&self) -> SortKey {
        self.collector.options().sort_key
    }

    pub fn reverse_sort(&self) -> bool {
        self.collector.options().reverse_sort
    }

    pub fn show_network(&self) -> bool {
        self.collector.network_enabled()
    }

    pub fn show_help(&self) -> bool {
        self.input_mode == InputMode::Help
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Help => Action::ToggleHelp,
            InputMode::Normal => Self::map_key_normal(key.code),
        }
    }

    fn map_key_normal(code: KeyCode) -> Action {
        match code {
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Action::Quit,
            KeyCode::Char('m' | 'M') => Action::SortBy(SortKey::Memory),
            KeyCode::Char('c' | 'C') => Action::SortBy(SortKey::Cpu),
            KeyCode::Char('p' | 'P') => Action::SortBy(SortKey::Pid),
            KeyCode::Char('n' | 'N') => Action::SortBy(SortKey::Name),
            KeyCode::Char('r' | 'R') => Action::ToggleReverse,
            KeyCode::Char('t' | 'T') => Action::ToggleNetwork,
            KeyCode::Char('+' | '=') => Action::FasterRefresh,
            KeyCode::Char('-' | '_') => Action::SlowerRefresh,
            KeyCode::Char('h' | 'H' | '?') => Action::ToggleHelp,
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::SortBy(key) => self.reconfigure(|options| options.sort_key = key),
            Action::ToggleReverse => {
                self.reconfigure(|options| options.reverse_sort = !options.reverse_sort)
            }
            Action::ToggleNetwork => {
                let enabled = !self.collector.network_enabled();
                self.collector.set_network_enabled(enabled);
                self.refresh_data();
            }
            Action::FasterRefresh => {
                if self.update_interval_secs > MIN_UPDATE_INTERVAL_SECS {
                    self.update_interval_secs -= 1;
                    self.refresh_data();
                }
            }
            Action::SlowerRefresh => {
                if self.update_interval_secs < MAX_UPDATE_INTERVAL_SECS {
                    self.update_interval_secs += 1;
                    self.refresh_data();
                }
            }
            Action::ToggleHelp => {
                self.input_mode = if self.input_mode == InputMode::Help {
                    InputMode::Normal
                } else {
                    InputMode::Help
                };
            }
            Action::None => {}
        }
    }

    fn reconfigure(&mut self, change: impl FnOnce(&mut ViewOptions)) {
        let mut options = self.collector.options().clone();
        change(&mut options);
        self.collector.update_options(options);
        self.refresh_data();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::procfs::ProcFs;
    use std::collections::HashMap;

    fn make_test_app() -> App {
        let config = Config::default();
        let collector = Collector::with_source(
            ProcFs::new("/nonexistent/mtop/proc"),
            Box::new(HashMap::<u32, String>::new()),
            2,
            4,
            ViewOptions::from_config(&config.processes),
            true,
        );
        App::with_collector(collector, &config)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn default_keys_map_to_actions() {
        let app = make_test_app();
        assert_eq!(app.map_key(press(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(app.map_key(press(KeyCode::Esc)), Action::Quit);
        assert_eq!(
            app.map_key(press(KeyCode::Char('C'))),
            Action::SortBy(SortKey::Cpu)
        );
        assert_eq!(
            app.map_key(press(KeyCode::Char('p'))),
            Action::SortBy(SortKey::Pid)
        );
        assert_eq!(app.map_key(press(KeyCode::Char('r'))), Action::ToggleReverse);
        assert_eq!(app.map_key(press(KeyCode::Char('='))), Action::FasterRefresh);
        assert_eq!(app.map_key(press(KeyCode::Char('_'))), Action::SlowerRefresh);
        assert_eq!(app.map_key(press(KeyCode::Char('?'))), Action::ToggleHelp);
        assert_eq!(app.map_key(press(KeyCode::Char('x'))), Action::None);

        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.map_key(key), Action::Quit);
    }

    #[test]
    fn sort_actions_reconfigure_collector() {
        let mut app = make_test_app();
        assert_eq!(app.sort_key(), SortKey::Memory);
        app.dispatch(Action::SortBy(SortKey::Name));
        assert_eq!(app.sort_key(), SortKey::Name);

        assert!(!app.reverse_sort());
        app.dispatch(Action::ToggleReverse);
        assert!(app.reverse_sort());
    }

    #[test]
    fn interval_stays_within_bounds() {
        let mut app = make_test_app();
        assert_eq!(app.update_interval_secs(), 2);
        for _ in 0..5 {
            app.dispatch(Action::FasterRefresh);
        }
        assert_eq!(app.update_interval_secs(), MIN_UPDATE_INTERVAL_SECS);
        for _ in 0..20 {
            app.dispatch(Action::SlowerRefresh);
        }
        assert_eq!(app.update_interval_secs(), MAX_UPDATE_INTERVAL_SECS);
        assert_eq!(app.update_interval(), Duration::from_secs(10));
    }

    #[test]
    fn network_toggle() {
        let mut app = make_test_app();
        assert!(app.show_network());
        app.dispatch(Action::ToggleNetwork);
        assert!(!app.show_network());
    }

    #[test]
    fn help_mode_swallows_keys() {
        let mut app = make_test_app();
        app.dispatch(Action::ToggleHelp);
        assert!(app.show_help());

        // Any key dismisses, including ones that normally do something else
        assert_eq!(app.map_key(press(KeyCode::Char('q'))), Action::ToggleHelp);
        assert_eq!(app.map_key(press(KeyCode::Char('m'))), Action::ToggleHelp);

        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.map_key(key), Action::Quit);

        app.dispatch(Action::ToggleHelp);
        assert!(!app.show_help());
    }

    #[test]
    fn unreadable_proc_gives_empty_snapshot() {
        let app = make_test_app();
        assert_eq!(app.snapshot, SystemSnapshot::default());
    }
}
