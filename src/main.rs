use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::KeyEventKind;
use mtop::app::App;
use mtop::config::{self, Config, clamp_interval, load_config, load_config_from_path};
use mtop::event::{Event, EventHandler};
use mtop::logging;
use mtop::system::collector::Collector;
use mtop::system::filter::ViewOptions;
use mtop::ui;

#[derive(Parser)]
#[command(name = "mtop", about = "Terminal resource monitor")]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Update interval in seconds (1-10)
    #[arg(long)]
    interval: Option<u64>,

    /// Maximum number of process rows (0 = unlimited)
    #[arg(long)]
    max_processes: Option<usize>,

    /// Sort key: memory, cpu, pid, name
    #[arg(long)]
    sort: Option<String>,

    /// Reverse the sort order
    #[arg(long, default_value_t = false)]
    reverse: bool,

    /// Include kernel threads in the process table
    #[arg(long, default_value_t = false)]
    show_kernel_threads: bool,

    /// Hide processes whose name contains this text (repeatable)
    #[arg(long = "hide", value_name = "SUBSTR")]
    hide: Vec<String>,

    /// Only show processes owned by this user (repeatable)
    #[arg(long = "user", value_name = "NAME")]
    users: Vec<String>,

    /// Do not read or show network interface counters
    #[arg(long, default_value_t = false)]
    no_network: bool,

    /// Disable colors
    #[arg(long, default_value_t = false)]
    no_color: bool,

    /// Write diagnostics as JSON lines to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level for --log-file: trace, debug, info, warn, error
    #[arg(long, default_value = "debug")]
    log_level: String,

    /// Take two samples one interval apart, print the second as JSON and exit.
    #[arg(long, default_value_t = false)]
    once: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        logging::init_file_logging(path, logging::parse_level(&cli.log_level)?)?;
    }
    let config = load_config_for_cli(&cli);

    if cli.once {
        return run_once(config).await;
    }

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, config).await;

    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: Config) -> Result<()> {
    let mut app = App::new(config);
    let mut events = EventHandler::new(app.update_interval());

    terminal.draw(|frame| ui::draw(frame, &app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        match event {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let action = app.map_key(key);
                app.dispatch(action);
                events.set_tick_rate(app.update_interval());
            }
            Event::Tick => app.refresh_data(),
            Event::Resize => {}
        }
        if app.running {
            terminal.draw(|frame| ui::draw(frame, &app))?;
        }
    }

    Ok(())
}

async fn run_once(config: Config) -> Result<()> {
    let mut collector = Collector::new(
        ViewOptions::from_config(&config.processes),
        config.general.show_network_stats,
    );
    collector.refresh();
    tokio::time::sleep(Duration::from_secs(config.general.update_interval_secs)).await;
    let snapshot = collector.refresh();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(secs) = cli.interval {
        config.general.update_interval_secs = clamp_interval(secs);
    }
    if let Some(max) = cli.max_processes {
        config.processes.max_processes = max;
    }
    if let Some(ref sort) = cli.sort {
        config.processes.sort_by = sort.clone();
    }
    if cli.reverse {
        config.processes.reverse_sort = true;
    }
    if cli.show_kernel_threads {
        config.processes.show_kernel_threads = true;
    }
    config.processes.hide_processes.extend(cli.hide.iter().cloned());
    config.processes.show_only_users.extend(cli.users.iter().cloned());
    if cli.no_network {
        config.general.show_network_stats = false;
    }
    if cli.no_color {
        config.display.show_colors = false;
    }

    tracing::debug!(path = ?config::config_path(), "configuration loaded");
    config
}
