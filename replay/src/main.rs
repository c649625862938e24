//! Replays a scripted sequence of host callbacks through the buff monitor
//! and prints the resulting notifications.

mod script;

use std::path::PathBuf;

use buffwatch_core::config::{load_config, load_user_config, user_config_path};
use buffwatch_core::notify::{LogDispatcher, NotificationQueue};
use buffwatch_core::{BuffEvent, BuffMonitor, BuffWatchConfig, EventDispatcher, Notification};
use clap::Parser;
use tracing_subscriber::filter::EnvFilter;

use crate::script::{Script, Step};

#[derive(Parser)]
#[command(version, about = "Replay buff snapshots and print notifications")]
struct Cli {
    /// Script file (.json or .toml)
    script: PathBuf,

    /// Settings file; defaults to the per-user settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the expiry warning threshold (seconds)
    #[arg(short, long)]
    threshold: Option<u32>,

    /// Print notifications as JSON lines
    #[arg(long)]
    json: bool,
}

/// Logs every event and queues the rendered notification for printing.
#[derive(Default)]
struct ReplayDispatcher {
    log: LogDispatcher,
    queue: NotificationQueue,
}

impl EventDispatcher for ReplayDispatcher {
    fn dispatch(&mut self, event: &BuffEvent) {
        self.log.dispatch(event);
        self.queue.dispatch(event);
    }
}

/// Initialize logging, writing to BUFFWATCH_LOG_PATH if set, otherwise stderr.
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if let Ok(path) = std::env::var("BUFFWATCH_LOG_PATH") {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<BuffWatchConfig, String> {
    let mut config = match &cli.config {
        Some(path) => load_config(path).map_err(|e| e.to_string())?,
        None => {
            tracing::debug!(path = ?user_config_path(), "Using per-user settings");
            load_user_config()
        }
    };
    if let Some(threshold) = cli.threshold {
        config.warning_threshold_seconds = threshold;
    }
    Ok(config.clamped())
}

fn print_notification(notification: &Notification, json: bool) -> Result<(), String> {
    if json {
        let line = serde_json::to_string(notification).map_err(|e| e.to_string())?;
        println!("{line}");
    } else {
        let label = match notification.kind {
            buffwatch_core::NotificationKind::Start => "start",
            buffwatch_core::NotificationKind::Warning => "warn",
            buffwatch_core::NotificationKind::End => "end",
        };
        println!("[{label:>5}] {}", notification.message);
    }
    Ok(())
}

fn main() -> Result<(), String> {
    init_logging();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let script = Script::load(&cli.script).map_err(|e| e.to_string())?;

    tracing::info!(
        steps = script.steps.len(),
        threshold = config.warning_threshold_seconds,
        "Replaying script"
    );

    let mut monitor = BuffMonitor::new(&config, ReplayDispatcher::default());

    for (index, step) in script.steps.iter().enumerate() {
        match step {
            Step::Tick { buffs } => {
                monitor.sample(Some(buffs.as_slice()));
            }
            Step::NoData => {
                monitor.sample(None);
            }
            Step::DayStarted => monitor.on_day_started(),
            Step::SaveLoaded => monitor.on_save_loaded(),
        }

        for notification in monitor.dispatcher_mut().queue.take_notifications() {
            tracing::debug!(step = index, "Printing notification");
            print_notification(&notification, cli.json)?;
        }
    }

    Ok(())
}
