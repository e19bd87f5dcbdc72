//! Catwatch CLI - replays security events through the alarm evaluator.
//!
//! # Architecture
//!
//! ```text
//! main() -> load config -> init_tracing() -> MemoryStore + LabelClassifier
//!                                                  |
//!                                                  v
//!                                 AlarmEvaluator -> Session::run(script)
//! ```
//!
//! Sensors and the initial arming mode come from the config file. The
//! script is read from a file or stdin; see [`script`] for its grammar.

mod classifier;
mod script;
mod session;

use std::{
    fs::{self, OpenOptions},
    io::{self, Read},
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use catwatch_config::CatwatchConfig;
use catwatch_core::{AlarmEvaluator, MemoryStore, StatusEvent};

use crate::classifier::LabelClassifier;
use crate::session::{OutputFormat, Session};

#[derive(Parser)]
#[command(name = "catwatch")]
#[command(about = "Replay home security events through the alarm evaluator")]
struct Cli {
    /// Config file (defaults to ~/.catwatch/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print one JSON object per command
    #[arg(long)]
    json: bool,
    /// Event script; read from stdin when omitted
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?.unwrap_or_default();
    init_tracing(&config);
    if let Some(path) = cli.config.clone().or_else(CatwatchConfig::path) {
        tracing::debug!(path = %path.display(), "Config location");
    }

    let sensors = config.build_sensors()?;
    tracing::info!(sensors = sensors.len(), "Starting evaluator");
    let mut evaluator = AlarmEvaluator::new(MemoryStore::with_sensors(sensors), LabelClassifier);
    evaluator.add_status_listener(log_status_event);
    evaluator
        .set_arming_status(config.initial_arming())
        .context("failed to apply initial arming status")?;

    let script = read_script(cli.script.as_deref())?;
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let mut session = Session::new(evaluator, io::stdout().lock(), format);
    session.run(&script)
}

fn load_config(explicit: Option<&Path>) -> Result<Option<CatwatchConfig>> {
    match explicit {
        Some(path) => Ok(Some(CatwatchConfig::load_from(path)?)),
        None => Ok(CatwatchConfig::load()?),
    }
}

fn read_script(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display())),
        None => {
            let mut script = String::new();
            io::stdin()
                .read_to_string(&mut script)
                .context("failed to read script from stdin")?;
            Ok(script)
        }
    }
}

fn log_status_event(event: &StatusEvent) {
    match event {
        StatusEvent::AlarmStatusChanged { from, to } => {
            tracing::warn!(%from, %to, "Alarm status changed");
        }
        StatusEvent::ArmingStatusChanged(status) => {
            tracing::info!(arming = %status, "Arming status changed");
        }
        StatusEvent::CatDetected(cat) => tracing::info!(cat, "Camera frame classified"),
        StatusEvent::SensorStatusChanged { name, active } => {
            tracing::info!(sensor = %name, active, "Sensor status changed");
        }
    }
}

fn init_tracing(config: &CatwatchConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_filter().unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(log_path) = config.log_file() else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr))
            .with(env_filter)
            .init();
        return;
    };

    match open_log_file(&log_path) {
        Ok(file) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .init();
            tracing::info!(path = %log_path.display(), "Logging initialized");
        }
        Err(e) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr))
                .with(env_filter)
                .init();
            tracing::warn!(
                "Failed to open log file {}: {e}; logging to stderr",
                log_path.display()
            );
        }
    }
}

fn open_log_file(path: &Path) -> io::Result<fs::File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
