//! Configuration loading for Catwatch.
//!
//! The config file lives at `~/.catwatch/config.toml` unless the host passes
//! an explicit path. Every section is optional.
//!
//! ```toml
//! [logging]
//! filter = "catwatch=debug"
//! file = "${HOME}/.catwatch/logs/catwatch.log"
//!
//! [arming]
//! initial = "armed_away"
//!
//! [[sensors]]
//! name = "front door"
//! type = "door"
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;
use thiserror::Error;

use catwatch_types::{ArmingStatus, Sensor, SensorName, SensorType};

#[derive(Debug, Default, Deserialize)]
pub struct CatwatchConfig {
    pub logging: Option<LoggingConfig>,
    pub arming: Option<ArmingConfig>,
    /// Sensors registered with the store at startup.
    #[serde(default)]
    pub sensors: Vec<SensorConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config at {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("sensor '{0}' is configured more than once")]
    DuplicateSensor(SensorName),
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive. `RUST_LOG` takes precedence.
    pub filter: Option<String>,
    /// Append logs here instead of stderr. `${VAR}` references are expanded.
    pub file: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ArmingConfig {
    #[serde(default)]
    pub initial: ArmingStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SensorConfig {
    pub name: SensorName,
    #[serde(rename = "type")]
    pub sensor_type: SensorType,
}

/// Replace `${VAR}` with the value of `VAR`; unset variables become empty.
/// An unclosed `${` is kept verbatim.
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let var = &after[..end];
                if !var.is_empty() {
                    out.push_str(&env::var(var).unwrap_or_default());
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

impl CatwatchConfig {
    /// Load from the default location. `Ok(None)` when there is no file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "Loaded config");
                Ok(config)
            }
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn initial_arming(&self) -> ArmingStatus {
        self.arming
            .as_ref()
            .map(|arming| arming.initial)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn log_filter(&self) -> Option<&str> {
        self.logging.as_ref()?.filter.as_deref()
    }

    #[must_use]
    pub fn log_file(&self) -> Option<PathBuf> {
        let raw = self.logging.as_ref()?.file.as_deref()?;
        let expanded = expand_env_vars(raw);
        if expanded.trim().is_empty() {
            None
        } else {
            Some(PathBuf::from(expanded))
        }
    }

    /// Configured sensors as idle domain sensors, in file order.
    pub fn build_sensors(&self) -> Result<Vec<Sensor>, ConfigError> {
        let mut seen = HashSet::new();
        self.sensors
            .iter()
            .map(|entry| {
                if !seen.insert(entry.name.clone()) {
                    return Err(ConfigError::DuplicateSensor(entry.name.clone()));
                }
                Ok(Sensor::new(entry.name.clone(), entry.sensor_type))
            })
            .collect()
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".catwatch").join("config.toml"))
}
