//! Sensors tracked by the security store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parse::{EnumKind, EnumParseError};

/// Sensor identifier, unique within a store and non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SensorName(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sensor name must not be empty")]
pub struct EmptySensorNameError;

impl SensorName {
    /// Surrounding whitespace is dropped so `" door "` and `"door"` name the same sensor.
    pub fn new(value: impl Into<String>) -> Result<Self, EmptySensorNameError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Err(EmptySensorNameError)
        } else if trimmed.len() == value.len() {
            Ok(Self(value))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for SensorName {
    type Error = EmptySensorNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for SensorName {
    type Error = EmptySensorNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SensorName> for String {
    fn from(value: SensorName) -> Self {
        value.0
    }
}

impl AsRef<str> for SensorName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SensorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorType {
    Door,
    Window,
    Motion,
}

const SENSOR_TYPE_VALUES: &[&str] = &["door", "window", "motion"];

impl SensorType {
    pub const ALL: [SensorType; 3] = [SensorType::Door, SensorType::Window, SensorType::Motion];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SensorType::Door => "door",
            SensorType::Window => "window",
            SensorType::Motion => "motion",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SensorType::Door => "DOOR",
            SensorType::Window => "WINDOW",
            SensorType::Motion => "MOTION",
        })
    }
}

impl FromStr for SensorType {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "door" => Ok(SensorType::Door),
            "window" => Ok(SensorType::Window),
            "motion" => Ok(SensorType::Motion),
            _ => Err(EnumParseError::new(
                EnumKind::SensorType,
                s,
                SENSOR_TYPE_VALUES,
            )),
        }
    }
}

/// A named, typed presence/contact detector.
///
/// New sensors start inactive. The active flag is only changed through the
/// alarm evaluator; the store persists whatever it is handed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sensor {
    name: SensorName,
    #[serde(rename = "type")]
    sensor_type: SensorType,
    #[serde(default)]
    active: bool,
}

impl Sensor {
    #[must_use]
    pub fn new(name: SensorName, sensor_type: SensorType) -> Self {
        Self {
            name,
            sensor_type,
            active: false,
        }
    }

    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    #[must_use]
    pub fn name(&self) -> &SensorName {
        &self.name
    }

    #[must_use]
    pub const fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}
