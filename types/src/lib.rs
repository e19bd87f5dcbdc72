//! Core domain types for Catwatch.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application: the alarm
//! evaluator, the configuration loader, and the host shell.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod parse;
mod sensor;
mod status;

pub use parse::{EnumKind, EnumParseError};
pub use sensor::{EmptySensorNameError, Sensor, SensorName, SensorType};
pub use status::{AlarmStatus, ArmingStatus};
