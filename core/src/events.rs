//! Outbound status events.
//!
//! The evaluator publishes these to every registered
//! [`StatusListener`](crate::ports::StatusListener) after the corresponding
//! store write has succeeded.

use catwatch_types::{AlarmStatus, ArmingStatus, SensorName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    /// A persisted alarm write changed the alarm status.
    AlarmStatusChanged { from: AlarmStatus, to: AlarmStatus },

    /// The arming status was written (even if unchanged).
    ArmingStatusChanged(ArmingStatus),

    /// Result of the most recent image classification.
    CatDetected(bool),

    /// A sensor's active flag was changed and persisted.
    SensorStatusChanged { name: SensorName, active: bool },
}
