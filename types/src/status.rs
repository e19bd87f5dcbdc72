//! Arming modes and the alarm ladder.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::parse::{EnumKind, EnumParseError};

/// Operator-selected posture of the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmingStatus {
    #[default]
    Disarmed,
    ArmedHome,
    ArmedAway,
}

const ARMING_STATUS_VALUES: &[&str] = &["disarmed", "armed_home", "armed_away"];

impl ArmingStatus {
    pub const ALL: [ArmingStatus; 3] = [
        ArmingStatus::Disarmed,
        ArmingStatus::ArmedHome,
        ArmingStatus::ArmedAway,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ArmingStatus::Disarmed => "disarmed",
            ArmingStatus::ArmedHome => "armed_home",
            ArmingStatus::ArmedAway => "armed_away",
        }
    }

    /// True for both armed modes.
    #[must_use]
    pub const fn is_armed(self) -> bool {
        matches!(self, ArmingStatus::ArmedHome | ArmingStatus::ArmedAway)
    }
}

impl fmt::Display for ArmingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArmingStatus::Disarmed => "DISARMED",
            ArmingStatus::ArmedHome => "ARMED_HOME",
            ArmingStatus::ArmedAway => "ARMED_AWAY",
        })
    }
}

impl FromStr for ArmingStatus {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disarmed" => Ok(ArmingStatus::Disarmed),
            "armed_home" => Ok(ArmingStatus::ArmedHome),
            "armed_away" => Ok(ArmingStatus::ArmedAway),
            _ => Err(EnumParseError::new(
                EnumKind::ArmingStatus,
                s,
                ARMING_STATUS_VALUES,
            )),
        }
    }
}

/// Escalation ladder: `NoAlarm < PendingAlarm < Alarm`.
///
/// The derived ordering follows declaration order and is what the
/// transition rules compare against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AlarmStatus {
    #[default]
    NoAlarm,
    PendingAlarm,
    Alarm,
}

const ALARM_STATUS_VALUES: &[&str] = &["no_alarm", "pending_alarm", "alarm"];

impl AlarmStatus {
    pub const ALL: [AlarmStatus; 3] = [
        AlarmStatus::NoAlarm,
        AlarmStatus::PendingAlarm,
        AlarmStatus::Alarm,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AlarmStatus::NoAlarm => "no_alarm",
            AlarmStatus::PendingAlarm => "pending_alarm",
            AlarmStatus::Alarm => "alarm",
        }
    }

    /// One rung up the ladder. `Alarm` saturates.
    #[must_use]
    pub const fn escalate(self) -> Self {
        match self {
            AlarmStatus::NoAlarm => AlarmStatus::PendingAlarm,
            AlarmStatus::PendingAlarm | AlarmStatus::Alarm => AlarmStatus::Alarm,
        }
    }
}

impl fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AlarmStatus::NoAlarm => "NO_ALARM",
            AlarmStatus::PendingAlarm => "PENDING_ALARM",
            AlarmStatus::Alarm => "ALARM",
        })
    }
}

impl FromStr for AlarmStatus {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "no_alarm" => Ok(AlarmStatus::NoAlarm),
            "pending_alarm" => Ok(AlarmStatus::PendingAlarm),
            "alarm" => Ok(AlarmStatus::Alarm),
            _ => Err(EnumParseError::new(
                EnumKind::AlarmStatus,
                s,
                ALARM_STATUS_VALUES,
            )),
        }
    }
}
