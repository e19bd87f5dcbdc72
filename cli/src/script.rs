//! Event script parsing.
//!
//! One command per line. `#` starts a comment; blank lines are skipped.
//!
//! ```text
//! arm home | arm away | disarm
//! sensor <name...> on|off
//! add <door|window|motion> <name...>
//! remove <name...>
//! image cat | image clear
//! status
//! ```

use anyhow::{Context, Result, anyhow, bail};

use catwatch_types::{ArmingStatus, SensorName, SensorType};

/// Payload handed to the classifier. Stands in for a camera frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLabel {
    Cat,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Arm(ArmingStatus),
    Sensor { name: SensorName, active: bool },
    Add { sensor_type: SensorType, name: SensorName },
    Remove(SensorName),
    Image(ImageLabel),
    Status,
}

/// `Ok(None)` for blank and comment-only lines.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.split_once('#').map_or(line, |(code, _)| code).trim();
    if line.is_empty() {
        return Ok(None);
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    let command = match words.as_slice() {
        ["disarm"] => Command::Arm(ArmingStatus::Disarmed),
        ["arm", "home"] => Command::Arm(ArmingStatus::ArmedHome),
        ["arm", "away"] => Command::Arm(ArmingStatus::ArmedAway),
        ["arm", other] => bail!("unknown arming mode '{other}' (expected home or away)"),
        ["sensor", name @ .., state] if !name.is_empty() => {
            let active = match *state {
                "on" => true,
                "off" => false,
                other => bail!("unknown sensor state '{other}' (expected on or off)"),
            };
            Command::Sensor {
                name: sensor_name(name)?,
                active,
            }
        }
        ["add", kind, name @ ..] if !name.is_empty() => Command::Add {
            sensor_type: kind.parse()?,
            name: sensor_name(name)?,
        },
        ["remove", name @ ..] if !name.is_empty() => Command::Remove(sensor_name(name)?),
        ["image", "cat"] => Command::Image(ImageLabel::Cat),
        ["image", "clear"] => Command::Image(ImageLabel::Clear),
        ["image", other] => bail!("unknown image label '{other}' (expected cat or clear)"),
        ["status"] => Command::Status,
        _ => return Err(anyhow!("unrecognized command '{line}'")),
    };
    Ok(Some(command))
}

fn sensor_name(words: &[&str]) -> Result<SensorName> {
    SensorName::new(words.join(" ")).context("invalid sensor name")
}
