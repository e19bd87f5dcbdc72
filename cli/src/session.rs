//! Replays a parsed script against one evaluator and reports after each step.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use catwatch_core::{AlarmEvaluator, EvaluatorError, MemoryStore};
use catwatch_types::{AlarmStatus, ArmingStatus, Sensor};

use crate::classifier::LabelClassifier;
use crate::script::{Command, parse_line};

pub type ScriptEvaluator = AlarmEvaluator<MemoryStore, LabelClassifier>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    line: usize,
    command: &'a str,
    arming: ArmingStatus,
    alarm: AlarmStatus,
    cat_detected: bool,
    active_sensors: Vec<&'a str>,
}

pub struct Session<W> {
    evaluator: ScriptEvaluator,
    out: W,
    format: OutputFormat,
}

impl<W: Write> Session<W> {
    pub fn new(evaluator: ScriptEvaluator, out: W, format: OutputFormat) -> Self {
        Self {
            evaluator,
            out,
            format,
        }
    }

    /// Stops at the first bad line or collaborator failure.
    pub fn run(&mut self, script: &str) -> Result<()> {
        for (index, raw) in script.lines().enumerate() {
            let line = index + 1;
            let command = parse_line(raw).with_context(|| format!("line {line}"))?;
            let Some(command) = command else {
                continue;
            };
            let text = strip_comment(raw);
            self.apply(&command)
                .with_context(|| format!("line {line}: {text}"))?;
            self.report(line, text)?;
        }
        self.out.flush()?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (ScriptEvaluator, W) {
        (self.evaluator, self.out)
    }

    fn apply(&mut self, command: &Command) -> Result<(), EvaluatorError> {
        match command {
            Command::Arm(status) => self.evaluator.set_arming_status(*status),
            Command::Sensor { name, active } => {
                self.evaluator.set_sensor_activation(name, *active)
            }
            Command::Add { sensor_type, name } => self
                .evaluator
                .add_sensor(Sensor::new(name.clone(), *sensor_type)),
            Command::Remove(name) => self.evaluator.remove_sensor(name),
            Command::Image(label) => self.evaluator.process_image(label),
            Command::Status => Ok(()),
        }
    }

    fn report(&mut self, line: usize, command: &str) -> Result<()> {
        let sensors = self.evaluator.sensors()?;
        let snapshot = Snapshot {
            line,
            command,
            arming: self.evaluator.arming_status()?,
            alarm: self.evaluator.alarm_status()?,
            cat_detected: self.evaluator.cat_detected(),
            active_sensors: sensors
                .iter()
                .filter(|sensor| sensor.is_active())
                .map(|sensor| sensor.name().as_str())
                .collect(),
        };

        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, &snapshot)?;
                writeln!(self.out)?;
            }
            OutputFormat::Text => {
                let active = if snapshot.active_sensors.is_empty() {
                    "-".to_string()
                } else {
                    snapshot.active_sensors.join(", ")
                };
                writeln!(
                    self.out,
                    "{:>4}  {:<28} alarm={} arming={} cat={} active=[{}]",
                    snapshot.line,
                    snapshot.command,
                    snapshot.alarm,
                    snapshot.arming,
                    if snapshot.cat_detected { "yes" } else { "no" },
                    active,
                )?;
            }
        }
        Ok(())
    }
}

fn strip_comment(raw: &str) -> &str {
    raw.split_once('#').map_or(raw, |(code, _)| code).trim()
}
