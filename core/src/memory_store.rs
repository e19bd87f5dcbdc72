//! In-memory [`SecurityStore`].
//!
//! Holds everything for the lifetime of the process. Hosts that need
//! durability supply their own store.

use std::collections::BTreeMap;

use catwatch_types::{AlarmStatus, ArmingStatus, Sensor, SensorName};
use tracing::debug;

use crate::error::StoreError;
use crate::ports::SecurityStore;

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    sensors: BTreeMap<SensorName, Sensor>,
    arming_status: ArmingStatus,
    alarm_status: AlarmStatus,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Later entries replace earlier ones with the same name.
    #[must_use]
    pub fn with_sensors(sensors: impl IntoIterator<Item = Sensor>) -> Self {
        let sensors = sensors
            .into_iter()
            .map(|sensor| (sensor.name().clone(), sensor))
            .collect();
        Self {
            sensors,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_arming_status(mut self, status: ArmingStatus) -> Self {
        self.arming_status = status;
        self
    }

    #[must_use]
    pub fn with_alarm_status(mut self, status: AlarmStatus) -> Self {
        self.alarm_status = status;
        self
    }
}

impl SecurityStore for MemoryStore {
    fn sensors(&self) -> Result<Vec<Sensor>, StoreError> {
        Ok(self.sensors.values().cloned().collect())
    }

    fn sensor(&self, name: &SensorName) -> Result<Sensor, StoreError> {
        self.sensors
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::UnknownSensor(name.clone()))
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError> {
        let slot = self
            .sensors
            .get_mut(sensor.name())
            .ok_or_else(|| StoreError::UnknownSensor(sensor.name().clone()))?;
        *slot = sensor.clone();
        Ok(())
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StoreError> {
        if let Some(previous) = self.sensors.insert(sensor.name().clone(), sensor) {
            debug!(sensor = %previous.name(), "Replaced existing sensor");
        }
        Ok(())
    }

    fn remove_sensor(&mut self, name: &SensorName) -> Result<(), StoreError> {
        self.sensors
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::UnknownSensor(name.clone()))
    }

    fn arming_status(&self) -> Result<ArmingStatus, StoreError> {
        Ok(self.arming_status)
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StoreError> {
        self.arming_status = status;
        Ok(())
    }

    fn alarm_status(&self) -> Result<AlarmStatus, StoreError> {
        Ok(self.alarm_status)
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StoreError> {
        self.alarm_status = status;
        Ok(())
    }
}
