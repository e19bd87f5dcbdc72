//! Collaborator ports.
//!
//! The evaluator owns no persistent state beyond its cat-detection memory.
//! Everything else lives behind these traits and is supplied by the host.

use catwatch_types::{AlarmStatus, ArmingStatus, Sensor, SensorName};

use crate::error::{ClassifierError, StoreError};
use crate::events::StatusEvent;

/// Authoritative owner of the sensor set, arming status and alarm status.
pub trait SecurityStore: Send {
    /// Every registered sensor, ordered by name.
    fn sensors(&self) -> Result<Vec<Sensor>, StoreError>;

    fn sensor(&self, name: &SensorName) -> Result<Sensor, StoreError> {
        self.sensors()?
            .into_iter()
            .find(|sensor| sensor.name() == name)
            .ok_or_else(|| StoreError::UnknownSensor(name.clone()))
    }

    /// Persist one sensor's state. The sensor must already be registered.
    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError>;

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StoreError>;

    fn remove_sensor(&mut self, name: &SensorName) -> Result<(), StoreError>;

    fn arming_status(&self) -> Result<ArmingStatus, StoreError>;

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StoreError>;

    fn alarm_status(&self) -> Result<AlarmStatus, StoreError>;

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StoreError>;
}

/// Camera image classifier. `Image` is opaque to the evaluator.
pub trait ImageClassifier: Send {
    type Image;

    fn image_contains_cat(
        &self,
        image: &Self::Image,
        confidence_threshold: f32,
    ) -> Result<bool, ClassifierError>;
}

/// Observer of evaluator state changes (UI panels, notifiers).
pub trait StatusListener: Send {
    fn on_status_event(&self, event: &StatusEvent);
}

impl<F> StatusListener for F
where
    F: Fn(&StatusEvent) + Send,
{
    fn on_status_event(&self, event: &StatusEvent) {
        self(event);
    }
}
