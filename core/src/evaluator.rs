//! Alarm evaluator.
//!
//! Applies the transition rules over sensor activity, arming mode and the
//! last cat-detection result, and writes the outcome back to the store.
//! Each operation is read-decide-write against the store with no
//! interleaving; `&mut self` on every event keeps it that way.
//!
//! ```text
//! NO_ALARM      -> PENDING_ALARM  sensor activates
//! PENDING_ALARM -> ALARM          sensor activates, cat while ARMED_HOME,
//!                                 or arming home with a cat remembered
//! PENDING_ALARM -> NO_ALARM       last active sensor deactivates,
//!                                 or no cat with every sensor idle
//! any           -> NO_ALARM       DISARMED
//! ```

use std::fmt;

use catwatch_types::{AlarmStatus, ArmingStatus, Sensor, SensorName};
use tracing::{debug, info};

use crate::error::EvaluatorError;
use crate::events::StatusEvent;
use crate::ports::{ImageClassifier, SecurityStore, StatusListener};

/// Minimum classifier confidence for an image to count as "cat present".
pub const CAT_CONFIDENCE_THRESHOLD: f32 = 50.0;

/// Handle returned by [`AlarmEvaluator::add_status_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Drives the alarm state machine over a [`SecurityStore`].
///
/// Owns the store and the classifier. Every event method reads current state
/// from the store, decides, and writes the outcome back before returning.
pub struct AlarmEvaluator<S, C> {
    store: S,
    classifier: C,
    /// Result of the most recent classification. Consumed by arming changes.
    cat_detected: bool,
    listeners: Vec<(ListenerId, Box<dyn StatusListener>)>,
    next_listener_id: u64,
}

impl<S, C> fmt::Debug for AlarmEvaluator<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlarmEvaluator")
            .field("cat_detected", &self.cat_detected)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<S, C> AlarmEvaluator<S, C>
where
    S: SecurityStore,
    C: ImageClassifier,
{
    /// Starts with no cat remembered and no listeners.
    pub fn new(store: S, classifier: C) -> Self {
        Self {
            store,
            classifier,
            cat_detected: false,
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    /// Read-only access for inspection; mutate through the event methods.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Whether the last successful classification found a cat.
    #[must_use]
    pub fn cat_detected(&self) -> bool {
        self.cat_detected
    }

    /// Listeners run synchronously, in registration order, after each
    /// state write.
    pub fn add_status_listener(&mut self, listener: impl StatusListener + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not registered.
    pub fn remove_status_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Current alarm status as persisted by the store.
    pub fn alarm_status(&self) -> Result<AlarmStatus, EvaluatorError> {
        Ok(self.store.alarm_status()?)
    }

    pub fn arming_status(&self) -> Result<ArmingStatus, EvaluatorError> {
        Ok(self.store.arming_status()?)
    }

    /// Snapshot of every registered sensor.
    pub fn sensors(&self) -> Result<Vec<Sensor>, EvaluatorError> {
        Ok(self.store.sensors()?)
    }

    /// Registration has no alarm side effects.
    pub fn add_sensor(&mut self, sensor: Sensor) -> Result<(), EvaluatorError> {
        debug!(sensor = %sensor.name(), kind = %sensor.sensor_type(), "Adding sensor");
        self.store.add_sensor(sensor)?;
        Ok(())
    }

    pub fn remove_sensor(&mut self, name: &SensorName) -> Result<(), EvaluatorError> {
        debug!(sensor = %name, "Removing sensor");
        self.store.remove_sensor(name)?;
        Ok(())
    }

    /// True iff no sensor in the store is active. Vacuously true when empty.
    pub fn check_all_sensors_inactive(&self) -> Result<bool, EvaluatorError> {
        Ok(self
            .store
            .sensors()?
            .iter()
            .all(|sensor| !sensor.is_active()))
    }

    /// Toggle a sensor.
    ///
    /// A toggle to the flag the store already holds is a no-op. Activation
    /// escalates the alarm one rung in every arming mode. Deactivation only
    /// clears a pending alarm once every sensor is idle; `Alarm` is sticky.
    pub fn set_sensor_activation(
        &mut self,
        name: &SensorName,
        active: bool,
    ) -> Result<(), EvaluatorError> {
        let mut sensor = self.store.sensor(name)?;
        if sensor.is_active() == active {
            debug!(sensor = %name, active, "Sensor already in requested state");
            return Ok(());
        }

        sensor.set_active(active);
        self.store.update_sensor(&sensor)?;
        self.publish(&StatusEvent::SensorStatusChanged {
            name: name.clone(),
            active,
        });

        let current = self.store.alarm_status()?;
        if active {
            let next = current.escalate();
            if next != current {
                self.write_alarm(current, next)?;
            }
        } else if current == AlarmStatus::PendingAlarm && self.check_all_sensors_inactive()? {
            self.write_alarm(current, AlarmStatus::NoAlarm)?;
        }
        Ok(())
    }

    /// Change the arming mode.
    ///
    /// Disarming forces `NoAlarm`. Either armed mode resets every sensor to
    /// inactive; arming home while a cat was last seen raises `Alarm`.
    pub fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), EvaluatorError> {
        self.store.set_arming_status(status)?;
        info!(arming = %status, "Arming status set");
        self.publish(&StatusEvent::ArmingStatusChanged(status));

        if !status.is_armed() {
            return self.set_alarm(AlarmStatus::NoAlarm);
        }
        self.reset_sensors()?;
        if status == ArmingStatus::ArmedHome && self.cat_detected {
            debug!("Cat seen before arming home");
            self.set_alarm(AlarmStatus::Alarm)?;
        }
        Ok(())
    }

    /// Classify a camera image and apply the result.
    ///
    /// The cat-detection memory is only replaced when the classifier
    /// succeeds.
    pub fn process_image(&mut self, image: &C::Image) -> Result<(), EvaluatorError> {
        let cat = self
            .classifier
            .image_contains_cat(image, CAT_CONFIDENCE_THRESHOLD)?;
        self.cat_detected = cat;
        debug!(cat, "Image classified");
        self.publish(&StatusEvent::CatDetected(cat));

        if cat {
            if self.store.arming_status()? == ArmingStatus::ArmedHome {
                self.set_alarm(AlarmStatus::Alarm)?;
            }
        } else if self.check_all_sensors_inactive()? {
            self.set_alarm(AlarmStatus::NoAlarm)?;
        }
        Ok(())
    }

    fn reset_sensors(&mut self) -> Result<(), EvaluatorError> {
        for mut sensor in self.store.sensors()? {
            if !sensor.is_active() {
                continue;
            }
            sensor.set_active(false);
            self.store.update_sensor(&sensor)?;
            self.publish(&StatusEvent::SensorStatusChanged {
                name: sensor.name().clone(),
                active: false,
            });
        }
        Ok(())
    }

    fn set_alarm(&mut self, to: AlarmStatus) -> Result<(), EvaluatorError> {
        let from = self.store.alarm_status()?;
        self.write_alarm(from, to)
    }

    // Always persists; listeners only hear about actual changes.
    fn write_alarm(&mut self, from: AlarmStatus, to: AlarmStatus) -> Result<(), EvaluatorError> {
        self.store.set_alarm_status(to)?;
        if from != to {
            info!(%from, %to, "Alarm status changed");
            self.publish(&StatusEvent::AlarmStatusChanged { from, to });
        }
        Ok(())
    }

    fn publish(&self, event: &StatusEvent) {
        for (_, listener) in &self.listeners {
            listener.on_status_event(event);
        }
    }
}
