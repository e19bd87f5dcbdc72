//! Collaborator failures propagate unchanged and are never retried.

use catwatch_core::{AlarmEvaluator, EvaluatorError, MemoryStore, SecurityStore, StoreError};
use catwatch_types::{AlarmStatus, ArmingStatus, SensorType};

use crate::common::{
    CAT, CORRUPT, ConfidenceClassifier, FailOn, FlakyStore, failing, house, name, sensor,
};

fn is_unavailable(err: &EvaluatorError) -> bool {
    matches!(err, EvaluatorError::Store(StoreError::Unavailable { .. }))
}

#[test]
fn sensor_write_failure_stops_before_alarm() {
    let mut eval = failing(
        house().with_arming_status(ArmingStatus::ArmedAway),
        FailOn::SensorWrite,
    );
    let err = eval.set_sensor_activation(&name("door"), true).unwrap_err();
    assert!(is_unavailable(&err));
    assert!(eval.store().alarm_writes.is_empty());
    assert!(!eval.store().inner.sensor(&name("door")).unwrap().is_active());
}

#[test]
fn alarm_write_failure_leaves_sensor_persisted() {
    let mut eval = failing(house(), FailOn::AlarmWrite);
    let err = eval.set_sensor_activation(&name("door"), true).unwrap_err();
    assert!(is_unavailable(&err));

    let mut store: FlakyStore = eval.into_store();
    assert!(store.inner.sensor(&name("door")).unwrap().is_active());
    assert_eq!(store.inner.alarm_status().unwrap(), AlarmStatus::NoAlarm);

    // Once the store recovers, re-driving the same toggle is a no-op.
    store.fail_on = FailOn::Nothing;
    let mut eval = AlarmEvaluator::new(store, ConfidenceClassifier);
    eval.set_sensor_activation(&name("door"), true).unwrap();
    assert_eq!(eval.alarm_status().unwrap(), AlarmStatus::NoAlarm);
}

#[test]
fn arming_write_failure_skips_resets() {
    let door = sensor("door", SensorType::Door).with_active(true);
    let store = MemoryStore::with_sensors([door]).with_alarm_status(AlarmStatus::PendingAlarm);
    let mut eval = failing(store, FailOn::ArmingWrite);

    let err = eval.set_arming_status(ArmingStatus::ArmedAway).unwrap_err();
    assert!(is_unavailable(&err));
    assert!(eval.store().inner.sensor(&name("door")).unwrap().is_active());

    let err = eval.set_arming_status(ArmingStatus::Disarmed).unwrap_err();
    assert!(is_unavailable(&err));
    assert!(eval.store().alarm_writes.is_empty());
}

#[test]
fn classifier_failure_keeps_previous_memory() {
    let mut eval = failing(house(), FailOn::Nothing);
    eval.process_image(&CAT).unwrap();
    assert!(eval.cat_detected());

    let err = eval.process_image(&CORRUPT).unwrap_err();
    assert!(matches!(err, EvaluatorError::Classifier(_)));
    assert!(eval.cat_detected());
    assert!(eval.store().alarm_writes.is_empty());

    // No "assume no cat" fallback: the remembered cat still counts.
    eval.set_arming_status(ArmingStatus::ArmedHome).unwrap();
    assert_eq!(eval.alarm_status().unwrap(), AlarmStatus::Alarm);
}

#[test]
fn read_failure_propagates_from_queries() {
    let eval = failing(house(), FailOn::Reads);
    assert!(is_unavailable(&eval.check_all_sensors_inactive().unwrap_err()));
    assert!(is_unavailable(&eval.alarm_status().unwrap_err()));
    assert!(is_unavailable(&eval.arming_status().unwrap_err()));
}

#[test]
fn unknown_sensor_is_a_store_error() {
    let mut eval = failing(house(), FailOn::Nothing);
    let err = eval.set_sensor_activation(&name("attic"), true).unwrap_err();
    assert!(matches!(
        err,
        EvaluatorError::Store(StoreError::UnknownSensor(ref missing)) if *missing == name("attic")
    ));
    assert!(eval.remove_sensor(&name("attic")).is_err());
    eval.add_sensor(sensor("attic", SensorType::Motion)).unwrap();
    eval.set_sensor_activation(&name("attic"), true).unwrap();
}
