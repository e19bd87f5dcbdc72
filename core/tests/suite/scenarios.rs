//! End-to-end alarm scenarios against the in-memory store.

use catwatch_core::{MemoryStore, SecurityStore};
use catwatch_types::{AlarmStatus, ArmingStatus, SensorType};

use crate::common::{CAT, NO_CAT, evaluator, house, name, sensor};

#[test]
fn armed_home_door_opens_goes_pending() {
    let mut eval = evaluator(house());
    eval.set_arming_status(ArmingStatus::ArmedHome).unwrap();
    assert_eq!(eval.alarm_status().unwrap(), AlarmStatus::NoAlarm);

    eval.set_sensor_activation(&name("door"), true).unwrap();
    assert_eq!(eval.alarm_status().unwrap(), AlarmStatus::PendingAlarm);
    assert!(eval.store().inner.sensor(&name("door")).unwrap().is_active());
}

#[test]
fn armed_away_pending_door_opens_goes_alarm() {
    let mut eval = evaluator(
        house()
            .with_arming_status(ArmingStatus::ArmedAway)
            .with_alarm_status(AlarmStatus::PendingAlarm),
    );
    eval.set_sensor_activation(&name("door"), true).unwrap();
    assert_eq!(eval.alarm_status().unwrap(), AlarmStatus::Alarm);
}

#[test]
fn pending_clears_only_when_every_sensor_is_idle() {
    let mut eval = evaluator(house());
    eval.set_arming_status(ArmingStatus::ArmedAway).unwrap();
    eval.set_sensor_activation(&name("door"), true).unwrap();
    // Second activation would escalate, so stage the window directly.
    eval.add_sensor(sensor("window", SensorType::Window).with_active(true))
        .unwrap();
    assert_eq!(eval.alarm_status().unwrap(), AlarmStatus::PendingAlarm);

    eval.set_sensor_activation(&name("door"), false).unwrap();
    assert_eq!(eval.alarm_status().unwrap(), AlarmStatus::PendingAlarm);

    eval.set_sensor_activation(&name("window"), false).unwrap();
    assert_eq!(eval.alarm_status().unwrap(), AlarmStatus::NoAlarm);
}

#[test]
fn deactivating_only_active_sensor_in_every_mode() {
    for arming in ArmingStatus::ALL {
        for (initial, expected) in [
            (AlarmStatus::PendingAlarm, AlarmStatus::NoAlarm),
            (AlarmStatus::Alarm, AlarmStatus::Alarm),
        ] {
            let door = sensor("door", SensorType::Door).with_active(true);
            let store = MemoryStore::with_sensors([door])
                .with_arming_status(arming)
                .with_alarm_status(initial);
            let mut eval = evaluator(store);
            eval.set_sensor_activation(&name("door"), false).unwrap();
            assert_eq!(eval.alarm_status().unwrap(), expected, "{arming} from {initial}");
        }
    }
}

#[test]
fn two_activations_reach_alarm_and_stay_there() {
    let mut eval = evaluator(house());
    eval.set_arming_status(ArmingStatus::ArmedAway).unwrap();
    eval.set_sensor_activation(&name("door"), true).unwrap();
    eval.set_sensor_activation(&name("window"), true).unwrap();
    assert_eq!(eval.alarm_status().unwrap(), AlarmStatus::Alarm);

    eval.set_sensor_activation(&name("motion"), true).unwrap();
    eval.set_sensor_activation(&name("door"), false).unwrap();
    eval.set_sensor_activation(&name("window"), false).unwrap();
    eval.set_sensor_activation(&name("motion"), false).unwrap();
    assert_eq!(eval.alarm_status().unwrap(), AlarmStatus::Alarm);
}

#[test]
fn cat_while_armed_home_alarms_and_clear_frame_resets() {
    let mut eval = evaluator(house());
    eval.set_arming_status(ArmingStatus::ArmedHome).unwrap();

    eval.process_image(&CAT).unwrap();
    assert_eq!(eval.alarm_status().unwrap(), AlarmStatus::Alarm);

    eval.process_image(&NO_CAT).unwrap();
    assert_eq!(eval.alarm_status().unwrap(), AlarmStatus::NoAlarm);
    assert!(!eval.cat_detected());
}

#[test]
fn remembered_cat_alarms_when_armed_home_later() {
    let mut eval = evaluator(house());
    eval.process_image(&CAT).unwrap();
    assert_eq!(eval.alarm_status().unwrap(), AlarmStatus::NoAlarm);
    assert!(eval.store().alarm_writes.is_empty());

    eval.set_arming_status(ArmingStatus::ArmedHome).unwrap();
    assert_eq!(eval.alarm_status().unwrap(), AlarmStatus::Alarm);
}

#[test]
fn remembered_cat_ignored_when_armed_away() {
    let mut eval = evaluator(house());
    eval.process_image(&CAT).unwrap();
    eval.set_arming_status(ArmingStatus::ArmedAway).unwrap();
    assert_eq!(eval.alarm_status().unwrap(), AlarmStatus::NoAlarm);
}

#[test]
fn disarm_wins_over_everything() {
    let mut eval = evaluator(house());
    eval.set_arming_status(ArmingStatus::ArmedHome).unwrap();
    eval.process_image(&CAT).unwrap();
    eval.set_sensor_activation(&name("motion"), true).unwrap();
    assert_eq!(eval.alarm_status().unwrap(), AlarmStatus::Alarm);

    eval.set_arming_status(ArmingStatus::Disarmed).unwrap();
    assert_eq!(eval.alarm_status().unwrap(), AlarmStatus::NoAlarm);
}

// Assumption: ARMED_AWAY resets sensors exactly like ARMED_HOME.
#[test]
fn arming_resets_every_sensor_in_both_armed_modes() {
    for arming in [ArmingStatus::ArmedHome, ArmingStatus::ArmedAway] {
        let store = MemoryStore::with_sensors([
            sensor("door", SensorType::Door).with_active(true),
            sensor("window", SensorType::Window).with_active(true),
            sensor("motion", SensorType::Motion).with_active(true),
        ]);
        let mut eval = evaluator(store);
        eval.set_arming_status(arming).unwrap();
        assert!(eval.check_all_sensors_inactive().unwrap(), "{arming}");
        assert!(eval.sensors().unwrap().iter().all(|s| !s.is_active()));
    }
}

#[test]
fn replaying_the_same_toggle_is_idempotent() {
    let mut eval = evaluator(house());
    eval.set_sensor_activation(&name("door"), true).unwrap();
    let writes = eval.store().alarm_writes.clone();

    eval.set_sensor_activation(&name("door"), true).unwrap();
    assert_eq!(eval.store().alarm_writes, writes);
    assert_eq!(eval.alarm_status().unwrap(), AlarmStatus::PendingAlarm);
}

#[test]
fn sensors_can_be_registered_and_removed() {
    let mut eval = evaluator(MemoryStore::new());
    eval.add_sensor(sensor("garage", SensorType::Door)).unwrap();
    assert_eq!(eval.sensors().unwrap().len(), 1);
    assert_eq!(eval.alarm_status().unwrap(), AlarmStatus::NoAlarm);

    eval.remove_sensor(&name("garage")).unwrap();
    assert!(eval.sensors().unwrap().is_empty());
}
