//! Shapes of the list payloads returned by the controller
//!
//! Only the fields callers consume are typed. Fields whose meaning the
//! controller does not document are kept as raw JSON values.

use crate::action::ActId;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload of the list commands that answer with an `array`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPayload<T> {
    #[serde(default = "Vec::new")]
    pub array: Vec<T>,
}

/// A named level of the plant topology (a floor or a room) holding children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group<T> {
    pub name: String,
    #[serde(default)]
    pub status: i64,
    #[serde(default = "Vec::new")]
    pub array: Vec<T>,
}

/// Floor of the lights tree
pub type LightFloor = Group<LightRoom>;

/// Room of the lights tree
pub type LightRoom = Group<Light>;

/// Floor of the thermoregulation tree
pub type ThermoFloor = Group<ThermoZone>;

/// A light actuator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub act_id: ActId,
    pub name: String,
    #[serde(default)]
    pub floor_ind: i64,
    #[serde(default)]
    pub room_ind: i64,
    /// 1 when on, 0 when off
    #[serde(default)]
    pub status: i64,
    /// Actuator type, e.g. `STEP_STEP`
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub leaf: Value,
}

impl Light {
    pub fn is_on(&self) -> bool {
        self.status != 0
    }
}

/// A thermostat zone; temperatures are integer tenths of a degree Celsius
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermoZone {
    pub act_id: ActId,
    pub name: String,
    #[serde(default)]
    pub floor_ind: i64,
    #[serde(default)]
    pub room_ind: i64,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub temp: i64,
    #[serde(default)]
    pub mode: Value,
    #[serde(default)]
    pub set_point: i64,
    #[serde(default)]
    pub thermo_algo: Value,
    #[serde(default)]
    pub season: Value,
    #[serde(default)]
    pub leaf: Value,
}

impl ThermoZone {
    /// Measured temperature in degrees Celsius
    pub fn temperature(&self) -> f64 {
        self.temp as f64 / 10.0
    }

    /// Configured set-point in degrees Celsius
    pub fn set_point_celsius(&self) -> f64 {
        self.set_point as f64 / 10.0
    }
}

/// Wall-clock time used in timer timetables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: u8,
    pub min: u8,
    pub sec: u8,
}

impl ClockTime {
    /// `None` when the controller reports an out-of-range component
    pub fn to_naive_time(self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour.into(), self.min.into(), self.sec.into())
    }
}

/// One start/stop window of a timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: ClockTime,
    pub stop: ClockTime,
    #[serde(default)]
    pub active: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub enabled: Value,
    #[serde(default)]
    pub days: Value,
    #[serde(default = "Vec::new")]
    pub timetable: Vec<TimeSlot>,
}

/// Analog input such as a hygrometer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalogInput {
    pub act_id: ActId,
    pub name: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relay {
    pub act_id: ActId,
    pub name: String,
    #[serde(default)]
    pub status: i64,
}

/// Video surveillance camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub name: String,
    #[serde(default)]
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
}

/// Payload of the user listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserList {
    #[serde(default = "Vec::new")]
    pub sl_users_list: Vec<User>,
}

/// Payload of the feature list: the categories this session may see
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureList {
    #[serde(default = "Vec::new")]
    pub list: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lights_tree() {
        let payload: ListPayload<LightFloor> = serde_json::from_value(json!({
            "sl_data_ack_reason": 0,
            "array": [{
                "name": "Piano terra",
                "status": 1,
                "array": [{
                    "name": "Cucina",
                    "status": 1,
                    "array": [{
                        "act_id": 33,
                        "name": "Lampadario",
                        "floor_ind": 0,
                        "room_ind": 2,
                        "status": 1,
                        "type": "STEP_STEP",
                        "leaf": true
                    }]
                }]
            }]
        }))
        .unwrap();

        let light = &payload.array[0].array[0].array[0];
        assert_eq!(light.act_id, 33);
        assert_eq!(light.kind, "STEP_STEP");
        assert!(light.is_on());
    }

    #[test]
    fn test_thermo_zone_tenths() {
        let zone: ThermoZone = serde_json::from_value(json!({
            "act_id": 7,
            "name": "Soggiorno",
            "temp": 215,
            "set_point": 200,
            "mode": 2
        }))
        .unwrap();
        assert_eq!(zone.temperature(), 21.5);
        assert_eq!(zone.set_point_celsius(), 20.0);
        assert_eq!(zone.mode, json!(2));
    }

    #[test]
    fn test_timer_timetable() {
        let timer: Timer = serde_json::from_value(json!({
            "id": 1,
            "name": "Irrigazione",
            "enabled": 1,
            "days": 127,
            "timetable": [{
                "start": { "hour": 6, "min": 30, "sec": 0 },
                "stop": { "hour": 7, "min": 0, "sec": 0 },
                "active": 1
            }]
        }))
        .unwrap();
        assert_eq!(timer.timetable.len(), 1);
        assert_eq!(timer.timetable[0].start.min, 30);
        assert_eq!(timer.timetable[0].stop.hour, 7);
        assert_eq!(
            timer.timetable[0].start.to_naive_time(),
            NaiveTime::from_hms_opt(6, 30, 0)
        );
    }

    #[test]
    fn test_clock_time_out_of_range() {
        let time = ClockTime { hour: 24, min: 0, sec: 0 };
        assert_eq!(time.to_naive_time(), None);
    }

    #[test]
    fn test_missing_array_defaults_to_empty() {
        let payload: ListPayload<Relay> =
            serde_json::from_value(json!({ "sl_data_ack_reason": 0 })).unwrap();
        assert!(payload.array.is_empty());
    }
}
