//! Parameters of state-changing commands
//!
//! Typed builders produce the nested-message parameters for switches,
//! thermostat zones and the plant season. `validate_action_params` applies
//! the same rules to untyped parameters so that malformed requests are
//! refused before anything is sent.

use crate::command::Command;
use crate::error::{DomoError, DomoResult};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Identifier of an actuator on the controller
pub type ActId = u32;

/// Which switch command to use for a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchKind {
    Light,
    Relay,
}

impl SwitchKind {
    /// Catalog command for this kind of switch
    pub fn command(self) -> Command {
        match self {
            SwitchKind::Light => Command::LightSwitch,
            SwitchKind::Relay => Command::RelayActivation,
        }
    }
}

/// Operating mode of a thermostat zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ThermoMode {
    Off = 0,
    Manual = 1,
    Auto = 2,
    Jolly = 3,
}

impl ThermoMode {
    /// Mode from its wire code
    pub fn from_code(code: u8) -> DomoResult<Self> {
        match code {
            0 => Ok(ThermoMode::Off),
            1 => Ok(ThermoMode::Manual),
            2 => Ok(ThermoMode::Auto),
            3 => Ok(ThermoMode::Jolly),
            other => Err(DomoError::rejected(format!(
                "thermostat mode {other} is not one of 0 (off), 1 (manual), 2 (auto), 3 (jolly)"
            ))),
        }
    }

    /// Wire code of the mode
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThermoMode::Off => "off",
            ThermoMode::Manual => "manual",
            ThermoMode::Auto => "auto",
            ThermoMode::Jolly => "jolly",
        }
    }
}

impl TryFrom<u8> for ThermoMode {
    type Error = DomoError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        ThermoMode::from_code(code)
    }
}

impl FromStr for ThermoMode {
    type Err = DomoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(ThermoMode::Off),
            "manual" => Ok(ThermoMode::Manual),
            "auto" => Ok(ThermoMode::Auto),
            "jolly" => Ok(ThermoMode::Jolly),
            other => Err(DomoError::rejected(format!(
                "unknown thermostat mode '{other}'"
            ))),
        }
    }
}

impl fmt::Display for ThermoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heating/cooling season of the plant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Off,
    Winter,
    Summer,
}

impl Season {
    pub fn as_str(self) -> &'static str {
        match self {
            Season::Off => "off",
            Season::Winter => "winter",
            Season::Summer => "summer",
        }
    }
}

impl FromStr for Season {
    type Err = DomoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Season::Off),
            "winter" => Ok(Season::Winter),
            "summer" => Ok(Season::Summer),
            other => Err(DomoError::rejected(format!(
                "season '{other}' is not one of off, winter, summer"
            ))),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowest set-point accepted, in degrees Celsius
pub const MIN_SET_POINT_CELSIUS: f64 = -50.0;

/// Highest set-point accepted, in degrees Celsius
pub const MAX_SET_POINT_CELSIUS: f64 = 100.0;

/// Encode a Celsius set-point as integer tenths of a degree
///
/// The value is rounded to one decimal, half away from zero, so 21.26 and
/// 21.25 both become 213. Non-finite values and values outside
/// [`MIN_SET_POINT_CELSIUS`]..=[`MAX_SET_POINT_CELSIUS`] are rejected.
pub fn encode_set_point(celsius: f64) -> DomoResult<i64> {
    if !celsius.is_finite() {
        return Err(DomoError::rejected(format!(
            "set-point {celsius} is not a finite temperature"
        )));
    }
    if !(MIN_SET_POINT_CELSIUS..=MAX_SET_POINT_CELSIUS).contains(&celsius) {
        return Err(DomoError::rejected(format!(
            "set-point {celsius} is outside {MIN_SET_POINT_CELSIUS}..={MAX_SET_POINT_CELSIUS} degrees"
        )));
    }
    Ok((celsius * 10.0).round() as i64)
}

/// Parameters for a light or relay switch
pub fn switch_params(act_id: ActId, on: bool) -> Map<String, Value> {
    let mut params = Map::new();
    params.insert("act_id".to_string(), Value::from(act_id));
    params.insert("wanted_status".to_string(), Value::from(u8::from(on)));
    params
}

/// Parameters for a thermostat zone configuration
pub fn thermostat_params(
    act_id: ActId,
    mode: ThermoMode,
    celsius: f64,
) -> DomoResult<Map<String, Value>> {
    let mut params = Map::new();
    params.insert("act_id".to_string(), Value::from(act_id));
    params.insert("mode".to_string(), Value::from(mode.code()));
    params.insert("set_point".to_string(), Value::from(encode_set_point(celsius)?));
    Ok(params)
}

/// Parameters for a season change
pub fn season_params(season: Season) -> Map<String, Value> {
    let mut params = Map::new();
    params.insert("season".to_string(), Value::from(season.as_str()));
    params
}

/// Check untyped parameters of a mutating command
///
/// Non-mutating commands accept any parameters.
pub fn validate_action_params(command: Command, params: &Map<String, Value>) -> DomoResult<()> {
    match command {
        Command::LightSwitch | Command::RelayActivation => {
            require_act_id(command, params)?;
            match params.get("wanted_status").and_then(Value::as_u64) {
                Some(0 | 1) => Ok(()),
                _ => Err(DomoError::rejected(format!(
                    "{command} requires wanted_status 0 or 1"
                ))),
            }
        }
        Command::ThermostatZoneConfig => {
            require_act_id(command, params)?;
            let mode = params
                .get("mode")
                .and_then(Value::as_u64)
                .ok_or_else(|| DomoError::rejected(format!("{command} requires a mode")))?;
            let mode = u8::try_from(mode).map_err(|_| {
                DomoError::rejected(format!("thermostat mode {mode} is out of range"))
            })?;
            ThermoMode::from_code(mode)?;
            if params.get("set_point").and_then(Value::as_i64).is_none() {
                return Err(DomoError::rejected(format!(
                    "{command} requires an integer set_point in tenths of a degree"
                )));
            }
            Ok(())
        }
        Command::ThermostatSeason => {
            let season = params
                .get("season")
                .and_then(Value::as_str)
                .ok_or_else(|| DomoError::rejected(format!("{command} requires a season")))?;
            Season::from_str(season).map(|_| ())
        }
        _ => Ok(()),
    }
}

fn require_act_id(command: Command, params: &Map<String, Value>) -> DomoResult<()> {
    match params.get("act_id").and_then(Value::as_u64) {
        Some(_) => Ok(()),
        None => Err(DomoError::rejected(format!("{command} requires an act_id"))),
    }
}
