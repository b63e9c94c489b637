//! Closed catalog of controller commands
//!
//! Every command the client can issue has a symbolic name (what callers use)
//! and a wire name (the `cmd_name` the controller expects). The set is fixed
//! at build time.

use crate::error::{DomoError, DomoResult};
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;

/// Wire name of the topology query, which is sent without a `client` field
pub const MAP_WIRE_NAME: &str = "map_descr_req";

/// Wire name of the user listing, which uses its own envelope shape
pub const USERS_LIST_WIRE_NAME: &str = "sl_users_list_req";

/// A command known to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Update,
    Relays,
    Cameras,
    Timers,
    Thermoregulation,
    AnalogInputs,
    DigitalInputs,
    TerminalsGroup,
    Lights,
    Features,
    Users,
    Map,
    LightSwitch,
    RelayActivation,
    ThermostatZoneConfig,
    ThermostatSeason,
}

/// Structural family of the envelope a command is sent in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeFamily {
    /// `sl_data_req` with a nested message carrying `client` and `cseq`
    Standard,
    /// `sl_data_req` whose nested message omits `client`
    Topology,
    /// Bare `sl_users_list_req`, no nested message and no `cseq`
    UsersList,
}

impl Command {
    /// Every command in the catalog
    pub const ALL: [Command; 16] = [
        Command::Update,
        Command::Relays,
        Command::Cameras,
        Command::Timers,
        Command::Thermoregulation,
        Command::AnalogInputs,
        Command::DigitalInputs,
        Command::TerminalsGroup,
        Command::Lights,
        Command::Features,
        Command::Users,
        Command::Map,
        Command::LightSwitch,
        Command::RelayActivation,
        Command::ThermostatZoneConfig,
        Command::ThermostatSeason,
    ];

    /// Symbolic name used by callers
    pub fn symbol(self) -> &'static str {
        match self {
            Command::Update => "update",
            Command::Relays => "relays",
            Command::Cameras => "cameras",
            Command::Timers => "timers",
            Command::Thermoregulation => "thermoregulation",
            Command::AnalogInputs => "analog_inputs",
            Command::DigitalInputs => "digital_inputs",
            Command::TerminalsGroup => "terminals_group",
            Command::Lights => "lights",
            Command::Features => "features",
            Command::Users => "users",
            Command::Map => "map",
            Command::LightSwitch => "light_switch",
            Command::RelayActivation => "relay_activation",
            Command::ThermostatZoneConfig => "thermostat_zone_config",
            Command::ThermostatSeason => "thermostat_season",
        }
    }

    /// `cmd_name` sent on the wire
    pub fn wire_name(self) -> &'static str {
        match self {
            Command::Update => "status_update_req",
            Command::Relays => "relays_list_req",
            Command::Cameras => "tvcc_cameras_list_req",
            Command::Timers => "timers_list_req",
            Command::Thermoregulation => "nested_thermo_list_req",
            Command::AnalogInputs => "analogin_list_req",
            Command::DigitalInputs => "digitalin_list_req",
            Command::TerminalsGroup => "terminals_group_list_req",
            Command::Lights => "nested_light_list_req",
            Command::Features => "feature_list_req",
            Command::Users => USERS_LIST_WIRE_NAME,
            Command::Map => MAP_WIRE_NAME,
            Command::LightSwitch => "light_switch_req",
            Command::RelayActivation => "relay_activation_req",
            Command::ThermostatZoneConfig => "thermo_zone_config_req",
            Command::ThermostatSeason => "thermo_season_req",
        }
    }

    /// Envelope family, decided from the wire name with the topology query
    /// taking precedence over the user listing
    pub fn family(self) -> EnvelopeFamily {
        match self.wire_name() {
            MAP_WIRE_NAME => EnvelopeFamily::Topology,
            USERS_LIST_WIRE_NAME => EnvelopeFamily::UsersList,
            _ => EnvelopeFamily::Standard,
        }
    }

    /// Parameters always sent in the nested message for this command
    pub fn default_params(self) -> Map<String, Value> {
        let params = match self {
            Command::Thermoregulation => json!({
                "extended_infos": 2,
                "topologic_scope": "plant",
                "value": 0,
            }),
            Command::Lights => json!({
                "topologic_scope": "plant",
                "value": 0,
            }),
            Command::DigitalInputs => json!({ "filter": 1023 }),
            _ => return Map::new(),
        };

        match params {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    /// Whether the command changes device state on the controller
    pub fn is_mutating(self) -> bool {
        matches!(
            self,
            Command::LightSwitch
                | Command::RelayActivation
                | Command::ThermostatZoneConfig
                | Command::ThermostatSeason
        )
    }

    /// Whether a successful dispatch consumes a sequence number
    pub fn advances_cseq(self) -> bool {
        self.family() != EnvelopeFamily::UsersList
    }

    /// List command that backs a feature category returned by the
    /// feature list, if any
    pub fn for_feature(feature: &str) -> Option<Command> {
        let command = Command::from_str(feature).ok()?;
        if command.is_mutating() || command == Command::Features {
            return None;
        }
        Some(command)
    }

    /// Resolve a symbolic name, accepting the short aliases the controller
    /// UI uses for some categories
    pub fn resolve(name: &str) -> DomoResult<Command> {
        let canonical = match name {
            "tvcc" => "cameras",
            "thermos" => "thermoregulation",
            "analogin" => "analog_inputs",
            "digitalin" => "digital_inputs",
            "terminals" => "terminals_group",
            other => other,
        };

        Command::ALL
            .into_iter()
            .find(|command| command.symbol() == canonical)
            .ok_or_else(|| DomoError::CommandNotFound {
                name: name.to_string(),
            })
    }
}

impl FromStr for Command {
    type Err = DomoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::resolve(s)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
