//! Protocol types for the Eti/Domo home-automation controller
//!
//! The controller speaks a sequence-numbered JSON protocol, posted as a
//! single url-encoded `command` form field. This crate holds everything that
//! does not touch the network: the closed command catalog, envelope
//! construction, response validation, action parameters, payload shapes and
//! light-name resolution.

mod action;
mod command;
mod endpoint;
mod envelope;
mod error;
mod resolve;
mod response;

pub mod entities;

pub use action::{
    encode_set_point, season_params, switch_params, thermostat_params, validate_action_params,
    ActId, Season, SwitchKind, ThermoMode, MAX_SET_POINT_CELSIUS, MIN_SET_POINT_CELSIUS,
};
pub use command::{Command, EnvelopeFamily, MAP_WIRE_NAME, USERS_LIST_WIRE_NAME};
pub use endpoint::{base_url, ENDPOINT_PATH};
pub use envelope::{ApplicationMessage, Envelope, APPL_MSG_TYPE, FORM_FIELD};
pub use error::{DomoError, DomoResult};
pub use resolve::resolve_light_id;
pub use response::{ack_reason, client_id, validate_response, ACK_REASON_FIELD, CLIENT_ID_FIELD};

/// Sequence number of the first command of a session
pub const INITIAL_CSEQ: u64 = 1;
