//! Wire envelopes
//!
//! Every request is a JSON document sent as the value of the `command` form
//! field. The `sl_cmd` discriminator selects the shape.

use crate::command::{Command, EnvelopeFamily};
use crate::error::DomoResult;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::trace;

/// Name of the single form field carrying the envelope
pub const FORM_FIELD: &str = "command";

/// Value of `sl_appl_msg_type` on data requests
pub const APPL_MSG_TYPE: &str = "domo";

/// Keys owned by the nested message that caller parameters cannot override
const RESERVED_MESSAGE_KEYS: [&str; 3] = ["client", "cmd_name", "cseq"];

/// A request envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "sl_cmd")]
pub enum Envelope {
    /// Login
    #[serde(rename = "sl_registration_req")]
    Registration { sl_login: String, sl_pwd: String },

    /// Catalog command in the standard or topology shape
    #[serde(rename = "sl_data_req")]
    Data {
        sl_appl_msg: ApplicationMessage,
        sl_appl_msg_type: &'static str,
        sl_client_id: String,
    },

    /// User listing
    #[serde(rename = "sl_users_list_req")]
    UsersList { sl_client_id: String },

    /// Session ping
    #[serde(rename = "sl_keep_alive_req")]
    KeepAlive { sl_client_id: String },
}

/// Nested message of a data request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    pub cmd_name: &'static str,
    pub cseq: u64,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl Envelope {
    /// Registration envelope for a login attempt
    pub fn registration(username: impl Into<String>, password: impl Into<String>) -> Self {
        Envelope::Registration {
            sl_login: username.into(),
            sl_pwd: password.into(),
        }
    }

    /// Keep-alive envelope for an established session
    pub fn keep_alive(session_id: impl Into<String>) -> Self {
        Envelope::KeepAlive {
            sl_client_id: session_id.into(),
        }
    }

    /// Build the envelope for a catalog command
    ///
    /// The command's default parameters are merged first and `extra` second,
    /// so callers can override defaults. Keys that belong to the message
    /// itself (`client`, `cmd_name`, `cseq`) are ignored in `extra`.
    pub fn for_command(
        command: Command,
        session_id: &str,
        cseq: u64,
        extra: Map<String, Value>,
    ) -> Self {
        let client = match command.family() {
            EnvelopeFamily::UsersList => {
                return Envelope::UsersList {
                    sl_client_id: session_id.to_string(),
                };
            }
            EnvelopeFamily::Topology => None,
            EnvelopeFamily::Standard => Some(session_id.to_string()),
        };

        let mut params = command.default_params();
        for (key, value) in extra {
            if RESERVED_MESSAGE_KEYS.contains(&key.as_str()) {
                trace!(key = %key, "Ignoring reserved message key in parameters");
                continue;
            }
            params.insert(key, value);
        }

        Envelope::Data {
            sl_appl_msg: ApplicationMessage {
                client,
                cmd_name: command.wire_name(),
                cseq,
                params,
            },
            sl_appl_msg_type: APPL_MSG_TYPE,
            sl_client_id: session_id.to_string(),
        }
    }

    /// Sequence number carried by the envelope, if any
    pub fn cseq(&self) -> Option<u64> {
        match self {
            Envelope::Data { sl_appl_msg, .. } => Some(sl_appl_msg.cseq),
            _ => None,
        }
    }

    /// Serialize to the JSON text placed in the `command` form field
    pub fn to_json(&self) -> DomoResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
