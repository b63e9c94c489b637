//! Stateful in-memory controller
//!
//! Behaves like the real device for the commands the tests exercise: it
//! issues a client id at registration, insists on a strictly increasing
//! `cseq` per session and applies light switches to its lights tree.

use super::fixtures::{lights_tree, CLIENT_ID, PASSWORD, USERNAME};
use async_trait::async_trait;
use domo_client::Transport;
use domo_core::DomoResult;
use serde_json::{json, Value};
use std::sync::Mutex;

/// Acknowledgement used when a request carries an unexpected cseq
pub const NACK_OUT_OF_SEQUENCE: i64 = 3;

/// Acknowledgement used when a switch targets an unknown act_id
pub const NACK_UNKNOWN_TARGET: i64 = 4;

/// Acknowledgement used when the client id is not recognised
pub const NACK_UNKNOWN_CLIENT: i64 = 7;

struct ControllerState {
    logged_in: bool,
    expected_cseq: u64,
    features: Vec<String>,
    lights: Value,
    requests: Vec<Value>,
}

pub struct FakeController {
    state: Mutex<ControllerState>,
}

impl FakeController {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ControllerState {
                logged_in: false,
                expected_cseq: 1,
                features: vec!["lights".to_string(), "relays".to_string()],
                lights: lights_tree(),
                requests: Vec::new(),
            }),
        }
    }

    /// Replace the categories reported by the feature list
    pub fn with_features(self, features: &[&str]) -> Self {
        self.state.lock().unwrap().features = features.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Every envelope received, in order
    pub fn requests(&self) -> Vec<Value> {
        self.state.lock().unwrap().requests.clone()
    }

    /// `cmd_name`s of the data requests received, in order
    pub fn command_names(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|r| r["sl_appl_msg"]["cmd_name"].as_str().map(String::from))
            .collect()
    }

    /// Current status of a light in the controller's own tree
    pub fn light_status(&self, act_id: u64) -> Option<i64> {
        let state = self.state.lock().unwrap();
        let status = find_light(&state.lights, act_id).and_then(|l| l["status"].as_i64());
        status
    }

    fn handle(state: &mut ControllerState, request: &Value) -> Value {
        match request["sl_cmd"].as_str() {
            Some("sl_registration_req") => {
                if request["sl_login"] == USERNAME && request["sl_pwd"] == PASSWORD {
                    state.logged_in = true;
                    json!({ "sl_data_ack_reason": 0, "sl_client_id": CLIENT_ID })
                } else {
                    json!({ "sl_data_ack_reason": 1, "sl_client_id": "" })
                }
            }
            Some("sl_keep_alive_req") => {
                let known = state.logged_in && request["sl_client_id"] == CLIENT_ID;
                let reason = if known { 0 } else { NACK_UNKNOWN_CLIENT };
                json!({ "sl_data_ack_reason": reason })
            }
            Some("sl_users_list_req") => json!({
                "sl_data_ack_reason": 0,
                "sl_users_list": [{ "name": USERNAME }, { "name": "admin" }]
            }),
            Some("sl_data_req") => Self::handle_data(state, request),
            _ => json!({ "sl_data_ack_reason": 2 }),
        }
    }

    fn handle_data(state: &mut ControllerState, request: &Value) -> Value {
        if !state.logged_in || request["sl_client_id"] != CLIENT_ID {
            return json!({ "sl_data_ack_reason": NACK_UNKNOWN_CLIENT });
        }

        let message = &request["sl_appl_msg"];
        if message["cseq"].as_u64() != Some(state.expected_cseq) {
            return json!({ "sl_data_ack_reason": NACK_OUT_OF_SEQUENCE });
        }

        let response = match message["cmd_name"].as_str() {
            Some("feature_list_req") => json!({ "sl_data_ack_reason": 0, "list": state.features }),
            Some("nested_light_list_req") => {
                json!({ "sl_data_ack_reason": 0, "array": state.lights })
            }
            Some("light_switch_req") => {
                let act_id = message["act_id"].as_u64().unwrap_or_default();
                let wanted = message["wanted_status"].clone();
                match find_light_mut(&mut state.lights, act_id) {
                    Some(light) => {
                        light["status"] = wanted;
                        json!({ "sl_data_ack_reason": 0 })
                    }
                    None => json!({ "sl_data_ack_reason": NACK_UNKNOWN_TARGET }),
                }
            }
            _ => json!({ "sl_data_ack_reason": 0, "array": [] }),
        };

        if response["sl_data_ack_reason"] == 0 {
            state.expected_cseq += 1;
        }
        response
    }
}

impl Default for FakeController {
    fn default() -> Self {
        Self::new()
    }
}

fn lights_of(tree: &Value) -> impl Iterator<Item = &Value> {
    tree.as_array()
        .into_iter()
        .flatten()
        .flat_map(|floor| floor["array"].as_array().into_iter().flatten())
        .flat_map(|room| room["array"].as_array().into_iter().flatten())
}

fn find_light(tree: &Value, act_id: u64) -> Option<&Value> {
    lights_of(tree).find(|light| light["act_id"].as_u64() == Some(act_id))
}

fn find_light_mut(tree: &mut Value, act_id: u64) -> Option<&mut Value> {
    tree.as_array_mut()?
        .iter_mut()
        .flat_map(|floor| floor["array"].as_array_mut().into_iter().flatten())
        .flat_map(|room| room["array"].as_array_mut().into_iter().flatten())
        .find(|light| light["act_id"].as_u64() == Some(act_id))
}

#[async_trait]
impl Transport for FakeController {
    async fn probe(&self) -> DomoResult<u16> {
        Ok(200)
    }

    async fn post_command(&self, command: &str) -> DomoResult<Value> {
        let request: Value = serde_json::from_str(command)?;
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());
        Ok(Self::handle(&mut state, &request))
    }
}
