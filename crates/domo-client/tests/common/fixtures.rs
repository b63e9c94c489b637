//! Canned controller payloads

use serde_json::{json, Value};

pub const CLIENT_ID: &str = "c0ffee42";
pub const USERNAME: &str = "utente2";
pub const PASSWORD: &str = "utente2";

/// Successful registration response
pub fn login_ok() -> Value {
    json!({ "sl_data_ack_reason": 0, "sl_client_id": CLIENT_ID })
}

/// Acknowledged response with an empty list payload
pub fn ack_empty() -> Value {
    json!({ "sl_data_ack_reason": 0, "array": [] })
}

pub fn nack(reason: i64) -> Value {
    json!({ "sl_data_ack_reason": reason })
}

/// Lights tree with two floors; "Lamp" exists under both "Floor A" entries
pub fn lights_tree() -> Value {
    json!([
        {
            "name": "Floor A",
            "status": 0,
            "array": [
                {
                    "name": "Room B",
                    "status": 0,
                    "array": [
                        { "act_id": 33, "name": "Lamp", "floor_ind": 0, "room_ind": 0,
                          "status": 0, "type": "STEP_STEP", "leaf": true },
                        { "act_id": 34, "name": "Spot", "floor_ind": 0, "room_ind": 0,
                          "status": 1, "type": "STEP_STEP", "leaf": true }
                    ]
                }
            ]
        },
        {
            "name": "Floor A",
            "status": 0,
            "array": [
                {
                    "name": "Room B",
                    "status": 0,
                    "array": [
                        { "act_id": 99, "name": "Lamp", "floor_ind": 1, "room_ind": 0,
                          "status": 0, "type": "STEP_STEP", "leaf": true }
                    ]
                }
            ]
        }
    ])
}

/// Acknowledged lights-list response
pub fn lights_response() -> Value {
    json!({ "sl_data_ack_reason": 0, "array": lights_tree() })
}
