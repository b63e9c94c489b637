//! Response validation

use crate::error::{DomoError, DomoResult};
use serde_json::Value;

/// Acknowledgement reason carried by every response, 0 on success
pub const ACK_REASON_FIELD: &str = "sl_data_ack_reason";

/// Session identifier issued by a registration response
pub const CLIENT_ID_FIELD: &str = "sl_client_id";

/// Read the acknowledgement reason of a response
pub fn ack_reason(response: &Value) -> Option<i64> {
    response.get(ACK_REASON_FIELD).and_then(Value::as_i64)
}

/// Check a parsed response, returning it unchanged when acknowledged
///
/// A missing or non-integer acknowledgement is treated like a rejection.
pub fn validate_response(response: Value) -> DomoResult<Value> {
    match ack_reason(&response) {
        Some(0) => Ok(response),
        Some(code) => Err(DomoError::RequestError {
            reason: format!("controller acknowledged with reason {code}"),
            response: Some(response),
        }),
        None => Err(DomoError::RequestError {
            reason: format!("response has no {ACK_REASON_FIELD}"),
            response: Some(response),
        }),
    }
}

/// Session identifier from a registration response, if present and non-empty
pub fn client_id(response: &Value) -> Option<&str> {
    response
        .get(CLIENT_ID_FIELD)
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
}
