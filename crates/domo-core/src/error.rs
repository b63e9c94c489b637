//! Error types for the Eti/Domo protocol layer

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Result type for protocol operations
pub type DomoResult<T> = Result<T, DomoError>;

/// Errors that can occur while talking to an Eti/Domo controller
#[derive(Debug, Error)]
pub enum DomoError {
    /// The reachability probe failed, no session was created
    #[error("server {host} is not available: {reason}")]
    ServerUnavailable { host: String, reason: String },

    /// The controller rejected the credentials
    #[error("login rejected for user '{username}'")]
    UnauthorizedLogin { username: String },

    /// Symbolic command name is not part of the catalog
    #[error("command '{name}' not found in catalog")]
    CommandNotFound { name: String },

    /// The controller answered with a non-zero acknowledgement, or the
    /// request was refused locally before it was sent
    #[error("request error: {reason}")]
    RequestError {
        reason: String,
        /// Raw response, when the controller produced one
        response: Option<Value>,
    },

    /// No light matches the floor/room/light path
    #[error("light '{light}' not found in room '{room}' on floor '{floor}'")]
    LightNotFound {
        floor: String,
        room: String,
        light: String,
    },

    /// A command was issued before a successful login
    #[error("session is not authenticated")]
    NotAuthenticated,

    /// The request did not complete within the configured timeout
    #[error("request timed out after {after:?}")]
    Timeout { after: Duration },

    /// The transport failed before a response was received
    #[error("transport error: {source}")]
    Transport {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A body could not be encoded or decoded as JSON of the expected shape
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl DomoError {
    /// Build a request error with no associated response
    pub fn rejected(reason: impl Into<String>) -> Self {
        DomoError::RequestError {
            reason: reason.into(),
            response: None,
        }
    }

    /// Whether the error is a protocol-level rejection rather than a
    /// transport or local failure
    pub fn is_request_error(&self) -> bool {
        matches!(self, DomoError::RequestError { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_has_no_response() {
        let err = DomoError::rejected("mode out of range");
        assert!(err.is_request_error());
        match err {
            DomoError::RequestError { reason, response } => {
                assert_eq!(reason, "mode out of range");
                assert!(response.is_none());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_display_messages() {
        let err = DomoError::LightNotFound {
            floor: "Piano terra".to_string(),
            room: "Cucina".to_string(),
            light: "Lampadario".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "light 'Lampadario' not found in room 'Cucina' on floor 'Piano terra'"
        );

        let err = DomoError::CommandNotFound {
            name: "sauna".to_string(),
        };
        assert_eq!(err.to_string(), "command 'sauna' not found in catalog");
    }
}
