//! Transport seam between the session and the network

use async_trait::async_trait;
use domo_core::DomoResult;
use serde_json::Value;

/// Carries envelopes to the controller and brings back parsed responses
///
/// Implementations must not validate acknowledgement codes; the session
/// does that so every transport gets identical protocol semantics.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Probe the endpoint with a plain GET and return the HTTP status code
    async fn probe(&self) -> DomoResult<u16>;

    /// Submit `command` (the serialized envelope) and return the JSON body
    async fn post_command(&self, command: &str) -> DomoResult<Value>;
}
