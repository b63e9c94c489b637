//! Transport that replays canned responses and records every request

use async_trait::async_trait;
use domo_client::Transport;
use domo_core::{DomoError, DomoResult};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays queued responses in order
pub struct ScriptedTransport {
    probe_status: u16,
    responses: Mutex<VecDeque<DomoResult<Value>>>,
    posted: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    /// A transport whose probe answers 200
    pub fn new() -> Self {
        Self::with_probe_status(200)
    }

    pub fn with_probe_status(status: u16) -> Self {
        Self {
            probe_status: status,
            responses: Mutex::new(VecDeque::new()),
            posted: Mutex::new(Vec::new()),
        }
    }

    /// Queue a response body
    pub fn push_response(&self, response: Value) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue a transport-level failure
    pub fn push_error(&self, error: DomoError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Raw `command` field values in the order they were posted
    pub fn posted_raw(&self) -> Vec<String> {
        self.posted.lock().unwrap().clone()
    }

    /// Posted envelopes parsed back into JSON
    pub fn posted(&self) -> Vec<Value> {
        self.posted_raw()
            .iter()
            .map(|raw| serde_json::from_str(raw).expect("posted command is not JSON"))
            .collect()
    }

    pub fn post_count(&self) -> usize {
        self.posted.lock().unwrap().len()
    }

    /// Last posted envelope
    pub fn last_posted(&self) -> Value {
        self.posted().pop().expect("nothing was posted")
    }
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn probe(&self) -> DomoResult<u16> {
        Ok(self.probe_status)
    }

    async fn post_command(&self, command: &str) -> DomoResult<Value> {
        self.posted.lock().unwrap().push(command.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response for {command}"))
    }
}

/// Transport whose probe fails at the network level
pub struct UnreachableTransport;

#[async_trait]
impl Transport for UnreachableTransport {
    async fn probe(&self) -> DomoResult<u16> {
        Err(DomoError::Transport {
            source: "connection refused".into(),
        })
    }

    async fn post_command(&self, _command: &str) -> DomoResult<Value> {
        panic!("unreachable transport must not receive commands")
    }
}
