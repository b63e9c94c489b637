//! reqwest-backed transport

use crate::transport::Transport;
use async_trait::async_trait;
use domo_core::{DomoError, DomoResult, FORM_FIELD};
use reqwest::{header, Client};
use serde_json::Value;
use std::time::Duration;
use tracing::trace;

/// Value of the `Connection` header sent with every command
pub const CONNECTION_KEEP_ALIVE: &str = "Keep-Alive";

/// HTTP transport talking to `http://<host>/domo/`
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport for an endpoint URL with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> DomoResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomoError::Transport {
                source: Box::new(e),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            timeout,
        })
    }

    fn map_error(&self, error: reqwest::Error) -> DomoError {
        if error.is_timeout() {
            DomoError::Timeout {
                after: self.timeout,
            }
        } else {
            DomoError::Transport {
                source: Box::new(error),
            }
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn probe(&self) -> DomoResult<u16> {
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;
        Ok(response.status().as_u16())
    }

    async fn post_command(&self, command: &str) -> DomoResult<Value> {
        // The envelope itself is not logged: registrations carry the password
        trace!(bytes = command.len(), "Posting command");

        // `form` sets Content-Type: application/x-www-form-urlencoded
        let response = self
            .client
            .post(&self.base_url)
            .header(header::CONNECTION, CONNECTION_KEEP_ALIVE)
            .form(&[(FORM_FIELD, command)])
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let raw_body = response.text().await.map_err(|e| self.map_error(e))?;
        trace!(body = %raw_body, "Received response");

        Ok(serde_json::from_str(&raw_body)?)
    }
}
