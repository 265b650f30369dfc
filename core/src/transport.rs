//! Blocking transport backed by `ureq`.
//!
//! Each connection gets its own agent, so closing it drops any pooled
//! socket. HTTP status codes are returned as data, never as errors: the body
//! is always handed to the decoder.

use tracing::debug;

use crate::error::ApiError;
use crate::http::{Connection, HttpRequest, HttpResponse, Transport};

#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl UreqTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for UreqTransport {
    type Conn = UreqConnection;

    fn connect(&self, host: &str, secure: bool) -> Result<Self::Conn, ApiError> {
        if host.is_empty() {
            return Err(ApiError::Connection("empty host name".to_string()));
        }
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        let scheme = if secure { "https" } else { "http" };
        Ok(UreqConnection {
            agent: Some(agent),
            base_url: format!("{scheme}://{host}"),
        })
    }
}

/// A connection to one host. `agent` is `None` once closed.
pub struct UreqConnection {
    agent: Option<ureq::Agent>,
    base_url: String,
}

impl Connection for UreqConnection {
    fn send(&mut self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = self
            .agent
            .as_ref()
            .ok_or_else(|| ApiError::Connection("connection already closed".to_string()))?;

        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = agent.get(&url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let mut response = builder
            .call()
            .map_err(|e| ApiError::Connection(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| ApiError::Connection(e.to_string()))?;

        debug!(%url, status, bytes = body.len(), "received response");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    fn close(&mut self) {
        if self.agent.take().is_some() {
            debug!(base_url = %self.base_url, "closed connection");
        }
    }
}
