//! Default blocking transport built on `ureq`.
//!
//! Certificate verification stays on unless the caller opts out with
//! `accept_invalid_certs`, for hosts that serve self-signed certificates.

use ureq::tls::TlsConfig;
use ureq::Agent;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

/// `Transport` backed by a shared `ureq::Agent`.
///
/// The agent pools connections internally; cloning the transport shares
/// the pool.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
    accept_invalid_certs: bool,
}

impl UreqTransport {
    pub fn new(accept_invalid_certs: bool) -> Self {
        // Statuses come back as data so remote failure envelopes are still read.
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .tls_config(
                TlsConfig::builder()
                    .disable_verification(accept_invalid_certs)
                    .build(),
            )
            .build()
            .new_agent();
        Self {
            agent,
            accept_invalid_certs,
        }
    }

    pub fn accepts_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match request.method {
            HttpMethod::Post => {
                let mut builder = self.agent.post(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| TransportError::new(e.to_string()))?;

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
            .read_to_string()
            .map_err(|e| TransportError::new(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
