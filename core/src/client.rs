//! Request builder, caller and envelope parser for the Ubersmith API.
//!
//! # Design
//! Every remote procedure is reached the same way: `POST <host>?method=<name>`
//! with the parameters as a JSON object body and basic auth. `build_call`
//! produces that request as plain data and `parse_call` turns a response
//! into an `Envelope`; `call` wires the two through the configured
//! `Transport` and folds every failure into the returned envelope.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::config::ClientConfig;
use crate::debug::{DebugSink, LogSink};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::transport::UreqTransport;
use crate::types::{Envelope, Params};

/// Synchronous client for the Ubersmith API.
///
/// Holds only immutable configuration, the transport and the debug sink, so a
/// shared reference can serve concurrent calls.
pub struct UbersmithClient<T: Transport = UreqTransport> {
    config: ClientConfig,
    transport: T,
    sink: Arc<dyn DebugSink>,
}

impl UbersmithClient<UreqTransport> {
    /// Create a client using the default `ureq` transport.
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.accept_invalid_certs);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> UbersmithClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            sink: Arc::new(LogSink),
        }
    }

    /// Replace the sink receiving debug output. Only used when
    /// `ClientConfig::debug` is set.
    pub fn with_debug_sink(mut self, sink: Arc<dyn DebugSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Call a remote method.
    ///
    /// Never fails: build and transport errors come back as an envelope with
    /// `status == false`, `error_code == TRANSPORT_ERROR_CODE` and the error
    /// text. A response body that is not a valid envelope yields
    /// `Envelope::default()`; use `try_call` to tell that case apart.
    ///
    /// ```no_run
    /// use ubersmith_core::{ClientConfig, Params, UbersmithClient};
    ///
    /// let api = UbersmithClient::new(ClientConfig::new(
    ///     "https://billing.example.com/api/2.0/",
    ///     "admin",
    ///     "token",
    /// ));
    /// let mut params = Params::new();
    /// params.insert("client_id".into(), "1000".into());
    /// let env = api.call("client.get", &params);
    /// let first_tag = env.key("tags.0.tag");
    /// ```
    pub fn call(&self, method: &str, params: &Params) -> Envelope {
        match self.try_call(method, params) {
            Ok(envelope) => envelope,
            Err(ApiError::DeserializationError(_)) => Envelope::default(),
            Err(e) => Envelope::transport_failure(e.to_string()),
        }
    }

    /// Call a remote method, surfacing every local failure as an error.
    ///
    /// A remote-reported failure is still `Ok`, with `status == false`.
    pub fn try_call(&self, method: &str, params: &Params) -> Result<Envelope, ApiError> {
        let request = self.build_call(method, params)?;
        if self.config.debug {
            self.sink.record(&format!("[API REQUEST]: {}", request.url));
            self.sink.record(&format!(
                "[API REQUEST DATA]: {}",
                request.body.as_deref().unwrap_or_default()
            ));
        }

        let response = self.transport.execute(request)?;
        if self.config.debug {
            self.sink.record(&format!("[API RESPONSE]: {}", response.body));
        }

        self.parse_call(response)
    }

    pub fn build_call(&self, method: &str, params: &Params) -> Result<HttpRequest, ApiError> {
        if method.is_empty() {
            return Err(ApiError::EmptyMethod);
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("method", method)
            .finish();
        let body =
            serde_json::to_string(params).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}?{query}", self.config.host),
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                ("authorization".to_string(), self.basic_auth()),
            ],
            body: Some(body),
        })
    }

    /// Parse a response body as an envelope, whatever the HTTP status.
    pub fn parse_call(&self, response: HttpResponse) -> Result<Envelope, ApiError> {
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    fn basic_auth(&self) -> String {
        let credentials = format!("{}:{}", self.config.user, self.config.token);
        format!("Basic {}", STANDARD.encode(credentials))
    }
}

impl<T: Transport + std::fmt::Debug> std::fmt::Debug for UbersmithClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UbersmithClient")
            .field("host", &self.config.host)
            .field("user", &self.config.user)
            .field("debug", &self.config.debug)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}
