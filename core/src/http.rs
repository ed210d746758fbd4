//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `UbersmithClient` builds an
//! `HttpRequest`, hands it to a `Transport`, and parses the returned
//! `HttpResponse`. Swapping the transport is how tests simulate the network
//! and how callers add timeouts or proxies the default transport lacks.
//!
//! A non-2xx status is still a successful exchange: the remote reports its
//! own failures inside the response envelope, so the body is always parsed.

use crate::error::TransportError;

/// HTTP method for a request. Every remote procedure is reached by `POST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
}

/// An HTTP request described as plain data.
///
/// Built by `UbersmithClient::build_call`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes one HTTP exchange.
///
/// Implementations must return `Err` only when no response body could be
/// obtained (bad URL, connection failure, TLS failure, body read failure).
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}
