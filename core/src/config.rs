//! Client construction parameters.

use serde::Deserialize;

/// Immutable configuration for `UbersmithClient`.
///
/// Deserializable so callers can keep it in whatever config format they
/// already use; `debug` and `accept_invalid_certs` default to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Base endpoint URL, e.g. `https://billing.example.com/api/2.0/`.
    /// Used verbatim: the method query is appended directly.
    pub host: String,
    pub user: String,
    /// API token, sent as the basic-auth password.
    pub token: String,
    /// Emit request and response bodies to the debug sink.
    #[serde(default)]
    pub debug: bool,
    /// Skip TLS certificate verification on the default transport.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, user: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            token: token.into(),
            debug: false,
            accept_invalid_certs: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}
