//! Error types for the Ubersmith API client.
//!
//! # Design
//! `UbersmithClient::call` never returns these: it folds them into an
//! `Envelope`. They surface from the strict entry points (`try_call`,
//! `build_call`, `parse_call`) and from typed payload decoding.

use thiserror::Error;

/// A failure to obtain a response body from the transport.
///
/// Carries the underlying error's text, which becomes the envelope's
/// `error_message` when folded by `call`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors returned by the client and the envelope navigator.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The remote method name was empty.
    #[error("method name must not be empty")]
    EmptyMethod,

    /// The request parameters could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The response body was not a well-formed envelope.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The HTTP exchange itself failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The envelope has no `data` payload to decode.
    #[error("response carries no data payload")]
    MissingData,

    /// The payload's shape does not fit the requested type.
    #[error("payload decode failed: {0}")]
    Decode(#[source] serde_json::Error),
}
