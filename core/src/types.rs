//! Wire types for the Ubersmith API.
//!
//! # Design
//! Every method answers with the same envelope; only the `data` payload
//! varies. The payload is kept as raw JSON text and decoded on demand by the
//! navigator (see `navigator.rs`), so no method needs a predefined schema.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;

/// Error code used for envelopes synthesized locally after a build or
/// transport failure. Remote-reported failures carry the remote's own code.
pub const TRANSPORT_ERROR_CODE: i64 = 500;

/// Parameters for one remote method call, sent as a JSON object body.
pub type Params = HashMap<String, serde_json::Value>;

/// The normalized result of one remote call.
///
/// Produced either by parsing the remote's response body or, when the
/// exchange itself failed, by `Envelope::transport_failure`. Both arrive as
/// the same type; the sentinel code and `is_transport_failure` tell them
/// apart.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Envelope {
    #[serde(deserialize_with = "null_as_default")]
    pub status: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub error_code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub error_message: String,
    /// Method-specific payload. `None` when the body had no `data` field or
    /// the envelope was synthesized locally. An explicit `null` is kept.
    #[serde(rename = "data", deserialize_with = "raw_keeping_null")]
    pub raw_data: Option<Box<RawValue>>,
}

/// A JSON `null` reads as the field's default, like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Capture any present value, `null` included, as raw text.
fn raw_keeping_null<'de, D>(deserializer: D) -> Result<Option<Box<RawValue>>, D::Error>
where
    D: Deserializer<'de>,
{
    Box::<RawValue>::deserialize(deserializer).map(Some)
}

impl Envelope {
    /// Build the envelope returned when no response body could be obtained.
    pub fn transport_failure(message: impl Into<String>) -> Self {
        Self {
            status: false,
            error_code: TRANSPORT_ERROR_CODE,
            error_message: message.into(),
            raw_data: None,
        }
    }

    /// True for envelopes built by `transport_failure`.
    pub fn is_transport_failure(&self) -> bool {
        !self.status && self.error_code == TRANSPORT_ERROR_CODE && self.raw_data.is_none()
    }

    /// The payload as JSON text, if any.
    pub fn raw_json(&self) -> Option<&str> {
        self.raw_data.as_deref().map(RawValue::get)
    }
}
