//! Dotted-path access and typed decoding over an envelope's payload.
//!
//! A path like `tags.1.tag` is split on `.`. The first segment is always a
//! field of the top-level object. Each later segment is a field name when the
//! current value is an object, or an index when it is an array. Lookup is
//! permissive:
//!
//! - a missing field or an out-of-range index yields no value;
//! - an index segment that is not a non-negative base-10 integer reads as `0`,
//!   but one too large for `usize` is out of range;
//! - any segment applied to a scalar or to no value yields no value.

use std::num::IntErrorKind;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::types::Envelope;

/// Walk `path` from `root`, returning the addressed value if it exists.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    // `split` always yields at least one segment, possibly empty.
    let first = segments.next().unwrap_or_default();
    let mut current = root.as_object()?.get(first)?;

    for segment in segments {
        current = match current {
            Value::Object(fields) => fields.get(segment)?,
            Value::Array(items) => items.get(parse_index(segment)?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Invalid digits coerce to index 0; `None` means past any array's end.
fn parse_index(segment: &str) -> Option<usize> {
    match segment.parse::<usize>() {
        Ok(index) => Some(index),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => None,
        Err(_) => Some(0),
    }
}

impl Envelope {
    /// Look up a dotted path in the payload.
    ///
    /// The payload is re-parsed on every call. Returns `Value::Null` when the
    /// path does not resolve, when the payload is absent or not an object,
    /// and when the addressed value is itself `null`.
    ///
    /// ```
    /// use ubersmith_core::Envelope;
    ///
    /// let env: Envelope = serde_json::from_str(
    ///     r#"{"status":true,"data":{"tags":[{"tag":"vip"},{"tag":"net"}]}}"#,
    /// ).unwrap();
    /// assert_eq!(env.key("tags.1.tag"), "net");
    /// assert!(env.key("tags.9.tag").is_null());
    /// ```
    pub fn key(&self, path: &str) -> Value {
        let Some(raw) = self.raw_json() else {
            return Value::Null;
        };
        let Ok(tree) = serde_json::from_str::<Value>(raw) else {
            return Value::Null;
        };
        lookup(&tree, path).cloned().unwrap_or(Value::Null)
    }

    /// Look up a dotted path and decode the result into `T`.
    ///
    /// An unresolved path decodes from `null`, so `Option<T>` targets read
    /// it as `None`.
    pub fn key_as<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        serde_json::from_value(self.key(path)).map_err(ApiError::Decode)
    }

    /// Decode the whole payload into `T`.
    ///
    /// A `null` payload is handed to `T` like any other value, so `Option<T>`
    /// reads it as `None`. `MissingData` means the body had no `data` key or
    /// the envelope was synthesized locally.
    ///
    /// Unknown payload fields are ignored. Fields missing from the payload
    /// need `#[serde(default)]` on `T` to fall back to their defaults.
    pub fn load<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let raw = self.raw_json().ok_or(ApiError::MissingData)?;
        serde_json::from_str(raw).map_err(ApiError::Decode)
    }
}
