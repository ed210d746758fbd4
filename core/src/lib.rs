//! Synchronous client core for the Ubersmith API.
//!
//! # Overview
//! Every Ubersmith method is a `POST` to one endpoint, selected by the
//! `method` query parameter, answered with the same JSON envelope:
//! `{"status", "error_code", "error_message", "data"}`. `UbersmithClient`
//! performs the call and returns an `Envelope`; the envelope's navigator
//! reads the method-specific `data` payload by dotted path or decodes it
//! into a caller-supplied type.
//!
//! # Design
//! - `UbersmithClient` holds only immutable configuration, so it can be shared
//!   across threads.
//! - The HTTP round-trip goes through the `Transport` trait. `UreqTransport`
//!   is the default; tests and callers needing timeouts supply their own.
//! - `call` never fails: local failures become an envelope carrying
//!   `TRANSPORT_ERROR_CODE`. `try_call` exposes them as `ApiError`.
//! - Debug output goes to an injected `DebugSink`, never to a global logger
//!   the crate installs itself.

pub mod client;
pub mod config;
pub mod debug;
pub mod error;
pub mod http;
pub mod navigator;
pub mod transport;
pub mod types;

pub use client::UbersmithClient;
pub use config::ClientConfig;
pub use debug::{DebugSink, LogSink};
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use navigator::lookup;
pub use transport::UreqTransport;
pub use types::{Envelope, Params, TRANSPORT_ERROR_CODE};
