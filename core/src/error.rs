//! Error types for the products API client.
//!
//! # Design
//! `TransportError` is the single failure kind of the transport layer. Its
//! variants exist for logs only: callers treat a 404, a 500, a refused
//! connection and a malformed body identically, and the fetch controllers
//! replace all of them with a fixed per-operation message.

use thiserror::Error;

/// Any failure of one request/response round-trip.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a status outside 200..=299.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response (DNS, refused, reset, ...).
    #[error("network failure: {0}")]
    Network(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Encode(String),
}

/// Form validation failures, raised before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Price is required")]
    MissingPrice,

    #[error("Price must be a number, got {0:?}")]
    InvalidPrice(String),
}
