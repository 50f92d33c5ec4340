//! Error types for the Overlay API client.
//!
//! # Design
//! Each variant corresponds to exactly one stage of the request pipeline, so
//! a failed call can be attributed to encoding, the network, reading the
//! body, decoding the envelope, or the server rejecting the call. Only
//! `HttpError` carries a server-provided message.

use thiserror::Error;

/// Errors returned by `OverlayClient` and its resource groups.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request parameters could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response (DNS, refused connection, timeout).
    #[error("transport failed: {0}")]
    TransportError(String),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    IoError(String),

    /// The response body is not a valid JSON envelope.
    #[error("failed to decode response: {message}, body: {body}")]
    DecodeError { message: String, body: String },

    /// The server answered with a status code of 400 or above.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },
}

impl ApiError {
    /// The HTTP status code, for errors that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
