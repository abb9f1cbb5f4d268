//! Error types for the user client.
//!
//! # Design
//! Every failure reaches the caller as a distinct variant so it can branch on
//! the kind. Local precondition failures (`MissingField`, `NotImplemented`)
//! are raised before any I/O. A 404 for an identified record gets its own
//! `NotFound` variant; every other unexpected status lands in `HttpError`
//! with the raw status code and body.

use thiserror::Error;

/// Errors returned by `UserApi` and `UserClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A field required by the operation is unset on the local `User`.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The server answered 404 for the given user id. `body` is the raw
    /// response body.
    #[error("user {user_id} not found: {body}")]
    NotFound { user_id: String, body: String },

    /// The server returned a status the operation does not accept.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// Success status, but the body does not honor the server contract.
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    /// The operation is declared but not supported by this client.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            ApiError::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

/// An environment override that could not be applied to `ClientConfig`.
#[derive(Debug, Error)]
#[error("invalid value {value:?} for {variable}: {reason}")]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
    pub reason: String,
}
