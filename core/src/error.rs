//! Error types for the holiday planner client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the record does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `HttpError` with the raw
//! status code and body for debugging. Failures below HTTP (connection
//! refused, timeout) land in `Transport`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by `PlannerClient` parse methods, transports and the store.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the requested record does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// Misuse of the form controller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown form field '{0}'")]
    UnknownField(String),

    #[error("participant index {index} out of range (have {len})")]
    ParticipantOutOfRange { index: usize, len: usize },

    #[error("a planner needs at least one participant slot")]
    LastParticipant,

    #[error("form is not open")]
    NotOpen,
}

/// Failures writing the preference file. Reads never fail; they fall back to
/// the caller's default.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference file error at '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("preference file at '{path}' is not a JSON object; refusing to overwrite it: {source}")]
    Unreadable {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("could not encode preference '{key}': {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },

    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
}

pub type Result<T, E = ApiError> = std::result::Result<T, E>;
