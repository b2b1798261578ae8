//! Errors surfaced by `TodoClient::parse_*`.
//!
//! 404 gets its own variant since callers routinely branch on "no such todo".
//! Any other unexpected status lands in `HttpError` with the raw body.

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered 404: no todo has the requested id.
    #[error("todo not found")]
    NotFound,

    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body was not the JSON shape the route promises.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}
