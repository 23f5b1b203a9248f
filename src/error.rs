//! Error taxonomy shared by both API clients.
//!
//! `NotFound` is an outcome, not a failure: callers need to tell "no such
//! subreddit/employee" apart from "the network broke". A resource that
//! exists but yields zero results is not an error anywhere in this crate;
//! it is an `Ok` with an empty collection.

use thiserror::Error;

/// Errors surfaced by the JSONPlaceholder and Reddit clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested resource does not exist (a plain 404, or a Reddit
    /// redirect to the subreddit search page).
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The endpoint answered with a status this tool does not handle.
    #[error("unexpected HTTP status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// Connection, TLS, or timeout failure below the HTTP layer.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered, but the body did not decode into the
    /// expected shape.
    #[error("malformed response body: {0}")]
    Malformed(String),
}

impl ApiError {
    /// True only for the "resource absent" outcome, false for every
    /// failure mode.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}
