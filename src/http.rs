//! Shared HTTP response handling for both API clients.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Map a response status onto the error taxonomy.
///
/// Redirects count as not-found: Reddit answers unknown subreddit names
/// with a redirect to its search page instead of a 404, and the clients
/// here never follow redirects for any other reason.
pub fn classify_status(status: StatusCode, url: &str) -> Result<(), ApiError> {
    if status == StatusCode::NOT_FOUND || status.is_redirection() {
        return Err(ApiError::NotFound(url.to_string()));
    }

    if !status.is_success() {
        return Err(ApiError::Status {
            status,
            url: url.to_string(),
        });
    }

    Ok(())
}

/// Check the status of a response and decode its JSON body.
pub async fn read_json<T: DeserializeOwned>(response: Response, url: &str) -> Result<T, ApiError> {
    classify_status(response.status(), url)?;

    response.json::<T>().await.map_err(|e| {
        if e.is_decode() {
            ApiError::Malformed(format!("undecodable response body from {}", url))
        } else {
            ApiError::Network(e)
        }
    })
}
