use reqwest::StatusCode;
use thiserror::Error;

/// Failures of an outbound call to the provider.
///
/// Every variant is local to the request that triggered it; handlers map
/// any of them to a 502 with a diagnostic body.
#[derive(Debug, Error)]
pub enum PocketError {
    #[error("provider request failed")]
    Http(#[from] reqwest::Error),

    #[error("provider replied with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected provider response body: {0}")]
    MalformedBody(String),
}
