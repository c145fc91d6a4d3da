use reqwest::StatusCode;
use thiserror::Error;

// Every variant is absorbed at the client boundary and replaced with a
// fallback value; none of these cross the orchestrator API.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {detail}")]
    ApiRequestFailed { status: StatusCode, detail: String },

    #[error("completion contained no usable content")]
    EmptyCompletion,

    #[error("no image URL found in response content")]
    ParseFailure,
}
