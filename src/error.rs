use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Provider unreachable: {provider} - {reason}")]
    ProviderUnreachable { provider: String, reason: String },

    #[error("Provider returned malformed data: {provider} - {reason}")]
    ProviderMalformed { provider: String, reason: String },

    #[error("Provider has no matching stream format: {provider}")]
    ProviderNoFormat { provider: String },

    #[error("No provider could resolve stream: {0}")]
    StreamNotFound(String),

    #[error("Empty stream identifier")]
    EmptyStreamId,

    #[error("Failed to fetch manifest: {url} - {reason}")]
    FetchFailed { url: String, reason: String },

    #[error("Manifest fetch timeout: {0}")]
    FetchTimeout(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: String,
}

impl Error {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ProviderUnreachable { .. } => "PROVIDER_UNREACHABLE",
            Self::ProviderMalformed { .. } => "PROVIDER_MALFORMED",
            Self::ProviderNoFormat { .. } => "PROVIDER_NO_FORMAT",
            Self::StreamNotFound(_) => "STREAM_NOT_FOUND",
            Self::EmptyStreamId => "EMPTY_STREAM_ID",
            Self::FetchFailed { .. } => "FETCH_FAILED",
            Self::FetchTimeout(_) => "FETCH_TIMEOUT",
            Self::InvalidUrl(_) => "INVALID_URL",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            // Per-provider failures are folded inside the resolver and only
            // reach a response if surfaced directly.
            Self::ProviderUnreachable { .. }
            | Self::ProviderMalformed { .. }
            | Self::ProviderNoFormat { .. } => StatusCode::BAD_GATEWAY,
            Self::StreamNotFound(_) => StatusCode::NOT_FOUND,
            Self::EmptyStreamId | Self::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            Self::FetchFailed { .. } | Self::FetchTimeout(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.error_code().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidUrl(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::FetchTimeout(e.url().map(|u| u.to_string()).unwrap_or_default())
        } else {
            Self::FetchFailed {
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
                reason: e.to_string(),
            }
        }
    }
}
