//! Errors that can occur when talking to the device.

use reqwest::{StatusCode, header::HeaderMap};
use thiserror::Error;

/// An error returned by the device client.
///
/// Every failure is surfaced to the immediate caller exactly once; the client
/// performs no retries and no fallback at any layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The host string could not be turned into a base URL.
    #[error("invalid device host {host:?}: {source}")]
    InvalidHost {
        /// The host string as supplied by the caller.
        host: String,
        /// The underlying URL parse failure.
        source: url::ParseError,
    },

    /// Could not reach the device (DNS failure, timeout, connection refused,
    /// cancellation, etc.)
    #[error(transparent)]
    Reqwest(reqwest::Error),

    /// A middleware failed outside of the HTTP exchange itself.
    #[error("middleware error: {0}")]
    Middleware(String),

    /// The response arrived but its body could not be fully read.
    #[error("failed to read body: {0}")]
    BodyRead(#[source] reqwest::Error),

    /// The device answered with a non-200 status.
    ///
    /// Carries the raw body and headers so callers can distinguish a
    /// device-side rejection (e.g. a bad CSRF token) from a protocol failure.
    #[error("failed with status {status}: {content}")]
    Response {
        /// HTTP status code of the response.
        status: StatusCode,
        /// Raw response body content.
        content: String,
        /// Response headers, for diagnostics.
        headers: HeaderMap,
    },

    /// The response body was not valid JSON for the expected record shape.
    #[error("JSON decoding failed: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        // Body and decode failures happen after the exchange succeeded, so
        // they classify as a body-read problem rather than a transport one.
        // This keeps classification identical whether the body was consumed
        // by the dispatch path or buffered earlier by the debug middleware.
        if e.is_body() || e.is_decode() {
            return ApiError::BodyRead(e);
        }

        ApiError::Reqwest(e)
    }
}

impl From<reqwest_middleware::Error> for ApiError {
    fn from(e: reqwest_middleware::Error) -> Self {
        match e {
            reqwest_middleware::Error::Reqwest(e) => e.into(),
            reqwest_middleware::Error::Middleware(e) => ApiError::Middleware(e.to_string()),
        }
    }
}
