//! Error types for chain data requests.
//!
//! This module defines the [`HttpError`] enum which covers every way a request
//! to the CometBFT RPC or the Cosmos REST endpoint can fail.

use thiserror::Error;

/// Errors that can occur while fetching chain data.
///
/// # Error Categories
///
/// - **Network errors**: [`RequestFailed`](HttpError::RequestFailed),
///   [`MiddlewareError`](HttpError::MiddlewareError)
/// - **Server errors**: [`ServerError`](HttpError::ServerError),
///   [`Rpc`](HttpError::Rpc)
/// - **Client errors**: [`UrlError`](HttpError::UrlError),
///   [`JsonError`](HttpError::JsonError)
///
/// # Example
///
/// ```rust,no_run
/// use zigscan::http::HttpError;
///
/// fn handle_error(err: HttpError) {
///     match err {
///         HttpError::ServerError { status, body } => {
///             eprintln!("Node returned {}: {}", status, body);
///         }
///         HttpError::Rpc { code, message } => {
///             eprintln!("RPC error {}: {}", code, message);
///         }
///         _ => eprintln!("Other error: {}", err),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// The HTTP request failed due to a network or connection error.
    ///
    /// This typically indicates connectivity issues such as a refused
    /// connection, a timeout or a DNS failure.
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// An error occurred in the HTTP middleware layer.
    ///
    /// The middleware handles retries. This error may indicate that all
    /// retry attempts have been exhausted.
    #[error("Middleware error: {0}")]
    MiddlewareError(#[from] reqwest_middleware::Error),

    /// The server returned a non-success HTTP status code.
    ///
    /// Contains both the HTTP status code and the response body for debugging.
    #[error("Server error {status}: {body}")]
    ServerError {
        /// The HTTP status code returned by the server.
        status: reqwest::StatusCode,
        /// The response body, which may contain error details.
        body: String,
    },

    /// The node answered with a JSON-RPC `error` object instead of a result.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code (e.g. `-32603` for internal errors).
        code: i64,
        /// Human readable message, with the node's `data` detail appended.
        message: String,
    },

    /// Failed to parse or construct a URL.
    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    /// Failed to decode JSON data.
    ///
    /// Usually a schema mismatch between this client and the node.
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}
