//! Error types for hubscout.
//!
//! [`FetchError`] is the uniform failure value the result-fetch gateway
//! produces and the state machines carry. Every failure path in the core
//! resolves to one of these values; nothing is thrown across the state
//! machine boundary.
//!
//! Display strings for the user-facing variants are fixed: the search
//! surface shows them verbatim, and the dismiss action clears them.
//!
//! [`AppError`] is the binary-level error wrapping configuration, logging,
//! and fetch failures, composed via `From` so `?` propagates cleanly.

use thiserror::Error;

/// Failure modes of the result-fetch gateway.
///
/// Local validation failures (`EmptyQuery`, `EmptyLogin`) are produced
/// without any network attempt. The remaining variants map HTTP and
/// transport outcomes:
///
/// - 403 → [`FetchError::RateLimited`] on either endpoint
/// - 404 → [`FetchError::NotFound`], detail lookups only
/// - other non-2xx with a parsable error body → [`FetchError::Api`]
/// - other non-2xx → [`FetchError::Http`]
/// - no response at all → [`FetchError::Network`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Search query was empty after trimming. No request was made.
    #[error("Search query cannot be empty")]
    EmptyQuery,

    /// Login was empty after trimming. No request was made.
    #[error("Username cannot be empty")]
    EmptyLogin,

    /// The remote source rejected the request with HTTP 403.
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// The requested profile does not exist (HTTP 404 on the detail
    /// endpoint).
    #[error("User not found")]
    NotFound,

    /// Structured error message parsed from a non-2xx response body.
    #[error("{message}")]
    Api {
        /// Message field of the error body.
        message: String,
    },

    /// Non-2xx response whose body carried no parsable error message.
    #[error("HTTP error! status: {status}")]
    Http {
        /// The HTTP status code.
        status: u16,
    },

    /// Transport-level failure: no HTTP response was received.
    #[error("{message}")]
    Network {
        /// Description of the transport failure.
        message: String,
    },

    /// A failure that carried no message at all.
    #[error("An unknown error occurred")]
    Unknown,
}

/// Top-level application error for the binary.
///
/// All subsystem errors convert via `From`, so `main` can propagate with
/// `?` and print one coherent message on exit.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading or validation failed.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing subscriber initialization failed.
    #[error("Failed to initialize logging: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// A remote lookup failed.
    #[error("{0}")]
    Fetch(#[from] FetchError),
}
