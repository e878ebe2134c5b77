//! Unified error types for the client core.
//!
//! The taxonomy mirrors what the presentation layer is allowed to see:
//! authentication failures collapse into one generic message, registration
//! failures carry the backend detail verbatim, and infrastructure errors
//! keep their source for logging.

use thiserror::Error;

/// All errors produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or unparseable configuration (environment overrides).
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong with the configuration value
        message: String,
    },

    /// Sign-in failed. The message is generic and user-displayable; the
    /// underlying cause (bad credentials, network, malformed payload) is
    /// logged but never surfaced.
    #[error("{message}")]
    Auth {
        /// Generic user-displayable failure message
        message: String,
    },

    /// Registration failed. Unlike sign-in, the backend detail is
    /// actionable ("email already in use") and is surfaced verbatim.
    #[error("{message}")]
    Registration {
        /// Backend-provided, user-displayable error detail
        message: String,
    },

    /// The backend answered with a non-2xx status.
    #[error("API error: status={status} body={body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body, useful for logs and registration messages
        body: String,
    },

    /// A dashboard fetch was attempted before the persisted session was
    /// restored; the session state is still unresolved.
    #[error("session state is still unresolved, restore it before fetching")]
    SessionUnresolved,

    /// Credential store error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// HTTP transport error (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization error.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
