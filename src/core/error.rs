//! # Core Error Module
//!
//! Defines `HcError`, the single error type returned by every fallible call in
//! the crate. Variants mirror the failure kinds of the HotelsCombined API:
//! authentication problems, rejected queries, transport failures and broken
//! configuration.

use serde::Serialize;
use thiserror::Error;

/// Messages for the HTTP statuses the service documents as failures.
///
/// Statuses missing from this table are treated as success by the dispatcher.
pub const STATUS_MESSAGES: [(u16, &str); 5] = [
    (400, "The query is not valid (e.g. check-in after check-out.)"),
    (401, "The API key is invalid or the User Agent is empty."),
    (403, "The user is banned."),
    (
        404,
        "The requested place is not searchable or unknown to the system, \
         or the request path is not recognized as part of the API.",
    ),
    (500, "Any other error."),
];

/// Looks up the documented failure message for `status`.
pub fn status_message(status: u16) -> Option<&'static str> {
    STATUS_MESSAGES
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, msg)| *msg)
}

/// Central error type for the `hotelscombined` client.
#[derive(Debug, Error, Serialize)]
pub enum HcError {
    /// Missing API key at dispatch time, or the service answered 401.
    #[error("Authentication error: {message}")]
    AuthError {
        message: String,
        /// Raw response body, when the service sent one.
        errors: Option<String>,
        /// HTTP status; `None` when no request was made.
        status: Option<u16>,
    },

    /// The service rejected the query (400, 403, 404, 500) or answered with
    /// a body that is not JSON.
    #[error("Query error: {message}")]
    QueryError {
        message: String,
        errors: Option<String>,
        status: Option<u16>,
    },

    /// Network level failure reported by the transport.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Configuration could not be loaded or holds an unusable value.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl HcError {
    /// Builds the error for a status listed in [`STATUS_MESSAGES`].
    ///
    /// 401 maps to [`HcError::AuthError`], everything else to
    /// [`HcError::QueryError`]. Returns `None` for unlisted statuses.
    pub fn from_status(status: u16, body: &str) -> Option<Self> {
        let message = status_message(status)?.to_string();
        let errors = if body.is_empty() {
            None
        } else {
            Some(body.to_string())
        };
        let err = if status == 401 {
            HcError::AuthError {
                message,
                errors,
                status: Some(status),
            }
        } else {
            HcError::QueryError {
                message,
                errors,
                status: Some(status),
            }
        };
        Some(err)
    }

    /// HTTP status attached to the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            HcError::AuthError { status, .. } | HcError::QueryError { status, .. } => *status,
            _ => None,
        }
    }

    /// Raw response body attached to the error, if any.
    pub fn errors(&self) -> Option<&str> {
        match self {
            HcError::AuthError { errors, .. } | HcError::QueryError { errors, .. } => {
                errors.as_deref()
            }
            _ => None,
        }
    }
}
