//! Unified error handling for the web routes.
//!
//! Handlers return `Result<T, AppError>`. Validation failures and unreadable
//! bodies become a 400 with a plain-text reason; store failures become a 500 with a generic,
//! per-call message and the details go to the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crm_core::ValidationError;

use crate::db::StoreError;

/// Application-level error type for the web routes.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required field was missing from the request.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request body could not be decoded as customer data.
    #[error("Unreadable request body: {0}")]
    UnreadableBody(String),

    /// The store could not complete the operation.
    #[error("{message} ({source})")]
    Store {
        /// Client-facing text, e.g. "An error occurred while fetching customers."
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// Build a `map_err` adapter that pairs a store failure with the text the
    /// client sees.
    ///
    /// ```rust,ignore
    /// state
    ///     .store()
    ///     .list()
    ///     .await
    ///     .map_err(AppError::store("An error occurred while fetching customers."))?;
    /// ```
    pub fn store(message: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { message, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
            Self::UnreadableBody(_) => (
                StatusCode::BAD_REQUEST,
                "Unable to read customer data from the request body.",
            )
                .into_response(),
            Self::Store { message, source } => {
                tracing::error!(error = %source, reply = message, "Request error");

                // Don't expose store details to clients
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
