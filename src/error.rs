//! Error types for the store and the cache-store coordinator.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::time::Duration;
use thiserror::Error;

/// Failures reported by a [`crate::db::UrlStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store's primary key rejected the insert
    #[error("short key {0} already exists in the store")]
    Duplicate(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// The call did not complete within the configured bound
    #[error("store call timed out after {0:?}")]
    Timeout(Duration),
}

/// Outcome of a coordinator operation that did not succeed.
#[derive(Error, Debug)]
pub enum ShortenError {
    /// A required field was missing or empty
    #[error("{0}")]
    BadInput(String),

    #[error("shortkey {0} already exists.")]
    DuplicateKey(String),

    /// The key is absent from both the cache and the store
    #[error("Shortened key not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ShortenError {
    fn into_response(self) -> Response {
        let status = match &self {
            ShortenError::BadInput(_) | ShortenError::DuplicateKey(_) => StatusCode::BAD_REQUEST,
            ShortenError::NotFound(_) => StatusCode::NOT_FOUND,
            ShortenError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            ShortenError::Store(e) => {
                tracing::error!("Store failure: {:?}", e);
                "Internal error".to_owned()
            }
            other => other.to_string(),
        };

        (status, message).into_response()
    }
}
