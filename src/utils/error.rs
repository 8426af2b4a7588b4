use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

/// Failures reported by a `UserStore` implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    /// A table constraint rejected the write (e.g. duplicate email).
    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors surfaced by the HTTP handlers.
///
/// Each variant maps to one status code. The response body is the
/// `Display` text as plain text, so driver details never reach the client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input")]
    MalformedInput(#[from] serde_json::Error),

    #[error("User not found")]
    NotFound,

    #[error("{message}")]
    Store {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// Builds a mapper that turns a store failure into an `AppError`,
    /// keeping `NotFound` distinct and tagging everything else with `message`.
    pub fn from_store(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |err| match err {
            StoreError::NotFound => AppError::NotFound,
            source => {
                log::error!("❌ {}: {}", message, source);
                AppError::Store { message, source }
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}
