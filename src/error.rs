//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! It centralizes error management, providing a consistent way to handle and represent
//! everything that can go wrong while serving a request, from a duplicate email to a
//! failing upstream creature catalog.
//!
//! `AppError` implements `actix_web::error::ResponseError` to convert application errors
//! into HTTP responses with a `{"message": ...}` JSON body. Server-side failures are logged
//! and reported to the client with a generic message so no internal detail leaks out.
//! `From` implementations for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error`, and `bcrypt::BcryptError` allow use of the `?` operator.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Message returned to clients for every unexpected server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Message returned to clients when the creature catalog fails for a reason other than 404.
pub const UPSTREAM_ERROR_MESSAGE: &str = "An error occurred while fetching the creature data";

/// Represents all possible errors that can occur within the application.
///
/// Each variant maps to one HTTP status. Variants carrying client-facing text
/// (`Unauthorized`, `BadRequest`, `NotFound`, `Conflict`, `ValidationError`) return that text;
/// the server-side variants carry detail that is only logged.
#[derive(Debug)]
pub enum AppError {
    /// Bad credentials or a missing, malformed, or expired bearer token (HTTP 401).
    Unauthorized(String),
    /// A malformed request or a missing required field (HTTP 400).
    BadRequest(String),
    /// A user, caught record, or upstream creature that does not exist (HTTP 404).
    NotFound(String),
    /// A unique constraint was hit, e.g. registering an email twice (HTTP 409).
    Conflict(String),
    /// Field-level constraint failures reported by `validator` (HTTP 422).
    ValidationError(String),
    /// The creature catalog failed with something other than a 404 (HTTP 500).
    UpstreamError(String),
    /// An unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// An error originating from database operations (HTTP 500).
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::UpstreamError(msg) => write!(f, "Upstream Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UpstreamError(_)
            | AppError::InternalServerError(_)
            | AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::ValidationError(msg) => msg.as_str(),
            AppError::UpstreamError(_) => {
                log::error!("{}", self);
                UPSTREAM_ERROR_MESSAGE
            }
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                log::error!("{}", self);
                INTERNAL_ERROR_MESSAGE
            }
        };

        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` becomes `NotFound`; everything else is a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid token: {}", error))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
