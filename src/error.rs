//! Typed errors and their mapping onto the response-code vocabulary.

use crate::response::{ServiceResponse, ServiceResponseCode};
use thiserror::Error;

/// Message placed in `UnknownError` envelopes when redaction is on.
pub const REDACTED_MESSAGE: &str = "internal error";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing setting: {0}")]
    Missing(&'static str),
    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("duplicate model route: {0}")]
    DuplicateModel(String),
}

/// Failures of the named-field lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{type_name} has no field \"{field}\".")]
    NotFound { type_name: &'static str, field: String },
    #[error("{type_name}.{field} is null.")]
    MissingValue { type_name: &'static str, field: String },
    #[error("{type_name}.{field} is {found}, expected {expected}.")]
    TypeMismatch {
        type_name: &'static str,
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("no stored instance with id {0}")]
    Missing(i64),
    #[error("invalid database url: {0}")]
    InvalidDatabaseUrl(String),
    #[error("store backend: {0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn response_code(&self) -> ServiceResponseCode {
        match self {
            AppError::NotFound(_) => ServiceResponseCode::NotFound,
            AppError::Conflict(_) => ServiceResponseCode::AlreadyExists,
            AppError::Field(_) | AppError::Store(_) | AppError::BadRequest(_) => {
                ServiceResponseCode::UnknownError
            }
        }
    }

    /// Domain outcomes the caller asked about, as opposed to failures.
    pub fn is_expected(&self) -> bool {
        matches!(self, AppError::NotFound(_) | AppError::Conflict(_))
    }

    /// Expected outcomes carry no message; anything else carries the error text unless `redact` is set.
    pub fn into_envelope<T>(self, redact: bool) -> ServiceResponse<T> {
        let code = self.response_code();
        if self.is_expected() {
            ServiceResponse::from_code(code)
        } else if redact {
            ServiceResponse::failure(code, REDACTED_MESSAGE)
        } else {
            ServiceResponse::failure(code, self.to_string())
        }
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("http client: {0}")]
    Http(#[from] reqwest::Error),
    #[error("no response envelope in {status} reply: {reason}")]
    Decode { status: u16, reason: String },
}
