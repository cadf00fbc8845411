use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// A single failed schema constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product validation failed: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),

    #[error("{0}")]
    InvalidQuery(String),

    #[error("Product {0} not found")]
    NotFound(Uuid),

    #[error("No products found")]
    NoMatches,

    /// The store cannot address a document by this id
    #[error("Invalid product id '{raw}': {reason}")]
    InvalidId { raw: String, reason: String },

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        let message = err.to_string();
        match err {
            ProductError::Validation(_) => AppError::Validation(message),
            ProductError::InvalidQuery(_) => AppError::BadRequest(message),
            ProductError::NotFound(_) | ProductError::NoMatches => AppError::NotFound(message),
            ProductError::InvalidId { .. } => AppError::InternalServerError(message),
            ProductError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for ProductError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}
