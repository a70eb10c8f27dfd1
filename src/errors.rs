use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error taxonomy for every core operation. Services return
/// `Result<_, ServiceError>` instead of panicking or throwing past their
/// boundary; handlers convert via `IntoResponse`.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// No resolved caller identity. No side effects are performed.
    #[error("Unauthorized")]
    Unauthorized,

    /// Caller is authenticated but lacks the required role.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Entity missing, or present but owned by a different tenant. The two
    /// cases are deliberately indistinguishable.
    #[error("{0} not found")]
    NotFound(String),

    /// A deployment or receipt would drive an item's quantity negative.
    #[error("Not enough quantity available")]
    InsufficientStock,

    /// Duplicate unique key on create (SKU, PO number).
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Underlying store failure (deadlock, timeout, connection loss). The
    /// whole operation rolled back; callers may retry it as a unit.
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::error::DbErr),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl ServiceError {
    /// Single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InsufficientStock => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message suitable for HTTP responses. Store failures return a generic
    /// message; the detail goes to the server log only.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Transaction failed".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let Self::DatabaseError(err) = &self {
            tracing::error!(error = %err, "database error while handling request");
        }
        let body = json!({
            "success": false,
            "error": self.response_message(),
        });
        (status, Json(body)).into_response()
    }
}

/// Maps a sea-orm transaction error back into the service taxonomy:
/// connection-level failures become `DatabaseError`, errors raised inside
/// the closure propagate unchanged.
pub fn from_transaction_error(err: sea_orm::TransactionError<ServiceError>) -> ServiceError {
    match err {
        sea_orm::TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
        sea_orm::TransactionError::Transaction(service_err) => service_err,
    }
}
