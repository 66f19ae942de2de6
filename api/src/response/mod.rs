//! Response envelope shared by every endpoint, and the mapping from
//! [`ServiceError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use services::ServiceError;
use util::config::AppConfig;

/// Wrapper for all outgoing JSON:
///
/// ```json
/// {
///   "success": true,
///   "data": { "id": 1, "title": "Printer down" },
///   "message": "Ticket retrieved successfully"
/// }
/// ```
///
/// Failures carry `"success": false`, `null` (or the type's default) as
/// `data`, and a human-readable `message`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Error envelope. `T` must implement `Default` since the payload is empty.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}

/// Handler-facing error. Anything a service returns converts into it with `?`.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Storage(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError(ServiceError::Internal(msg.into()))
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError(err)
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        ApiError(ServiceError::Storage(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut message = self.0.to_string();

        if status.is_server_error() {
            tracing::error!(error = %message, "Request failed");
            if AppConfig::global().is_production() {
                message = "Internal server error".into();
            }
        }

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

/// `Ok` side of most handlers: a status plus the success envelope.
pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

pub fn ok<T: Serialize>(data: T, message: &str) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(data, message))))
}

pub fn created<T: Serialize>(data: T, message: &str) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data, message))))
}
