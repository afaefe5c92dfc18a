//! HTTP response types and error mapping

use actix_web::{HttpResponse, http::StatusCode};
use serde::{Deserialize, Serialize};

use vitrine_common::{VitrineError, error};

/// Generic result wrapper for API responses
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResult<T> {
    pub code: i32,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResult<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            message: "success".to_string(),
            data,
        }
    }

    pub fn http_success(data: T) -> HttpResponse {
        HttpResponse::Ok().json(Self::success(data))
    }
}

/// Map an application error to its HTTP status and API error code.
///
/// Validation and conflict errors carry their message so the caller can
/// render form-level feedback; dependency errors surface a generic message
/// only.
pub fn error_response(err: &VitrineError) -> HttpResponse {
    let (status, code) = match err {
        VitrineError::Validation(_) => (StatusCode::BAD_REQUEST, error::PARAMETER_VALIDATE_ERROR),
        VitrineError::SlugTaken(_) => (StatusCode::CONFLICT, error::SLUG_TAKEN),
        VitrineError::TenantNotFound(_) => (StatusCode::NOT_FOUND, error::TENANT_NOT_FOUND),
        VitrineError::PortfolioNotFound(_) => (StatusCode::NOT_FOUND, error::PORTFOLIO_NOT_FOUND),
        VitrineError::AccountNotFound(_) => (StatusCode::NOT_FOUND, error::ACCOUNT_NOT_FOUND),
        VitrineError::Unauthenticated => (StatusCode::UNAUTHORIZED, error::UNAUTHENTICATED),
        VitrineError::Forbidden(_) => (StatusCode::FORBIDDEN, error::ACCESS_DENIED),
        VitrineError::Database(_) | VitrineError::Cache(_) | VitrineError::Internal(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, error::SERVER_ERROR)
        }
    };

    let message = if err.is_user_facing() {
        err.to_string()
    } else {
        tracing::error!(error = %err, "request failed");
        code.message.to_string()
    };

    HttpResponse::build(status).json(ApiResult {
        code: code.code,
        message,
        data: (),
    })
}
