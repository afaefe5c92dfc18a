//! Error types and error codes for Vitrine
//!
//! This module defines:
//! - `VitrineError`: Application-specific error enum
//! - `ErrorCode`: Structured error codes for API responses

use serde::{Deserialize, Serialize};

/// Application-specific error types
#[derive(thiserror::Error, Debug)]
pub enum VitrineError {
    #[error("{0}")]
    Validation(String),

    #[error("subdomain '{0}' is already taken")]
    SlugTaken(String),

    #[error("tenant '{0}' not found")]
    TenantNotFound(String),

    #[error("portfolio '{0}' not found")]
    PortfolioNotFound(i64),

    #[error("account '{0}' not found")]
    AccountNotFound(String),

    #[error("access denied: {0}")]
    Forbidden(String),

    #[error("authentication required")]
    Unauthenticated,

    #[error("database error: {0}")]
    Database(String),

    #[error("cache error: {0}")]
    Cache(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl VitrineError {
    /// Whether the error may be shown to the caller verbatim.
    ///
    /// Dependency failures carry internal detail (connection strings,
    /// SQL fragments) and are replaced by a generic message at the
    /// request boundary.
    pub fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            VitrineError::Database(_) | VitrineError::Cache(_) | VitrineError::Internal(_)
        )
    }
}

/// Error code structure for API responses
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ErrorCode<'a> {
    pub code: i32,
    pub message: &'a str,
}

// General success and error codes
pub const SUCCESS: ErrorCode<'static> = ErrorCode {
    code: 0,
    message: "success",
};

pub const PARAMETER_MISSING: ErrorCode<'static> = ErrorCode {
    code: 10000,
    message: "parameter missing",
};

pub const ACCESS_DENIED: ErrorCode<'static> = ErrorCode {
    code: 10001,
    message: "access denied",
};

pub const UNAUTHENTICATED: ErrorCode<'static> = ErrorCode {
    code: 10002,
    message: "authentication required",
};

pub const PARAMETER_VALIDATE_ERROR: ErrorCode<'static> = ErrorCode {
    code: 20002,
    message: "parameter validate error",
};

pub const SLUG_INVALID: ErrorCode<'static> = ErrorCode {
    code: 20010,
    message: "invalid subdomain",
};

pub const SLUG_TAKEN: ErrorCode<'static> = ErrorCode {
    code: 20011,
    message: "subdomain already taken",
};

pub const ICON_INVALID: ErrorCode<'static> = ErrorCode {
    code: 20012,
    message: "invalid icon",
};

pub const TENANT_NOT_FOUND: ErrorCode<'static> = ErrorCode {
    code: 21000,
    message: "tenant not found",
};

pub const PORTFOLIO_NOT_FOUND: ErrorCode<'static> = ErrorCode {
    code: 21001,
    message: "portfolio not found",
};

pub const ACCOUNT_NOT_FOUND: ErrorCode<'static> = ErrorCode {
    code: 21002,
    message: "account not found",
};

pub const SERVER_ERROR: ErrorCode<'static> = ErrorCode {
    code: 30000,
    message: "server error",
};
