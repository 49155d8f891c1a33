// SPDX-License-Identifier: Apache-2.0

use formflow_core::ErrorCode;
use formflow_model::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApiErrorCode {
    ValidationFailed,
    MissingField,
    InvalidQueryParameter,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    AlreadySubmitted,
    UpstreamUnavailable,
    Internal,
}

pub const API_ERROR_CODES: [ApiErrorCode; 10] = [
    ApiErrorCode::ValidationFailed,
    ApiErrorCode::MissingField,
    ApiErrorCode::InvalidQueryParameter,
    ApiErrorCode::Unauthorized,
    ApiErrorCode::Forbidden,
    ApiErrorCode::NotFound,
    ApiErrorCode::Conflict,
    ApiErrorCode::AlreadySubmitted,
    ApiErrorCode::UpstreamUnavailable,
    ApiErrorCode::Internal,
];

impl ApiErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationFailed => "ValidationFailed",
            Self::MissingField => "MissingField",
            Self::InvalidQueryParameter => "InvalidQueryParameter",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "NotFound",
            Self::Conflict => "Conflict",
            Self::AlreadySubmitted => "AlreadySubmitted",
            Self::UpstreamUnavailable => "UpstreamUnavailable",
            Self::Internal => "Internal",
        }
    }

    #[must_use]
    pub const fn machine(self) -> ErrorCode {
        match self {
            Self::ValidationFailed => ErrorCode::ValidationFailed,
            Self::MissingField => ErrorCode::MissingField,
            Self::InvalidQueryParameter => ErrorCode::InvalidQueryParameter,
            Self::Unauthorized => ErrorCode::Unauthorized,
            Self::Forbidden => ErrorCode::Forbidden,
            Self::NotFound => ErrorCode::NotFound,
            Self::Conflict => ErrorCode::Conflict,
            Self::AlreadySubmitted => ErrorCode::AlreadySubmitted,
            Self::UpstreamUnavailable => ErrorCode::UpstreamUnavailable,
            Self::Internal => ErrorCode::Internal,
        }
    }
}

impl From<ErrorCode> for ApiErrorCode {
    fn from(code: ErrorCode) -> Self {
        API_ERROR_CODES
            .into_iter()
            .find(|c| c.machine() == code)
            .unwrap_or(Self::Internal)
    }
}

/// Message used for every 500; the cause is logged, never returned.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
    pub request_id: String,
}

impl ApiError {
    #[must_use]
    pub fn new(
        code: ApiErrorCode,
        message: impl Into<String>,
        details: Value,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            request_id: request_id.into(),
        }
    }

    fn plain(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self::new(code, message, json!({}), "req-unknown")
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    #[must_use]
    pub fn validation(err: &ValidationError) -> Self {
        Self::new(
            ApiErrorCode::ValidationFailed,
            err.message.clone(),
            json!({"field": err.field}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn missing_field(name: &str, message: impl Into<String>) -> Self {
        Self::new(
            ApiErrorCode::MissingField,
            message,
            json!({"field": name}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn invalid_param(name: &str, value: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidQueryParameter,
            format!("invalid query parameter: {name}"),
            json!({"parameter": name, "value": value}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::plain(ApiErrorCode::Unauthorized, message)
    }

    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::plain(ApiErrorCode::Forbidden, message)
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::plain(ApiErrorCode::NotFound, message)
    }

    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::plain(ApiErrorCode::Conflict, message)
    }

    #[must_use]
    pub fn already_submitted() -> Self {
        Self::plain(
            ApiErrorCode::AlreadySubmitted,
            "You have already submitted a response to this form",
        )
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::plain(ApiErrorCode::Internal, INTERNAL_ERROR_MESSAGE)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::validation(&err)
    }
}

/// Error body: the structured error plus a top-level `message` for clients
/// that only read that field.
#[must_use]
pub fn error_body(error: &ApiError) -> Value {
    json!({"error": error, "message": error.message})
}
