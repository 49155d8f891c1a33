// SPDX-License-Identifier: Apache-2.0

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use formflow_api::{error_body, map_error, ApiError, ApiErrorCode};
use formflow_model::ValidationError;
use formflow_store::{StoreError, StoreErrorCode};
use tracing::error;

pub(crate) fn api_error_response(err: ApiError) -> Response {
    let status = StatusCode::from_u16(map_error(&err).status_code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut resp = (status, Json(error_body(&err))).into_response();
    // Picked up by the tracing middleware to stamp the request id.
    resp.extensions_mut().insert(err);
    resp
}

/// Handler failure rendered as the `{"error": ...}` envelope.
#[derive(Debug)]
pub struct HttpError(pub ApiError);

impl HttpError {
    #[must_use]
    pub fn internal(cause: &dyn std::fmt::Display) -> Self {
        error!(error = %cause, "internal error");
        Self(ApiError::internal())
    }

    #[must_use]
    pub fn code(&self) -> ApiErrorCode {
        self.0.code
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        api_error_response(self.0)
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for HttpError {
    fn from(err: ValidationError) -> Self {
        Self(ApiError::validation(&err))
    }
}

impl From<StoreError> for HttpError {
    fn from(err: StoreError) -> Self {
        match err.code {
            StoreErrorCode::NotFound => Self(ApiError::not_found(err.message)),
            StoreErrorCode::Conflict => Self(ApiError::conflict(err.message)),
            StoreErrorCode::Validation => Self(ApiError::new(
                ApiErrorCode::ValidationFailed,
                err.message,
                serde_json::json!({}),
                "req-unknown",
            )),
            _ => Self::internal(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_keep_their_class() {
        let e = HttpError::from(StoreError::not_found("Form not found"));
        assert_eq!(e.code(), ApiErrorCode::NotFound);
        assert_eq!(e.0.message, "Form not found");
        let e = HttpError::from(StoreError::conflict("User already exists"));
        assert_eq!(e.code(), ApiErrorCode::Conflict);
    }

    #[test]
    fn internal_errors_hide_the_cause() {
        let e = HttpError::from(StoreError::new(StoreErrorCode::Io, "disk on fire"));
        assert_eq!(e.code(), ApiErrorCode::Internal);
        assert_eq!(e.0.message, formflow_api::INTERNAL_ERROR_MESSAGE);
        let resp = e.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(resp.extensions().get::<ApiError>().is_some());
    }
}
