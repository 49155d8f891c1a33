// SPDX-License-Identifier: Apache-2.0

use crate::http::errors::HttpError;
use axum::http::Uri;
use axum::Json;
use formflow_api::{openapi_spec, ApiError};
use serde_json::Value;

pub(crate) async fn healthz_handler() -> &'static str {
    "ok"
}

pub(crate) async fn openapi_handler() -> Json<Value> {
    Json(openapi_spec())
}

pub(crate) async fn fallback_handler(uri: Uri) -> HttpError {
    if uri.path().starts_with("/api/") {
        HttpError(ApiError::not_found("API route not found"))
    } else {
        HttpError(ApiError::not_found("Route not found"))
    }
}
