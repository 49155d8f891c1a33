// SPDX-License-Identifier: Apache-2.0

use crate::http::errors::api_error_response;
use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use formflow_api::ApiError;

pub const CORS_REJECTED_MESSAGE: &str =
    "The CORS policy for this site does not allow access from the specified Origin.";

fn origin(headers: &HeaderMap) -> Option<String> {
    headers
        .get("origin")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= 256)
        .map(ToString::to_string)
}

fn allow(resp: &mut Response, origin: &str) {
    if let Ok(v) = HeaderValue::from_str(origin) {
        resp.headers_mut().insert("access-control-allow-origin", v);
    }
    resp.headers_mut().insert(
        "access-control-allow-credentials",
        HeaderValue::from_static("true"),
    );
    resp.headers_mut()
        .insert("vary", HeaderValue::from_static("Origin"));
}

/// Requests without an `Origin` pass through; listed origins are echoed back;
/// anything else is refused.
pub(crate) async fn cors_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(origin) = origin(req.headers()) else {
        return next.run(req).await;
    };
    if !state.api.cors_allowed_origins.iter().any(|o| o == &origin) {
        return api_error_response(ApiError::forbidden(CORS_REJECTED_MESSAGE));
    }
    if req.method() == Method::OPTIONS {
        let mut resp = StatusCode::NO_CONTENT.into_response();
        allow(&mut resp, &origin);
        resp.headers_mut().insert(
            "access-control-allow-methods",
            HeaderValue::from_static("GET,POST,PUT,PATCH,DELETE,OPTIONS"),
        );
        resp.headers_mut().insert(
            "access-control-allow-headers",
            HeaderValue::from_static("content-type,authorization,x-request-id"),
        );
        return resp;
    }
    let mut resp = next.run(req).await;
    allow(&mut resp, &origin);
    resp
}
