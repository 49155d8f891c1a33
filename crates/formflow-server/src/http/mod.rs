// SPDX-License-Identifier: Apache-2.0

pub(crate) mod admin;
pub(crate) mod auth;
pub(crate) mod employee;
pub(crate) mod errors;
pub(crate) mod external;
pub(crate) mod forms;
pub(crate) mod master_data;
pub(crate) mod meta;
pub(crate) mod request_tracing;
pub(crate) mod responses;

use crate::AppState;
use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::HeaderMap;
use axum::Json;
use errors::HttpError;
use formflow_api::ApiError;
use formflow_model::MasterData;
use formflow_query::Resolver;
use formflow_store::{Store, StoreError};
use serde::de::DeserializeOwned;
use std::sync::Arc;

pub(crate) type HandlerResult<T> = Result<T, HttpError>;

/// Runs a store call on the blocking pool.
pub(crate) async fn with_store<T, F>(state: &AppState, f: F) -> HandlerResult<T>
where
    F: FnOnce(&Store) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || f(&store))
        .await
        .map_err(|e| HttpError::internal(&e))?
        .map_err(HttpError::from)
}

pub(crate) fn resolver(state: &AppState, master: &MasterData) -> Resolver {
    Resolver::new(master, state.api.targeting_policy())
}

/// JSON body whose decode failures surface as 400 `ValidationFailed`.
pub(crate) struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection(&rejection)),
        }
    }
}

fn json_rejection(rejection: &JsonRejection) -> HttpError {
    HttpError(ApiError::new(
        formflow_api::ApiErrorCode::ValidationFailed,
        "Invalid JSON body",
        serde_json::json!({"reason": rejection.body_text()}),
        "req-unknown",
    ))
}

/// Client address and user agent recorded with a submission.
pub(crate) fn client_info(headers: &HeaderMap) -> (Option<String>, Option<String>) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };
    let ip = header("x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .or_else(|| header("x-real-ip"))
        .map(str::to_string);
    let agent = header("user-agent").map(str::to_string);
    (ip, agent)
}
