// SPDX-License-Identifier: Apache-2.0

use super::{with_store, HandlerResult, JsonBody};
use crate::auth::{hash_password, verify_password, AuthUser, DEFAULT_ITERATIONS};
use crate::http::errors::HttpError;
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use formflow_api::{ApiError, ApiErrorCode, AuthResponse, LoginRequest, RegisteredResponse};
use formflow_core::text::{normalize_email, opt_non_empty};
use formflow_model::{new_id, User, UserDraft, UserView};
use tracing::info;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub(crate) async fn register_handler(
    State(state): State<AppState>,
    JsonBody(draft): JsonBody<UserDraft>,
) -> HandlerResult<(StatusCode, Json<RegisteredResponse>)> {
    let (username, email, password, role) = draft.validate()?;
    let password_hash =
        tokio::task::spawn_blocking(move || hash_password(&password, DEFAULT_ITERATIONS))
            .await
            .map_err(|e| HttpError::internal(&e))?;
    let user = User {
        id: new_id(),
        username,
        email,
        password_hash,
        role,
        created_at: Utc::now(),
    };
    let view = user.view();
    with_store(&state, move |store| store.create_user(&user))
        .await
        .map_err(|err| match err.code() {
            ApiErrorCode::Conflict => HttpError(ApiError::conflict("Email already registered")),
            _ => err,
        })?;
    info!(user_id = %view.id, role = %view.role, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisteredResponse {
            message: "User registered successfully".to_string(),
            user: view,
        }),
    ))
}

pub(crate) async fn login_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> HandlerResult<Json<AuthResponse>> {
    let email = opt_non_empty(body.email.as_deref());
    let password = body.password.filter(|p| !p.is_empty());
    let (Some(email), Some(password)) = (email, password) else {
        return Err(ApiError::missing_field("email", "Email and password are required").into());
    };
    let email = normalize_email(&email);
    let user = with_store(&state, move |store| store.user_by_email(&email))
        .await?
        .ok_or_else(|| ApiError::unauthorized(INVALID_CREDENTIALS))?;
    let hash = user.password_hash.clone();
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| HttpError::internal(&e))?;
    if !matches {
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS).into());
    }
    let token = state
        .tokens
        .issue(&user, Utc::now())
        .map_err(|e| HttpError::internal(&e))?;
    info!(user_id = %user.id, "login succeeded");
    Ok(Json(AuthResponse {
        token,
        user: user.view(),
    }))
}

pub(crate) async fn profile_handler(
    State(state): State<AppState>,
    user: AuthUser,
) -> HandlerResult<Json<UserView>> {
    let found = with_store(&state, move |store| store.user_by_id(&user.id)).await?;
    found
        .map(|u| Json(u.view()))
        .ok_or_else(|| HttpError(ApiError::not_found("User not found")))
}
