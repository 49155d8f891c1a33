// SPDX-License-Identifier: Apache-2.0

//! Bearer-token authentication and role guards.

mod password;
mod token;

use crate::http::errors::HttpError;
use crate::AppState;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use formflow_api::ApiError;
use formflow_model::Role;
use tracing::debug;

pub use password::{hash_password, verify_password, DEFAULT_ITERATIONS};
pub use token::{TokenClaims, TokenCodec, TokenError};

pub const MISSING_TOKEN_MESSAGE: &str = "Authorization header missing or malformed";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";
pub const FORBIDDEN_MESSAGE: &str = "Access forbidden: insufficient permissions";

/// Caller identity taken from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub role: Role,
}

impl From<TokenClaims> for AuthUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn authenticate(headers: &HeaderMap, state: &AppState) -> Result<AuthUser, ApiError> {
    let token =
        bearer_token(headers).ok_or_else(|| ApiError::unauthorized(MISSING_TOKEN_MESSAGE))?;
    state
        .tokens
        .verify(token, chrono::Utc::now())
        .map(AuthUser::from)
        .map_err(|err| {
            debug!(error = %err, "token rejected");
            ApiError::unauthorized(INVALID_TOKEN_MESSAGE)
        })
}

fn require_role(user: AuthUser, role: Role) -> Result<AuthUser, ApiError> {
    if user.role == role {
        Ok(user)
    } else {
        Err(ApiError::forbidden(FORBIDDEN_MESSAGE))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(authenticate(&parts.headers, state)?)
    }
}

/// Any authenticated admin.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = authenticate(&parts.headers, state)?;
        Ok(Self(require_role(user, Role::Admin)?))
    }
}

/// Any authenticated employee.
#[derive(Debug, Clone)]
pub struct EmployeeUser(pub AuthUser);

#[async_trait]
impl FromRequestParts<AppState> for EmployeeUser {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = authenticate(&parts.headers, state)?;
        Ok(Self(require_role(user, Role::Employee)?))
    }
}

/// Identity when a token is sent; a token that is sent must be valid.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthUser>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(axum::http::header::AUTHORIZATION) {
            return Ok(Self(None));
        }
        Ok(Self(Some(authenticate(&parts.headers, state)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_prefix_is_required() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);
        headers.insert("authorization", HeaderValue::from_static("Bearer  v1.a.b "));
        assert_eq!(bearer_token(&headers), Some("v1.a.b"));
        headers.insert("authorization", HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn role_guard_rejects_other_roles() {
        let user = AuthUser {
            id: "u".into(),
            email: "e@org.in".into(),
            role: Role::Employee,
        };
        assert!(require_role(user.clone(), Role::Employee).is_ok());
        let err = require_role(user, Role::Admin).expect_err("admin only");
        assert_eq!(err.message, FORBIDDEN_MESSAGE);
    }
}
