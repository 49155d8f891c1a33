// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! FormFlow HTTP server.
//!
//! Routes live under `/api`; every request passes the tracing and CORS
//! middleware and handlers reach the SQLite store through `spawn_blocking`.

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch};
use axum::Router;
use formflow_store::Store;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use tracing::warn;

pub mod auth;
mod config;
mod http;
mod middleware;
mod upstream;

pub use config::{ApiConfig, CONFIG_SCHEMA_VERSION, DEFAULT_BIND_ADDR, DEFAULT_CORS_ORIGINS};
pub use http::errors::HttpError;
pub use upstream::{
    BackoffPolicy, FixedBackoff, HttpUpstream, RetryPolicy, Upstream, UpstreamError,
};

pub const CRATE_NAME: &str = "formflow-server";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub api: Arc<ApiConfig>,
    pub tokens: Arc<auth::TokenCodec>,
    pub upstream: Arc<dyn Upstream>,
    pub request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    /// State with the `reqwest` upstream. Without a configured token secret a
    /// random one is generated, so tokens do not survive a restart.
    #[must_use]
    pub fn new(store: Arc<Store>, api: ApiConfig) -> Self {
        let upstream = Arc::new(HttpUpstream::new(api.external_timeout));
        Self::with_upstream(store, api, upstream)
    }

    #[must_use]
    pub fn with_upstream(store: Arc<Store>, api: ApiConfig, upstream: Arc<dyn Upstream>) -> Self {
        let secret = api.token_secret.clone().unwrap_or_else(|| {
            warn!("no token secret configured; generated an ephemeral one");
            let seed = format!(
                "{}:{}",
                uuid::Uuid::new_v4(),
                chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
            );
            formflow_core::sha256_hex(seed.as_bytes())
        });
        let tokens = auth::TokenCodec::new(secret.as_bytes(), api.token_ttl);
        Self {
            store,
            tokens: Arc::new(tokens),
            upstream,
            request_id_seed: Arc::new(AtomicU64::new(1)),
            api: Arc::new(api),
        }
    }
}

fn api_routes() -> Router<AppState> {
    use http::{admin, auth, employee, external, forms, master_data, responses};
    Router::new()
        .route("/api/auth/register", axum::routing::post(auth::register_handler))
        .route("/api/auth/login", axum::routing::post(auth::login_handler))
        .route("/api/auth/profile", get(auth::profile_handler))
        .route(
            "/api/forms",
            get(forms::list_forms_handler).post(forms::create_form_handler),
        )
        .route("/api/forms/countByLevel", get(forms::count_by_level_handler))
        .route(
            "/api/forms/countByDepartment",
            get(forms::count_by_department_handler),
        )
        .route(
            "/api/forms/countByDesignation",
            get(forms::count_by_designation_handler),
        )
        .route(
            "/api/forms/employee/targeted-forms",
            get(forms::employee_targeted_forms_handler),
        )
        .route(
            "/api/forms/:id",
            get(forms::get_form_handler)
                .put(forms::update_form_handler)
                .delete(forms::delete_form_handler),
        )
        .route("/api/forms/:id/publish", patch(forms::publish_form_handler))
        .route("/api/responses/summary", get(responses::summary_handler))
        .route(
            "/api/responses",
            get(responses::list_responses_handler).post(responses::submit_response_handler),
        )
        .route(
            "/api/responses/:id",
            get(responses::get_response_handler).delete(responses::delete_response_handler),
        )
        .route(
            "/api/masterdata/departments",
            get(master_data::list_departments_handler).post(master_data::add_department_handler),
        )
        .route(
            "/api/masterdata/departments/:dept_id",
            axum::routing::delete(master_data::delete_department_handler),
        )
        .route(
            "/api/masterdata/levels",
            get(master_data::list_levels_handler).post(master_data::add_level_handler),
        )
        .route(
            "/api/masterdata/levels/:id",
            get(master_data::levels_for_department_handler)
                .delete(master_data::delete_level_handler),
        )
        .route(
            "/api/masterdata/designations",
            get(master_data::list_designations_handler)
                .post(master_data::add_designation_handler),
        )
        .route(
            "/api/masterdata/designations/:desig_id",
            axum::routing::delete(master_data::delete_designation_handler),
        )
        .route("/api/employee/my-profile", get(employee::my_profile_handler))
        .route(
            "/api/employee/targeted-forms",
            get(employee::targeted_forms_handler),
        )
        .route("/api/employee/employees", get(employee::list_employees_handler))
        .route(
            "/api/employee/register",
            axum::routing::post(employee::register_employee_handler),
        )
        .route(
            "/api/employee/debug-targeted-forms",
            get(employee::debug_targeted_forms_handler),
        )
        .route("/api/admin/formIdByTitle", get(admin::form_id_by_title_handler))
        .route("/api/admin/dashboard", get(admin::dashboard_handler))
        .route("/api/external/totalusers", get(external::total_users_handler))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(http::meta::healthz_handler))
        .route("/api/openapi.json", get(http::meta::openapi_handler))
        .merge(api_routes())
        .fallback(http::meta::fallback_handler)
        .layer(from_fn_with_state(
            state.clone(),
            middleware::cors::cors_middleware,
        ))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.api.max_body_bytes))
        .with_state(state)
}
