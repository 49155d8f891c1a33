// SPDX-License-Identifier: Apache-2.0

use super::{with_store, HandlerResult};
use crate::auth::AdminUser;
use crate::http::errors::HttpError;
use crate::AppState;
use axum::extract::{Query, State};
use axum::Json;
use formflow_api::{parse_form_title, ApiError, FormIdDto, MessageDto};
use std::collections::BTreeMap;

pub(crate) async fn form_id_by_title_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<BTreeMap<String, String>>,
) -> HandlerResult<Json<FormIdDto>> {
    let title = parse_form_title(&query)?;
    with_store(&state, move |store| store.form_by_title(&title))
        .await?
        .map(|form| Json(FormIdDto { form_id: form.id }))
        .ok_or_else(|| HttpError(ApiError::not_found("Form not found")))
}

pub(crate) async fn dashboard_handler(AdminUser(admin): AdminUser) -> Json<MessageDto> {
    tracing::debug!(admin_id = %admin.id, "dashboard opened");
    Json(MessageDto::new("Welcome to the Admin Dashboard"))
}
