// SPDX-License-Identifier: Apache-2.0

use super::forms::{targeted_forms_for, PROFILE_NOT_FOUND};
use super::{resolver, with_store, HandlerResult, JsonBody};
use crate::auth::{AdminUser, EmployeeUser};
use crate::http::errors::HttpError;
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use formflow_api::{
    ApiError, ApiErrorCode, EmployeeRegisteredResponse, FormDecisionDto, TargetingDebugDto,
};
use formflow_model::{new_id, EmployeeProfile, EmployeeProfileDraft, Form};
use tracing::info;

fn profile_not_found() -> HttpError {
    HttpError(ApiError::not_found(PROFILE_NOT_FOUND))
}

pub(crate) async fn my_profile_handler(
    State(state): State<AppState>,
    EmployeeUser(user): EmployeeUser,
) -> HandlerResult<Json<EmployeeProfile>> {
    with_store(&state, move |store| store.employee_by_email(&user.email))
        .await?
        .map(Json)
        .ok_or_else(profile_not_found)
}

pub(crate) async fn targeted_forms_handler(
    State(state): State<AppState>,
    EmployeeUser(user): EmployeeUser,
) -> HandlerResult<Json<Vec<Form>>> {
    targeted_forms_for(&state, user.email)
        .await?
        .map(Json)
        .ok_or_else(profile_not_found)
}

pub(crate) async fn list_employees_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> HandlerResult<Json<Vec<EmployeeProfile>>> {
    Ok(Json(with_store(&state, |store| store.list_employees()).await?))
}

/// Open registration. A profile whose e-mail belongs to an account is linked to it.
pub(crate) async fn register_employee_handler(
    State(state): State<AppState>,
    JsonBody(draft): JsonBody<EmployeeProfileDraft>,
) -> HandlerResult<(StatusCode, Json<EmployeeRegisteredResponse>)> {
    let unlinked = draft.validate(new_id(), None, Utc::now())?;
    let employee = with_store(&state, move |store| {
        let user_id = match unlinked.email.as_deref() {
            Some(email) => store.user_by_email(email)?.map(|u| u.id),
            None => None,
        };
        let profile = EmployeeProfile {
            user_id,
            ..unlinked
        };
        store.register_employee(&profile)?;
        Ok(profile)
    })
    .await
    .map_err(|err| match err.code() {
        ApiErrorCode::Conflict => {
            HttpError(ApiError::conflict("Employee with this ID already exists"))
        }
        _ => err,
    })?;
    info!(employee_id = %employee.employee_id, linked = employee.user_id.is_some(), "employee registered");
    Ok((
        StatusCode::CREATED,
        Json(EmployeeRegisteredResponse {
            message: "Employee registered successfully".to_string(),
            employee,
        }),
    ))
}

pub(crate) async fn debug_targeted_forms_handler(
    State(state): State<AppState>,
    EmployeeUser(user): EmployeeUser,
) -> HandlerResult<Json<TargetingDebugDto>> {
    let loaded = with_store(&state, move |store| {
        let Some(profile) = store.employee_by_email(&user.email)? else {
            return Ok(None);
        };
        Ok(Some((profile, store.list_published_forms()?, store.master_snapshot()?)))
    })
    .await?;
    let (profile, forms, master) = loaded.ok_or_else(profile_not_found)?;
    let resolver = resolver(&state, &master);
    let normalized_profile = resolver.profile(&profile);
    let forms = forms
        .iter()
        .map(|form| {
            let decision = resolver.decide(&normalized_profile, &form.content);
            FormDecisionDto {
                form_id: form.id.clone(),
                title: form.content.title.clone(),
                is_published: form.content.is_published,
                visible: decision.is_visible(),
                decision,
            }
        })
        .collect();
    Ok(Json(TargetingDebugDto {
        profile,
        normalized_profile,
        forms,
    }))
}
