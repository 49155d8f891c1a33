// SPDX-License-Identifier: Apache-2.0

use super::{resolver, with_store, HandlerResult, JsonBody};
use crate::auth::{AdminUser, AuthUser};
use crate::http::errors::HttpError;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use formflow_api::{ApiError, FormListItem, MessageDto, PublishRequest};
use formflow_model::{Form, FormDraft, Role, TargetDimension};
use formflow_query::{count_forms_by_dimension, DimensionCount};
use tracing::info;

const FORM_NOT_FOUND: &str = "Form not found";
pub(crate) const PROFILE_NOT_FOUND: &str = "Employee profile not found";
const NOT_TARGETED: &str = "Access forbidden: this form is not targeted at your profile";

pub(crate) async fn list_forms_handler(
    State(state): State<AppState>,
    _user: AuthUser,
) -> HandlerResult<Json<Vec<FormListItem>>> {
    let forms = with_store(&state, |store| store.list_forms()).await?;
    Ok(Json(forms.into_iter().map(FormListItem::from).collect()))
}

pub(crate) async fn create_form_handler(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    JsonBody(draft): JsonBody<FormDraft>,
) -> HandlerResult<(StatusCode, Json<Form>)> {
    let content = draft.validate()?;
    let form = with_store(&state, move |store| store.insert_form(content, Utc::now())).await?;
    info!(form_id = %form.id, admin_id = %admin.id, "form created");
    Ok((StatusCode::CREATED, Json(form)))
}

pub(crate) async fn get_form_handler(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> HandlerResult<Json<Form>> {
    let email = user.email.clone();
    let (form, profile, master) = with_store(&state, move |store| {
        let Some(form) = store.form_by_id(&id)? else {
            return Ok((None, None, None));
        };
        if user.role == Role::Admin {
            return Ok((Some(form), None, None));
        }
        let profile = store.employee_by_email(&email)?;
        let master = store.master_snapshot()?;
        Ok((Some(form), profile, Some(master)))
    })
    .await?;
    let form = form.ok_or_else(|| HttpError(ApiError::not_found(FORM_NOT_FOUND)))?;
    let Some(master) = master else {
        return Ok(Json(form));
    };
    let profile = profile.ok_or_else(|| HttpError(ApiError::forbidden(PROFILE_NOT_FOUND)))?;
    let resolver = resolver(&state, &master);
    let decision = resolver.decide(&resolver.profile(&profile), &form.content);
    if !decision.is_visible() {
        info!(form_id = %form.id, employee_id = %profile.employee_id, ?decision, "form hidden by targeting");
        return Err(ApiError::forbidden(NOT_TARGETED).into());
    }
    Ok(Json(form))
}

pub(crate) async fn update_form_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    JsonBody(draft): JsonBody<FormDraft>,
) -> HandlerResult<Json<Form>> {
    let lookup = id.clone();
    let existing = with_store(&state, move |store| store.form_by_id(&lookup))
        .await?
        .ok_or_else(|| HttpError(ApiError::not_found(FORM_NOT_FOUND)))?;
    let content = draft.validate_update(&existing.content)?;
    let form = with_store(&state, move |store| store.update_form(&id, content, Utc::now())).await?;
    info!(form_id = %form.id, "form updated");
    Ok(Json(form))
}

pub(crate) async fn publish_form_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<PublishRequest>,
) -> HandlerResult<Json<Form>> {
    let flag = body.flag().ok_or_else(|| {
        HttpError(ApiError::validation(&formflow_model::ValidationError::new(
            "isPublished",
            "isPublished must be a boolean",
        )))
    })?;
    let form =
        with_store(&state, move |store| store.set_form_published(&id, flag, Utc::now())).await?;
    info!(form_id = %form.id, is_published = flag, "form publication changed");
    Ok(Json(form))
}

pub(crate) async fn delete_form_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> HandlerResult<Json<MessageDto>> {
    with_store(&state, move |store| store.delete_form(&id)).await?;
    Ok(Json(MessageDto::new("Form deleted successfully")))
}

async fn count_by(state: &AppState, dimension: TargetDimension) -> HandlerResult<Json<Vec<DimensionCount>>> {
    let forms = with_store(state, |store| store.list_forms()).await?;
    Ok(Json(count_forms_by_dimension(&forms, dimension)))
}

pub(crate) async fn count_by_level_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> HandlerResult<Json<Vec<DimensionCount>>> {
    count_by(&state, TargetDimension::Level).await
}

pub(crate) async fn count_by_department_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> HandlerResult<Json<Vec<DimensionCount>>> {
    count_by(&state, TargetDimension::Department).await
}

pub(crate) async fn count_by_designation_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> HandlerResult<Json<Vec<DimensionCount>>> {
    count_by(&state, TargetDimension::Designation).await
}

/// Published forms the profile registered under `email` may see.
/// `Ok(None)` when there is no such profile.
pub(crate) async fn targeted_forms_for(
    state: &AppState,
    email: String,
) -> HandlerResult<Option<Vec<Form>>> {
    let loaded = with_store(state, move |store| {
        let Some(profile) = store.employee_by_email(&email)? else {
            return Ok(None);
        };
        Ok(Some((profile, store.list_published_forms()?, store.master_snapshot()?)))
    })
    .await?;
    let Some((profile, forms, master)) = loaded else {
        return Ok(None);
    };
    let resolver = resolver(state, &master);
    let target = resolver.profile(&profile);
    let visible: Vec<Form> = resolver
        .visible_forms(&target, &forms)
        .into_iter()
        .cloned()
        .collect();
    info!(
        employee_id = %profile.employee_id,
        published = forms.len(),
        visible = visible.len(),
        "targeted forms resolved"
    );
    Ok(Some(visible))
}

pub(crate) async fn employee_targeted_forms_handler(
    State(state): State<AppState>,
    user: AuthUser,
) -> HandlerResult<Json<Vec<Form>>> {
    targeted_forms_for(&state, user.email)
        .await?
        .map(Json)
        .ok_or_else(|| HttpError(ApiError::forbidden(PROFILE_NOT_FOUND)))
}
