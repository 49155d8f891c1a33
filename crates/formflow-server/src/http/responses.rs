// SPDX-License-Identifier: Apache-2.0

use super::{client_info, with_store, HandlerResult, JsonBody};
use crate::auth::{AdminUser, MaybeUser};
use crate::http::errors::HttpError;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use formflow_api::{parse_response_filter, ApiError, MessageDto, ResponsesPage, SummaryDto};
use formflow_core::text::opt_non_empty;
use formflow_model::{new_id, Form, Response, ResponseDraft, Role, TargetDimension};
use formflow_query::{
    count_responses_by_dimension, enrich_responses, response_detail, select_forms,
    select_responses, MasterIndex, ResponseDetail,
};
use std::collections::BTreeMap;
use tracing::info;

pub(crate) async fn summary_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> HandlerResult<Json<SummaryDto>> {
    let summary = with_store(&state, |store| {
        Ok(SummaryDto {
            total_employees: store.count_users_by_role(Role::Employee)?,
            total_forms: store.count_forms()?,
            total_responses: store.count_responses()?,
        })
    })
    .await?;
    Ok(Json(summary))
}

pub(crate) async fn list_responses_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<BTreeMap<String, String>>,
) -> HandlerResult<Json<ResponsesPage>> {
    let filter = parse_response_filter(&query)?;
    let (forms, master, usernames, responses) = with_store(&state, |store| {
        let forms = store.list_forms()?;
        let ids: Vec<String> = forms.iter().map(|f| f.id.clone()).collect();
        Ok((
            forms,
            store.master_snapshot()?,
            store.usernames_by_email()?,
            store.responses_for_forms(&ids)?,
        ))
    })
    .await?;

    let index = MasterIndex::from_master(&master);
    let matched = select_forms(&index, &forms, &filter);
    let selected = select_responses(&responses, &matched, &filter);
    info!(
        forms = matched.len(),
        responses = selected.len(),
        "responses filtered"
    );
    Ok(Json(ResponsesPage {
        counts_by_level: count_responses_by_dimension(&selected, &matched, TargetDimension::Level),
        counts_by_department: count_responses_by_dimension(
            &selected,
            &matched,
            TargetDimension::Department,
        ),
        counts_by_designation: count_responses_by_dimension(
            &selected,
            &matched,
            TargetDimension::Designation,
        ),
        responses: enrich_responses(&selected, &matched, &usernames),
    }))
}

pub(crate) async fn submit_response_handler(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    headers: HeaderMap,
    JsonBody(mut draft): JsonBody<ResponseDraft>,
) -> HandlerResult<(StatusCode, Json<Response>)> {
    let form_id = opt_non_empty(draft.form_id.as_deref())
        .ok_or_else(|| HttpError(ApiError::missing_field("formId", "formId is required")))?;
    if opt_non_empty(draft.respondent_email.as_deref()).is_none() {
        draft.respondent_email = user.map(|u| u.email);
    }
    let client = client_info(&headers);

    let lookup = form_id.clone();
    let form: Form = with_store(&state, move |store| store.form_by_id(&lookup))
        .await?
        .ok_or_else(|| HttpError(ApiError::not_found("Form not found")))?;
    if !form.content.is_published {
        return Err(ApiError::forbidden("Form is not accepting responses").into());
    }
    let response = draft.validate(new_id(), &form, client, Utc::now())?;

    let limit_one = form.content.settings.limit_one_response;
    let (stored, response) = with_store(&state, move |store| {
        let stored = store.insert_response_once(&response, limit_one)?;
        Ok((stored, response))
    })
    .await?;
    if !stored {
        return Err(ApiError::already_submitted().into());
    }
    info!(form_id = %form_id, response_id = %response.id, "response submitted");
    Ok((StatusCode::CREATED, Json(response)))
}

pub(crate) async fn get_response_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> HandlerResult<Json<ResponseDetail>> {
    let detail = with_store(&state, move |store| {
        let Some(response) = store.response_by_id(&id)? else {
            return Ok(None);
        };
        let form = store.form_by_id(&response.form_id)?;
        let usernames = store.usernames_by_email()?;
        Ok(Some(response_detail(&response, form.as_ref(), &usernames)))
    })
    .await?;
    detail
        .map(Json)
        .ok_or_else(|| HttpError(ApiError::not_found("Response not found")))
}

pub(crate) async fn delete_response_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> HandlerResult<Json<MessageDto>> {
    with_store(&state, move |store| store.delete_response(&id)).await?;
    Ok(Json(MessageDto::new("Response deleted successfully")))
}
