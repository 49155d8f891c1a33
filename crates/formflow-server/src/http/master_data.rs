// SPDX-License-Identifier: Apache-2.0

use super::{with_store, HandlerResult, JsonBody};
use crate::auth::AdminUser;
use crate::http::errors::HttpError;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use formflow_api::{
    parse_department_filter, ApiError, ApiErrorCode, DepartmentRequest, DesignationRequest,
    LevelRequest, MessageDto,
};
use formflow_model::{Department, DesignationWithLevel, Level};
use std::collections::BTreeMap;
use tracing::info;

type Created = (StatusCode, Json<MessageDto>);

/// Duplicate ids are reported as a bad request, like other input problems.
fn duplicate_as_bad_request(err: HttpError, message: &str, field: &str) -> HttpError {
    if err.code() == ApiErrorCode::Conflict {
        HttpError(ApiError::new(
            ApiErrorCode::ValidationFailed,
            message,
            serde_json::json!({"field": field}),
            "req-unknown",
        ))
    } else {
        err
    }
}

fn created(message: &str) -> Created {
    (StatusCode::CREATED, Json(MessageDto::new(message)))
}

pub(crate) async fn list_departments_handler(
    State(state): State<AppState>,
) -> HandlerResult<Json<Vec<Department>>> {
    Ok(Json(with_store(&state, |store| store.list_departments()).await?))
}

pub(crate) async fn add_department_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    JsonBody(body): JsonBody<DepartmentRequest>,
) -> HandlerResult<Created> {
    let department = body.into_department()?;
    let id = department.dept_id.clone();
    with_store(&state, move |store| store.add_department(&department))
        .await
        .map_err(|e| duplicate_as_bad_request(e, "Department with this ID already exists", "dept_id"))?;
    info!(dept_id = %id, "department added");
    Ok(created("Department added successfully"))
}

pub(crate) async fn delete_department_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(dept_id): Path<String>,
) -> HandlerResult<Json<MessageDto>> {
    with_store(&state, move |store| store.delete_department(&dept_id)).await?;
    Ok(Json(MessageDto::new("Department deleted successfully")))
}

pub(crate) async fn list_levels_handler(
    State(state): State<AppState>,
) -> HandlerResult<Json<Vec<Level>>> {
    Ok(Json(with_store(&state, |store| store.list_levels()).await?))
}

pub(crate) async fn add_level_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    JsonBody(body): JsonBody<LevelRequest>,
) -> HandlerResult<Created> {
    let level = body.into_level()?;
    let id = level.level_id.clone();
    with_store(&state, move |store| store.add_level(&level))
        .await
        .map_err(|e| duplicate_as_bad_request(e, "Level with this ID already exists", "level_id"))?;
    info!(level_id = %id, "level added");
    Ok(created("Level added successfully"))
}

/// `GET /levels/:id` takes a department id.
pub(crate) async fn levels_for_department_handler(
    State(state): State<AppState>,
    Path(dept_id): Path<String>,
) -> HandlerResult<Json<Vec<Level>>> {
    Ok(Json(
        with_store(&state, move |store| store.levels_for_department(&dept_id)).await?,
    ))
}

/// `DELETE /levels/:id` takes a level id.
pub(crate) async fn delete_level_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(level_id): Path<String>,
) -> HandlerResult<Json<MessageDto>> {
    with_store(&state, move |store| store.delete_level(&level_id)).await?;
    Ok(Json(MessageDto::new("Level deleted successfully")))
}

pub(crate) async fn list_designations_handler(
    State(state): State<AppState>,
    Query(query): Query<BTreeMap<String, String>>,
) -> HandlerResult<Json<Vec<DesignationWithLevel>>> {
    let department = parse_department_filter(&query)?;
    Ok(Json(
        with_store(&state, move |store| {
            store.designations_with_levels(department.as_deref())
        })
        .await?,
    ))
}

pub(crate) async fn add_designation_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    JsonBody(body): JsonBody<DesignationRequest>,
) -> HandlerResult<Created> {
    let designation = body.into_designation()?;
    let id = designation.desig_id.clone();
    with_store(&state, move |store| store.add_designation(&designation))
        .await
        .map_err(|e| {
            duplicate_as_bad_request(e, "Designation with this ID already exists", "desig_id")
        })?;
    info!(desig_id = %id, "designation added");
    Ok(created("Designation added successfully"))
}

pub(crate) async fn delete_designation_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(desig_id): Path<String>,
) -> HandlerResult<Json<MessageDto>> {
    with_store(&state, move |store| store.delete_designation(&desig_id)).await?;
    Ok(Json(MessageDto::new("Designation deleted successfully")))
}
