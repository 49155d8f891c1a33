// SPDX-License-Identifier: Apache-2.0

use formflow_api::{
    api_error_status, error_body, map_error, ApiError, ApiErrorCode, API_ERROR_CODES,
    API_ERROR_SCHEMA_REF, INTERNAL_ERROR_MESSAGE,
};
use formflow_core::ErrorCode;
use formflow_model::ValidationError;
use serde_json::json;

#[test]
fn status_mapping_is_centralized_and_stable() {
    let cases = [
        (ApiErrorCode::ValidationFailed, 400),
        (ApiErrorCode::MissingField, 400),
        (ApiErrorCode::InvalidQueryParameter, 400),
        (ApiErrorCode::AlreadySubmitted, 400),
        (ApiErrorCode::Unauthorized, 401),
        (ApiErrorCode::Forbidden, 403),
        (ApiErrorCode::NotFound, 404),
        (ApiErrorCode::Conflict, 409),
        (ApiErrorCode::Internal, 500),
    ];
    for (code, status) in cases {
        assert_eq!(api_error_status(code), status, "{code:?}");
    }
    let mapped = map_error(&ApiError::new(ApiErrorCode::Conflict, "dup", json!({}), "req-1"));
    assert_eq!(mapped.status_code, 409);
    assert_eq!(mapped.schema_ref, API_ERROR_SCHEMA_REF);
}

#[test]
fn machine_codes_convert_both_ways() {
    for code in API_ERROR_CODES {
        assert_eq!(ApiErrorCode::from(code.machine()), code);
    }
    assert_eq!(ApiErrorCode::from(ErrorCode::NotFound), ApiErrorCode::NotFound);
}

#[test]
fn validation_errors_become_400_with_field_detail() {
    let err: ApiError = ValidationError::new("title", "Form title is required").into();
    assert_eq!(err.code, ApiErrorCode::ValidationFailed);
    assert_eq!(err.details["field"], "title");
    assert_eq!(map_error(&err).status_code, 400);
}

#[test]
fn error_body_wraps_error_and_exposes_message() {
    let err = ApiError::not_found("Form not found").with_request_id("req-9");
    let body = error_body(&err);
    assert_eq!(body["error"]["code"], "NotFound");
    assert_eq!(body["error"]["request_id"], "req-9");
    assert_eq!(body["message"], "Form not found");
}

#[test]
fn internal_errors_never_carry_detail() {
    let err = ApiError::internal();
    assert_eq!(err.message, INTERNAL_ERROR_MESSAGE);
    assert_eq!(err.details, json!({}));
}
