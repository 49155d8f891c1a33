// SPDX-License-Identifier: Apache-2.0

use formflow_api::{openapi_spec, API_ERROR_CODES};
use serde_json::Value;

#[test]
fn openapi_schema_lint_rules_hold() {
    let spec = openapi_spec();
    assert_eq!(spec["openapi"], "3.0.3");
    assert_eq!(spec["info"]["version"], "v1");

    let api_error = &spec["components"]["schemas"]["ApiError"];
    assert_eq!(api_error["additionalProperties"], Value::Bool(false));
    let codes = spec["components"]["schemas"]["ApiErrorCode"]["enum"]
        .as_array()
        .expect("enum");
    assert_eq!(codes.len(), API_ERROR_CODES.len());
}

#[test]
fn every_route_family_is_documented() {
    let spec = openapi_spec();
    let paths = spec["paths"].as_object().expect("paths");
    for path in [
        "/healthz",
        "/api/auth/login",
        "/api/forms/{id}",
        "/api/forms/{id}/publish",
        "/api/responses",
        "/api/responses/summary",
        "/api/masterdata/levels/{id}",
        "/api/employee/targeted-forms",
        "/api/admin/formIdByTitle",
        "/api/external/totalusers",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
}

#[test]
fn secured_operations_declare_bearer_auth() {
    let spec = openapi_spec();
    assert_eq!(
        spec["paths"]["/api/forms"]["post"]["security"][0]["bearerAuth"],
        Value::Array(vec![])
    );
    assert!(spec["paths"]["/api/masterdata/departments"]["get"]
        .get("security")
        .is_none());
}
