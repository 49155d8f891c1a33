// SPDX-License-Identifier: Apache-2.0

use crate::errors::API_ERROR_CODES;
use serde_json::{json, Map, Value};

const ERR: &str = "#/components/schemas/ApiError";

fn error_response(description: &str) -> Value {
    json!({"description": description, "content": {"application/json": {"schema": {"$ref": ERR}}}})
}

fn op(summary: &str, secured: bool, ok: (&str, &str), errors: &[(&str, &str)]) -> Value {
    let mut responses = Map::new();
    responses.insert(ok.0.to_string(), json!({"description": ok.1}));
    for (status, description) in errors {
        responses.insert((*status).to_string(), error_response(description));
    }
    let mut out = json!({"summary": summary, "responses": responses});
    if secured {
        out["security"] = json!([{"bearerAuth": []}]);
    }
    out
}

fn path_param(name: &str) -> Value {
    json!({"name": name, "in": "path", "required": true, "schema": {"type": "string"}})
}

fn query_param(name: &str) -> Value {
    json!({"name": name, "in": "query", "schema": {"type": "string"}})
}

fn with_params(mut operation: Value, params: Vec<Value>) -> Value {
    operation["parameters"] = Value::Array(params);
    operation
}

const DENIED: [(&str, &str); 2] = [("401", "missing or invalid token"), ("403", "role not allowed")];

fn admin_errors(extra: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
    let mut out = DENIED.to_vec();
    out.extend_from_slice(extra);
    out
}

fn auth_and_admin_paths() -> Value {
    json!({
        "/healthz": {"get": op("liveness", false, ("200", "ok"), &[])},
        "/api/openapi.json": {"get": op("this document", false, ("200", "OpenAPI document"), &[])},
        "/api/auth/register": {"post": op("register an account", false, ("201", "registered"),
            &[("400", "missing or invalid fields"), ("409", "email already registered")])},
        "/api/auth/login": {"post": op("exchange credentials for a token", false, ("200", "token and user"),
            &[("400", "missing fields"), ("401", "invalid credentials")])},
        "/api/auth/profile": {"get": op("current user", true, ("200", "user"),
            &[("401", "missing or invalid token"), ("404", "user not found")])},
        "/api/admin/formIdByTitle": {"get": with_params(op("form id by title", true, ("200", "form id"),
            &admin_errors(&[("400", "title missing"), ("404", "form not found")])), vec![query_param("title")])},
        "/api/admin/dashboard": {"get": op("admin welcome", true, ("200", "message"), &DENIED)},
        "/api/external/totalusers": {"get": op("proxied user total", false, ("200", "upstream body or fallback"), &[])}
    })
}

fn forms_paths() -> Value {
    let id = || vec![path_param("id")];
    json!({
        "/api/forms": {
          "get": op("list forms", true, ("200", "forms"), &[("401", "missing or invalid token")]),
          "post": op("create form", true, ("201", "created form"), &admin_errors(&[("400", "validation failed")]))
        },
        "/api/forms/countByLevel": {"get": op("forms per target level", true, ("200", "counts"), &DENIED)},
        "/api/forms/countByDepartment": {"get": op("forms per target department", true, ("200", "counts"), &DENIED)},
        "/api/forms/countByDesignation": {"get": op("forms per target designation", true, ("200", "counts"), &DENIED)},
        "/api/forms/employee/targeted-forms": {"get": op("published forms visible to the caller", true, ("200", "forms"),
            &[("401", "missing or invalid token"), ("404", "employee profile not found")])},
        "/api/forms/{id}": {
          "get": with_params(op("read form", true, ("200", "form"),
            &[("401", "missing or invalid token"), ("403", "not targeted"), ("404", "form not found")]), id()),
          "put": with_params(op("update form", true, ("200", "updated form"),
            &admin_errors(&[("400", "validation failed"), ("404", "form not found")])), id()),
          "delete": with_params(op("delete form", true, ("200", "deleted"),
            &admin_errors(&[("404", "form not found")])), id())
        },
        "/api/forms/{id}/publish": {"patch": with_params(op("set publication flag", true, ("200", "updated form"),
            &admin_errors(&[("400", "isPublished must be a boolean"), ("404", "form not found")])), id())}
    })
}

fn responses_paths() -> Value {
    let id = || vec![path_param("id")];
    json!({
        "/api/responses": {
          "get": with_params(op("filtered responses with counts", true, ("200", "responses page"),
            &admin_errors(&[("400", "invalid query")])),
            vec![query_param("level"), query_param("department"), query_param("designation"), query_param("respondentEmail")]),
          "post": op("submit response", false, ("201", "stored response"),
            &[("400", "validation failed or already submitted"), ("403", "form not published"), ("404", "form not found")])
        },
        "/api/responses/summary": {"get": op("totals", true, ("200", "summary"), &DENIED)},
        "/api/responses/{id}": {
          "get": with_params(op("response detail", true, ("200", "response"), &admin_errors(&[("404", "response not found")])), id()),
          "delete": with_params(op("delete response", true, ("200", "deleted"), &admin_errors(&[("404", "response not found")])), id())
        }
    })
}

fn master_data_paths() -> Value {
    let id = || vec![path_param("id")];
    json!({
        "/api/masterdata/departments": {
          "get": op("departments", false, ("200", "departments"), &[]),
          "post": op("add department", true, ("201", "department"), &admin_errors(&[("400", "missing or duplicate")]))
        },
        "/api/masterdata/departments/{dept_id}": {"delete": with_params(op("delete department", true, ("200", "deleted"),
            &admin_errors(&[("404", "department not found")])), vec![path_param("dept_id")])},
        "/api/masterdata/levels": {
          "get": op("levels", false, ("200", "levels"), &[]),
          "post": op("add level", true, ("201", "level"), &admin_errors(&[("400", "missing or duplicate")]))
        },
        "/api/masterdata/levels/{id}": {
          "get": with_params(op("levels matching a department's category", false, ("200", "levels"),
            &[("404", "department not found")]), id()),
          "delete": with_params(op("delete level", true, ("200", "deleted"),
            &admin_errors(&[("404", "level not found")])), id())
        },
        "/api/masterdata/designations": {
          "get": with_params(op("designations with level", false, ("200", "designations"), &[]), vec![query_param("department")]),
          "post": op("add designation", true, ("201", "designation"), &admin_errors(&[("400", "missing or duplicate")]))
        },
        "/api/masterdata/designations/{desig_id}": {"delete": with_params(op("delete designation", true, ("200", "deleted"),
            &admin_errors(&[("404", "designation not found")])), vec![path_param("desig_id")])}
    })
}

fn employee_paths() -> Value {
    json!({
        "/api/employee/register": {"post": op("register employee profile", false, ("201", "profile"),
            &[("400", "missing or invalid fields"), ("409", "employee id exists")])},
        "/api/employee/my-profile": {"get": op("caller's profile", true, ("200", "profile"),
            &[("401", "missing or invalid token"), ("404", "profile not found")])},
        "/api/employee/targeted-forms": {"get": op("published forms visible to the caller", true, ("200", "forms"),
            &[("401", "missing or invalid token"), ("404", "profile not found")])},
        "/api/employee/debug-targeted-forms": {"get": op("per-form targeting decisions", true, ("200", "decisions"),
            &[("401", "missing or invalid token"), ("404", "profile not found")])},
        "/api/employee/employees": {"get": op("all employee profiles", true, ("200", "profiles"), &DENIED)}
    })
}

#[must_use]
pub fn openapi_spec() -> Value {
    let error_codes: Vec<&str> = API_ERROR_CODES.iter().map(|c| c.as_str()).collect();
    let mut paths = Map::new();
    for group in [
        auth_and_admin_paths(),
        forms_paths(),
        responses_paths(),
        master_data_paths(),
        employee_paths(),
    ] {
        if let Value::Object(entries) = group {
            paths.extend(entries);
        }
    }
    json!({
      "openapi": "3.0.3",
      "info": {"title": "FormFlow API", "version": "v1"},
      "paths": paths,
      "components": {
        "securitySchemes": {"bearerAuth": {"type": "http", "scheme": "bearer"}},
        "schemas": {
          "ApiErrorCode": {"type": "string", "enum": error_codes},
          "ApiError": {
            "type": "object",
            "required": ["code", "message", "details", "request_id"],
            "additionalProperties": false,
            "properties": {
              "code": {"$ref": "#/components/schemas/ApiErrorCode"},
              "message": {"type": "string"},
              "details": {"type": "object"},
              "request_id": {"type": "string"}
            }
          }
        }
      }
    })
}
