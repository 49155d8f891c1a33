// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! HTTP wire contract shared by the server and the CLI.

mod dto;
pub mod error_mapping;
mod errors;
mod openapi;
mod params;

pub use dto::{
    AuthResponse, DepartmentRequest, DesignationRequest, EmployeeRegisteredResponse,
    FormDecisionDto, FormIdDto, FormListItem, LevelRequest, LoginRequest, MessageDto,
    PublishRequest, RegisteredResponse, ResponsesPage, SummaryDto, TargetingDebugDto,
    TotalUsersFallback,
};
pub use error_mapping::{api_error_status, map_error, ApiErrorMapping, API_ERROR_SCHEMA_REF};
pub use errors::{error_body, ApiError, ApiErrorCode, API_ERROR_CODES, INTERNAL_ERROR_MESSAGE};
pub use openapi::openapi_spec;
pub use params::{
    parse_department_filter, parse_form_title, parse_response_filter, MAX_FILTER_VALUE_BYTES,
};

pub const CRATE_NAME: &str = "formflow-api";
