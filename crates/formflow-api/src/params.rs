// SPDX-License-Identifier: Apache-2.0

use crate::errors::ApiError;
use formflow_core::text::{looks_like_email, opt_non_empty};
use formflow_query::ResponseFilter;
use std::collections::BTreeMap;

pub const MAX_FILTER_VALUE_BYTES: usize = 256;

fn bounded(query: &BTreeMap<String, String>, name: &str) -> Result<Option<String>, ApiError> {
    let value = opt_non_empty(query.get(name).map(String::as_str));
    if let Some(v) = &value {
        if v.len() > MAX_FILTER_VALUE_BYTES {
            return Err(ApiError::invalid_param(name, v));
        }
    }
    Ok(value)
}

/// `level`, `department`, `designation` and `respondentEmail` from the
/// response listing query. Blank values are treated as absent.
pub fn parse_response_filter(query: &BTreeMap<String, String>) -> Result<ResponseFilter, ApiError> {
    let respondent_email = bounded(query, "respondentEmail")?;
    if let Some(email) = &respondent_email {
        if !looks_like_email(email) {
            return Err(ApiError::invalid_param("respondentEmail", email));
        }
    }
    Ok(ResponseFilter {
        level: bounded(query, "level")?,
        department: bounded(query, "department")?,
        designation: bounded(query, "designation")?,
        respondent_email,
    })
}

pub fn parse_form_title(query: &BTreeMap<String, String>) -> Result<String, ApiError> {
    bounded(query, "title")?
        .ok_or_else(|| ApiError::missing_field("title", "Form title is required"))
}

/// Optional `department` filter for designation listings.
pub fn parse_department_filter(
    query: &BTreeMap<String, String>,
) -> Result<Option<String>, ApiError> {
    bounded(query, "department")
}
