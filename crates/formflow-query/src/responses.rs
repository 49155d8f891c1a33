// SPDX-License-Identifier: Apache-2.0

use crate::normalize::normalize_key;
use crate::targeting::MasterIndex;
use chrono::{DateTime, Utc};
use formflow_model::{Answer, Form, Response, TargetDimension};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const UNKNOWN_FORM_TITLE: &str = "Unknown";
pub const ANONYMOUS_RESPONDENT: &str = "Anonymous";
pub const UNKNOWN_QUESTION: &str = "Unknown Question";

/// Admin filter over responses. Dimension values select forms, the e-mail
/// selects respondents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseFilter {
    pub level: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub respondent_email: Option<String>,
}

impl ResponseFilter {
    #[must_use]
    pub fn get(&self, dimension: TargetDimension) -> Option<&str> {
        match dimension {
            TargetDimension::Level => self.level.as_deref(),
            TargetDimension::Department => self.department.as_deref(),
            TargetDimension::Designation => self.designation.as_deref(),
        }
    }
}

/// Forms whose target arrays contain every dimension value in `filter`.
#[must_use]
pub fn select_forms<'a>(
    index: &MasterIndex,
    forms: &'a [Form],
    filter: &ResponseFilter,
) -> Vec<&'a Form> {
    let wanted: Vec<(TargetDimension, BTreeSet<String>)> = TargetDimension::ALL
        .iter()
        .filter_map(|d| {
            filter
                .get(*d)
                .and_then(|raw| index.canonical(*d, raw))
                .map(|set| (*d, set))
        })
        .collect();
    forms
        .iter()
        .filter(|form| {
            wanted.iter().all(|(dimension, values)| {
                index
                    .canonical_set(*dimension, form.content.targets(*dimension))
                    .iter()
                    .any(|v| values.contains(v))
            })
        })
        .collect()
}

/// Responses on `forms`, restricted to the filter's respondent if any.
#[must_use]
pub fn select_responses<'a>(
    responses: &'a [Response],
    forms: &[&Form],
    filter: &ResponseFilter,
) -> Vec<&'a Response> {
    let ids: BTreeSet<&str> = forms.iter().map(|f| f.id.as_str()).collect();
    let email = filter
        .respondent_email
        .as_deref()
        .map(normalize_key)
        .filter(|e| !e.is_empty());
    responses
        .iter()
        .filter(|r| ids.contains(r.form_id.as_str()))
        .filter(|r| match &email {
            None => true,
            Some(e) => r
                .respondent_email
                .as_deref()
                .is_some_and(|own| normalize_key(own) == *e),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionCount {
    #[serde(rename = "_id")]
    pub key: String,
    pub count: u64,
}

fn into_counts(counts: BTreeMap<String, u64>) -> Vec<DimensionCount> {
    counts
        .into_iter()
        .map(|(key, count)| DimensionCount { key, count })
        .collect()
}

/// Number of forms per target value. Unrestricted forms contribute nothing.
#[must_use]
pub fn count_forms_by_dimension(forms: &[Form], dimension: TargetDimension) -> Vec<DimensionCount> {
    let mut counts = BTreeMap::new();
    for form in forms {
        for value in form.content.targets(dimension) {
            *counts.entry(value.clone()).or_insert(0) += 1;
        }
    }
    into_counts(counts)
}

/// One count per target value of each response's form.
#[must_use]
pub fn count_responses_by_dimension(
    responses: &[&Response],
    forms: &[&Form],
    dimension: TargetDimension,
) -> Vec<DimensionCount> {
    let by_id: BTreeMap<&str, &Form> = forms.iter().map(|f| (f.id.as_str(), *f)).collect();
    let mut counts = BTreeMap::new();
    for response in responses {
        let Some(form) = by_id.get(response.form_id.as_str()) else {
            continue;
        };
        for value in form.content.targets(dimension) {
            *counts.entry(value.clone()).or_insert(0) += 1;
        }
    }
    into_counts(counts)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedResponse {
    #[serde(flatten)]
    pub response: Response,
    pub form_title: String,
    pub employee_name: String,
}

fn employee_name(usernames: &BTreeMap<String, String>, email: Option<&str>) -> String {
    email
        .and_then(|e| usernames.get(&normalize_key(e)))
        .cloned()
        .unwrap_or_else(|| ANONYMOUS_RESPONDENT.to_string())
}

/// Adds the form title and the respondent's username to each response.
/// `usernames` maps normalized e-mail to username.
#[must_use]
pub fn enrich_responses(
    responses: &[&Response],
    forms: &[&Form],
    usernames: &BTreeMap<String, String>,
) -> Vec<EnrichedResponse> {
    let titles: BTreeMap<&str, &str> = forms
        .iter()
        .map(|f| (f.id.as_str(), f.content.title.as_str()))
        .collect();
    responses
        .iter()
        .map(|r| EnrichedResponse {
            form_title: titles
                .get(r.form_id.as_str())
                .map_or_else(|| UNKNOWN_FORM_TITLE.to_string(), |t| (*t).to_string()),
            employee_name: employee_name(usernames, r.respondent_email.as_deref()),
            response: (*r).clone(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedAnswer {
    #[serde(flatten)]
    pub answer: Answer,
    pub question_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDetail {
    #[serde(rename = "_id")]
    pub id: String,
    pub form_id: String,
    pub form_title: String,
    pub employee_name: String,
    pub respondent_email: Option<String>,
    pub answers: Vec<EnrichedAnswer>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Single response with question texts resolved against its form.
#[must_use]
pub fn response_detail(
    response: &Response,
    form: Option<&Form>,
    usernames: &BTreeMap<String, String>,
) -> ResponseDetail {
    let answers = response
        .answers
        .iter()
        .map(|a| EnrichedAnswer {
            question_text: form
                .and_then(|f| f.question_title(&a.question_id))
                .unwrap_or(UNKNOWN_QUESTION)
                .to_string(),
            answer: a.clone(),
        })
        .collect();
    ResponseDetail {
        id: response.id.clone(),
        form_id: response.form_id.clone(),
        form_title: form.map_or_else(
            || UNKNOWN_FORM_TITLE.to_string(),
            |f| f.content.title.clone(),
        ),
        employee_name: employee_name(usernames, response.respondent_email.as_deref()),
        respondent_email: response.respondent_email.clone(),
        answers,
        start_time: response.start_time,
        end_time: response.end_time,
        created_at: response.created_at,
    }
}
