// SPDX-License-Identifier: Apache-2.0

use crate::form::Form;
use crate::validation::ValidationError;
use chrono::{DateTime, Utc};
use formflow_core::text::{looks_like_email, normalize_email, opt_non_empty};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Value,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(rename = "_id")]
    pub id: String,
    pub form_id: String,
    pub answers: Vec<Answer>,
    pub respondent_email: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnswerDraft {
    pub question_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub value: Option<Value>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseDraft {
    pub form_id: Option<String>,
    pub answers: Vec<AnswerDraft>,
    pub respondent_email: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
}

impl ResponseDraft {
    /// Validates answers against `form`. Answers without an id take the
    /// positional `q{index}` id; required questions must carry a non-empty value.
    pub fn validate(
        self,
        id: String,
        form: &Form,
        client: (Option<String>, Option<String>),
        now: DateTime<Utc>,
    ) -> Result<Response, ValidationError> {
        let respondent_email = match opt_non_empty(self.respondent_email.as_deref()) {
            Some(raw) if !looks_like_email(&raw) => {
                return Err(ValidationError::new(
                    "respondentEmail",
                    "respondentEmail is not a valid address",
                ))
            }
            other => other.map(|e| normalize_email(&e)),
        };
        if form.content.settings.collect_email && respondent_email.is_none() {
            return Err(ValidationError::required("respondentEmail"));
        }

        let mut answers = Vec::with_capacity(self.answers.len());
        for (i, draft) in self.answers.into_iter().enumerate() {
            let value = draft
                .value
                .ok_or_else(|| ValidationError::required(&format!("answers[{i}].value")))?;
            let question_id =
                opt_non_empty(draft.question_id.as_deref()).unwrap_or_else(|| format!("q{i}"));
            let kind = opt_non_empty(draft.kind.as_deref())
                .or_else(|| question_kind(form, &question_id))
                .ok_or_else(|| ValidationError::required(&format!("answers[{i}].type")))?;
            answers.push(Answer {
                question_id,
                kind,
                value,
                timestamp: draft.timestamp.unwrap_or(now),
            });
        }

        for (i, q) in form.content.questions.iter().enumerate() {
            if !q.required {
                continue;
            }
            let positional = format!("q{i}");
            let answered = answers.iter().any(|a| {
                (a.question_id == q.id || a.question_id == positional) && !is_blank(&a.value)
            });
            if !answered {
                return Err(ValidationError::new(
                    format!("answers.{}", q.id),
                    format!("required question not answered: {}", q.title),
                ));
            }
        }

        let (ip_address, user_agent) = client;
        Ok(Response {
            id,
            form_id: form.id.clone(),
            answers,
            respondent_email,
            ip_address,
            user_agent,
            start_time: self.start_time,
            end_time: now,
            created_at: now,
        })
    }
}

fn question_kind(form: &Form, question_id: &str) -> Option<String> {
    form.content
        .questions
        .iter()
        .enumerate()
        .find(|(i, q)| q.id == question_id || format!("q{i}") == question_id)
        .map(|(_, q)| q.kind.as_str().to_string())
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
