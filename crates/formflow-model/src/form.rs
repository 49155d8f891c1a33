// SPDX-License-Identifier: Apache-2.0

use crate::validation::{bounded, required_trimmed, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const TITLE_MAX_LEN: usize = 200;
pub const DESCRIPTION_MAX_LEN: usize = 1000;
pub const QUESTION_TITLE_MAX_LEN: usize = 500;
pub const DEFAULT_HEADER_COLOR: &str = "#1976d2";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum QuestionType {
    Short,
    Paragraph,
    Multiple,
    Checkbox,
    Dropdown,
    Linear,
    Grid,
    Email,
    Number,
    Phone,
    Url,
    CheckboxGrid,
    Date,
    Time,
}

impl QuestionType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Paragraph => "paragraph",
            Self::Multiple => "multiple",
            Self::Checkbox => "checkbox",
            Self::Dropdown => "dropdown",
            Self::Linear => "linear",
            Self::Grid => "grid",
            Self::Email => "email",
            Self::Number => "number",
            Self::Phone => "phone",
            Self::Url => "url",
            Self::CheckboxGrid => "checkboxGrid",
            Self::Date => "date",
            Self::Time => "time",
        }
    }

    #[must_use]
    pub const fn is_grid(self) -> bool {
        matches!(self, Self::Grid | Self::CheckboxGrid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub text: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinearScale {
    pub min: i64,
    pub max: i64,
    pub min_label: String,
    pub max_label: String,
}

impl Default for LinearScale {
    fn default() -> Self {
        Self {
            min: 1,
            max: 5,
            min_label: String::new(),
            max_label: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionSettings {
    pub shuffle_options: bool,
    pub linear_scale: LinearScale,
    pub grid: GridSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub title: String,
    pub description: String,
    pub required: bool,
    pub options: Vec<QuestionOption>,
    pub settings: QuestionSettings,
}

/// Question as submitted by the form builder; ids are optional on creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionDraft {
    #[serde(rename = "_id", alias = "id")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<QuestionType>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub required: bool,
    pub options: Vec<QuestionOption>,
    pub settings: QuestionSettings,
}

impl QuestionDraft {
    pub fn validate(self, index: usize) -> Result<Question, ValidationError> {
        let field = |name: &str| format!("questions[{index}].{name}");
        let kind = self
            .kind
            .ok_or_else(|| ValidationError::required(&field("type")))?;
        let title = required_trimmed(&field("title"), self.title.as_deref())
            .map_err(|_| ValidationError::new(field("title"), "Question title is required"))?;
        let title = bounded(&field("title"), title, QUESTION_TITLE_MAX_LEN)?;
        let description = bounded(
            &field("description"),
            self.description.unwrap_or_default().trim().to_string(),
            DESCRIPTION_MAX_LEN,
        )?;
        for (i, option) in self.options.iter().enumerate() {
            if option.text.trim().is_empty() || option.value.trim().is_empty() {
                return Err(ValidationError::new(
                    field(&format!("options[{i}]")),
                    "option text and value are required",
                ));
            }
        }
        if kind == QuestionType::Linear
            && self.settings.linear_scale.min >= self.settings.linear_scale.max
        {
            return Err(ValidationError::new(
                field("settings.linearScale"),
                "linear scale min must be below max",
            ));
        }
        if kind.is_grid()
            && (self.settings.grid.rows.is_empty() || self.settings.grid.columns.is_empty())
        {
            return Err(ValidationError::new(
                field("settings.grid"),
                "grid questions need at least one row and one column",
            ));
        }
        let id = self
            .id
            .and_then(|id| formflow_core::text::opt_non_empty(Some(&id)))
            .unwrap_or_else(crate::new_id);
        Ok(Question {
            id,
            kind,
            title,
            description,
            required: self.required,
            options: self.options,
            settings: self.settings,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub header: String,
    pub background: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER_COLOR.to_string(),
            background: DEFAULT_BACKGROUND_COLOR.to_string(),
        }
    }
}

impl Theme {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_hex_color(&self.header) {
            return Err(ValidationError::new(
                "theme.header",
                "Header color must be a valid hex code",
            ));
        }
        if !is_hex_color(&self.background) {
            return Err(ValidationError::new(
                "theme.background",
                "Background color must be a valid hex code",
            ));
        }
        Ok(())
    }
}

fn is_hex_color(raw: &str) -> bool {
    raw.strip_prefix('#').is_some_and(|digits| {
        matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormSettings {
    pub collect_email: bool,
    pub limit_one_response: bool,
    pub show_progress: bool,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            collect_email: false,
            limit_one_response: false,
            show_progress: true,
        }
    }
}

/// Organizational axis a form can be restricted along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetDimension {
    Level,
    Department,
    Designation,
}

impl TargetDimension {
    pub const ALL: [Self; 3] = [Self::Level, Self::Department, Self::Designation];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Level => "level",
            Self::Department => "department",
            Self::Designation => "designation",
        }
    }
}

/// Validated, editable part of a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormContent {
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
    pub theme: Theme,
    pub settings: FormSettings,
    pub created_by: String,
    pub is_published: bool,
    pub target_levels: Vec<String>,
    pub target_departments: Vec<String>,
    pub target_designations: Vec<String>,
}

impl FormContent {
    #[must_use]
    pub fn targets(&self, dimension: TargetDimension) -> &[String] {
        match dimension {
            TargetDimension::Level => &self.target_levels,
            TargetDimension::Department => &self.target_departments,
            TargetDimension::Designation => &self.target_designations,
        }
    }

    #[must_use]
    pub fn first_target(&self, dimension: TargetDimension) -> Option<&str> {
        self.targets(dimension).first().map(String::as_str)
    }

    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        TargetDimension::ALL
            .iter()
            .all(|d| self.targets(*d).is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    #[serde(rename = "_id")]
    pub id: String,
    pub short_id: String,
    #[serde(flatten)]
    pub content: FormContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Form {
    /// Title of the question with `question_id`; answers without a stored id
    /// use the positional `q{index}` form.
    #[must_use]
    pub fn question_title(&self, question_id: &str) -> Option<&str> {
        self.content
            .questions
            .iter()
            .enumerate()
            .find(|(i, q)| q.id == question_id || format!("q{i}") == question_id)
            .map(|(_, q)| q.title.as_str())
    }
}

/// Form body as received from the builder. Everything is optional so that
/// missing fields surface as validation errors instead of decode failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub questions: Option<Vec<QuestionDraft>>,
    pub theme: Option<Theme>,
    pub settings: Option<FormSettings>,
    pub created_by: Option<String>,
    pub is_published: Option<bool>,
    pub target_levels: Option<Vec<String>>,
    pub target_departments: Option<Vec<String>>,
    pub target_designations: Option<Vec<String>>,
}

impl FormDraft {
    /// Validates a brand new form.
    pub fn validate(self) -> Result<FormContent, ValidationError> {
        let created_by = required_trimmed("createdBy", self.created_by.as_deref())
            .map_err(|_| ValidationError::new("createdBy", "Form creator ID is required"))?;
        let questions = self.questions.clone().unwrap_or_default();
        self.build(created_by, questions, Theme::default(), FormSettings::default(), false)
    }

    /// Validates a replacement for `existing`; omitted parts keep their stored values.
    pub fn validate_update(self, existing: &FormContent) -> Result<FormContent, ValidationError> {
        let created_by = formflow_core::text::opt_non_empty(self.created_by.as_deref())
            .unwrap_or_else(|| existing.created_by.clone());
        let questions = match self.questions.clone() {
            Some(drafts) => drafts,
            None => existing
                .questions
                .iter()
                .cloned()
                .map(QuestionDraft::from)
                .collect(),
        };
        self.build(
            created_by,
            questions,
            existing.theme.clone(),
            existing.settings.clone(),
            existing.is_published,
        )
    }

    fn build(
        self,
        created_by: String,
        questions: Vec<QuestionDraft>,
        fallback_theme: Theme,
        fallback_settings: FormSettings,
        fallback_published: bool,
    ) -> Result<FormContent, ValidationError> {
        let title = required_trimmed("title", self.title.as_deref())
            .map_err(|_| ValidationError::new("title", "Form title is required"))?;
        let title = bounded("title", title, TITLE_MAX_LEN)?;
        let description = bounded(
            "description",
            self.description.unwrap_or_default().trim().to_string(),
            DESCRIPTION_MAX_LEN,
        )?;
        if questions.is_empty() {
            return Err(ValidationError::new(
                "questions",
                "Form must contain at least one question",
            ));
        }
        let questions = questions
            .into_iter()
            .enumerate()
            .map(|(i, q)| q.validate(i))
            .collect::<Result<Vec<_>, _>>()?;
        let mut seen = BTreeSet::new();
        if let Some(dup) = questions.iter().find(|q| !seen.insert(q.id.as_str())) {
            return Err(ValidationError::new(
                "questions",
                format!("duplicate question id {}", dup.id),
            ));
        }
        let theme = self.theme.unwrap_or(fallback_theme);
        theme.validate()?;

        Ok(FormContent {
            title,
            description,
            questions,
            theme,
            settings: self.settings.unwrap_or(fallback_settings),
            created_by,
            is_published: self.is_published.unwrap_or(fallback_published),
            target_levels: clean_targets(self.target_levels),
            target_departments: clean_targets(self.target_departments),
            target_designations: clean_targets(self.target_designations),
        })
    }
}

impl From<Question> for QuestionDraft {
    fn from(q: Question) -> Self {
        Self {
            id: Some(q.id),
            kind: Some(q.kind),
            title: Some(q.title),
            description: Some(q.description),
            required: q.required,
            options: q.options,
            settings: q.settings,
        }
    }
}

/// Trims entries, drops blanks and keeps the first occurrence of each value.
fn clean_targets(raw: Option<Vec<String>>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    raw.unwrap_or_default()
        .into_iter()
        .filter_map(|t| formflow_core::text::opt_non_empty(Some(&t)))
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(title: &str) -> QuestionDraft {
        QuestionDraft {
            kind: Some(QuestionType::Short),
            title: Some(title.to_string()),
            ..QuestionDraft::default()
        }
    }

    fn draft() -> FormDraft {
        FormDraft {
            title: Some("  Pulse survey ".to_string()),
            created_by: Some("admin-1".to_string()),
            questions: Some(vec![question("How are you?")]),
            ..FormDraft::default()
        }
    }

    #[test]
    fn validate_trims_and_applies_defaults() {
        let content = draft().validate().expect("valid");
        assert_eq!(content.title, "Pulse survey");
        assert_eq!(content.theme, Theme::default());
        assert!(content.settings.show_progress);
        assert!(!content.is_published);
        assert!(content.is_unrestricted());
        assert!(!content.questions[0].id.is_empty());
    }

    #[test]
    fn validate_requires_title_creator_and_questions() {
        let mut d = draft();
        d.title = Some("   ".into());
        assert_eq!(d.validate().expect_err("title").field, "title");

        let mut d = draft();
        d.created_by = None;
        assert_eq!(d.validate().expect_err("creator").field, "createdBy");

        let mut d = draft();
        d.questions = Some(vec![]);
        let err = d.validate().expect_err("questions");
        assert_eq!(err.message, "Form must contain at least one question");
    }

    #[test]
    fn validate_rejects_long_title_and_bad_theme() {
        let mut d = draft();
        d.title = Some("x".repeat(TITLE_MAX_LEN + 1));
        assert!(d.validate().is_err());

        let mut d = draft();
        d.theme = Some(Theme {
            header: "blue".into(),
            background: "#fff".into(),
        });
        assert_eq!(d.validate().expect_err("theme").field, "theme.header");
    }

    #[test]
    fn targets_are_cleaned_and_deduplicated() {
        let mut d = draft();
        d.target_levels = Some(vec![" L001 ".into(), "".into(), "L001".into(), "L002".into()]);
        let content = d.validate().expect("valid");
        assert_eq!(content.target_levels, vec!["L001", "L002"]);
        assert_eq!(content.first_target(TargetDimension::Level), Some("L001"));
        assert_eq!(content.first_target(TargetDimension::Department), None);
    }

    #[test]
    fn update_keeps_omitted_parts() {
        let mut d = draft();
        d.is_published = Some(true);
        d.settings = Some(FormSettings {
            limit_one_response: true,
            ..FormSettings::default()
        });
        let existing = d.validate().expect("valid");
        let update = FormDraft {
            title: Some("Renamed".into()),
            ..FormDraft::default()
        };
        let updated = update.validate_update(&existing).expect("update");
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.created_by, "admin-1");
        assert!(updated.is_published);
        assert!(updated.settings.limit_one_response);
        assert_eq!(updated.questions, existing.questions);
    }

    #[test]
    fn grid_and_linear_settings_are_checked() {
        let mut q = question("Rate");
        q.kind = Some(QuestionType::Linear);
        q.settings.linear_scale.min = 5;
        q.settings.linear_scale.max = 5;
        assert!(q.validate(0).is_err());

        let mut q = question("Grid");
        q.kind = Some(QuestionType::CheckboxGrid);
        assert!(q.clone().validate(0).is_err());
        q.settings.grid.rows = vec!["r".into()];
        q.settings.grid.columns = vec!["c".into()];
        assert!(q.validate(0).is_ok());
    }

    #[test]
    fn hex_colors() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#1976D2"));
        assert!(!is_hex_color("#ffff"));
        assert!(!is_hex_color("fff"));
        assert!(!is_hex_color("#ggg"));
    }

    #[test]
    fn question_type_wire_names() {
        let v = serde_json::to_value(QuestionType::CheckboxGrid).expect("serialize");
        assert_eq!(v, "checkboxGrid");
        assert_eq!(QuestionType::CheckboxGrid.as_str(), "checkboxGrid");
        let parsed: QuestionType = serde_json::from_str("\"dropdown\"").expect("parse");
        assert_eq!(parsed, QuestionType::Dropdown);
    }
}
