// SPDX-License-Identifier: Apache-2.0

use formflow_model::{
    Department, Designation, EmployeeProfile, Form, Level, TargetDimension, UserView,
    ValidationError,
};
use formflow_query::{DimensionCount, EnrichedResponse, TargetDecision, TargetProfile};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredResponse {
    pub message: String,
    pub user: UserView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Form listing row with the first target of each dimension surfaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormListItem {
    #[serde(flatten)]
    pub form: Form,
    pub level: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
}

impl From<Form> for FormListItem {
    fn from(form: Form) -> Self {
        let first = |d| form.content.first_target(d).map(str::to_string);
        let level = first(TargetDimension::Level);
        let department = first(TargetDimension::Department);
        let designation = first(TargetDimension::Designation);
        Self {
            form,
            level,
            department,
            designation,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PublishRequest {
    pub is_published: Option<serde_json::Value>,
}

impl PublishRequest {
    /// The flag, only when it is an actual JSON boolean.
    #[must_use]
    pub fn flag(&self) -> Option<bool> {
        self.is_published.as_ref().and_then(serde_json::Value::as_bool)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDto {
    pub total_employees: u64,
    pub total_forms: u64,
    pub total_responses: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsesPage {
    pub responses: Vec<EnrichedResponse>,
    pub counts_by_level: Vec<DimensionCount>,
    pub counts_by_department: Vec<DimensionCount>,
    pub counts_by_designation: Vec<DimensionCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormIdDto {
    pub form_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDecisionDto {
    pub form_id: String,
    pub title: String,
    pub is_published: bool,
    pub visible: bool,
    pub decision: TargetDecision,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetingDebugDto {
    pub profile: EmployeeProfile,
    pub normalized_profile: TargetProfile,
    pub forms: Vec<FormDecisionDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalUsersFallback {
    pub total_users: u64,
    pub message: String,
}

impl TotalUsersFallback {
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            total_users: 0,
            message: "Mock data due to external API failure".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeRegisteredResponse {
    pub message: String,
    pub employee: EmployeeProfile,
}

fn field(value: Option<&String>) -> &str {
    value.map_or("", String::as_str)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepartmentRequest {
    pub dept_id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "levelCategory")]
    pub level_category: Option<String>,
}

impl DepartmentRequest {
    pub fn into_department(self) -> Result<Department, ValidationError> {
        Department::new(
            field(self.dept_id.as_ref()),
            field(self.name.as_ref()),
            field(self.level_category.as_ref()),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelRequest {
    pub level_id: Option<String>,
    pub name: Option<String>,
}

impl LevelRequest {
    pub fn into_level(self) -> Result<Level, ValidationError> {
        Level::new(field(self.level_id.as_ref()), field(self.name.as_ref()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignationRequest {
    pub desig_id: Option<String>,
    pub name: Option<String>,
    pub dept_id: Option<String>,
    pub level_id: Option<String>,
}

impl DesignationRequest {
    pub fn into_designation(self) -> Result<Designation, ValidationError> {
        Designation::new(
            field(self.desig_id.as_ref()),
            field(self.name.as_ref()),
            field(self.dept_id.as_ref()),
            field(self.level_id.as_ref()),
        )
    }
}
