// SPDX-License-Identifier: Apache-2.0

use crate::form::TargetDimension;
use crate::validation::{required_trimmed, ValidationError};
use chrono::{DateTime, NaiveDate, Utc};
use formflow_core::text::{looks_like_email, normalize_email, opt_non_empty};
use serde::{Deserialize, Serialize};

pub const EMPLOYEE_ID_MIN_LEN: usize = 3;
pub const EMPLOYEE_ID_MAX_LEN: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProfile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub employee_id: String,
    pub employee_name: String,
    pub date_of_joining: Option<NaiveDate>,
    pub department: Option<String>,
    pub level: Option<String>,
    pub designation: Option<String>,
    pub reporting_authority_name: Option<String>,
    pub reporting_authority_department: Option<String>,
    pub reporting_authority_level: Option<String>,
    pub reporting_authority_designation: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmployeeProfile {
    /// Raw free-text attribute for a targeting dimension.
    #[must_use]
    pub fn attribute(&self, dimension: TargetDimension) -> Option<&str> {
        match dimension {
            TargetDimension::Level => self.level.as_deref(),
            TargetDimension::Department => self.department.as_deref(),
            TargetDimension::Designation => self.designation.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeProfileDraft {
    pub employee_id: Option<String>,
    pub employee_name: Option<String>,
    pub date_of_joining: Option<String>,
    pub department: Option<String>,
    pub level: Option<String>,
    pub designation: Option<String>,
    pub reporting_authority_name: Option<String>,
    pub reporting_authority_department: Option<String>,
    pub reporting_authority_level: Option<String>,
    pub reporting_authority_designation: Option<String>,
    pub email: Option<String>,
}

impl EmployeeProfileDraft {
    pub fn validate(
        self,
        id: String,
        user_id: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<EmployeeProfile, ValidationError> {
        let (employee_id, employee_name) = match (
            required_trimmed("employeeId", self.employee_id.as_deref()),
            required_trimmed("employeeName", self.employee_name.as_deref()),
        ) {
            (Ok(id), Ok(name)) => (id, name),
            (Err(e), _) | (_, Err(e)) => {
                return Err(ValidationError::new(
                    e.field,
                    "Employee ID and Name are required",
                ))
            }
        };
        let len = employee_id.chars().count();
        if !(EMPLOYEE_ID_MIN_LEN..=EMPLOYEE_ID_MAX_LEN).contains(&len) {
            return Err(ValidationError::new(
                "employeeId",
                format!(
                    "employeeId must be between {EMPLOYEE_ID_MIN_LEN} and {EMPLOYEE_ID_MAX_LEN} characters"
                ),
            ));
        }
        let email = match opt_non_empty(self.email.as_deref()) {
            Some(raw) if !looks_like_email(&raw) => {
                return Err(ValidationError::new("email", "email is not a valid address"))
            }
            other => other.map(|e| normalize_email(&e)),
        };
        let date_of_joining = match opt_non_empty(self.date_of_joining.as_deref()) {
            Some(raw) => Some(parse_date(&raw)?),
            None => None,
        };
        Ok(EmployeeProfile {
            id,
            user_id,
            email,
            employee_id,
            employee_name,
            date_of_joining,
            department: opt_non_empty(self.department.as_deref()),
            level: opt_non_empty(self.level.as_deref()),
            designation: opt_non_empty(self.designation.as_deref()),
            reporting_authority_name: opt_non_empty(self.reporting_authority_name.as_deref()),
            reporting_authority_department: opt_non_empty(
                self.reporting_authority_department.as_deref(),
            ),
            reporting_authority_level: opt_non_empty(self.reporting_authority_level.as_deref()),
            reporting_authority_designation: opt_non_empty(
                self.reporting_authority_designation.as_deref(),
            ),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Accepts a plain `YYYY-MM-DD` date or a full RFC 3339 timestamp.
fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| ValidationError::new("dateOfJoining", "dateOfJoining is not a valid date"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> EmployeeProfileDraft {
        EmployeeProfileDraft {
            employee_id: Some(" EMP001 ".into()),
            employee_name: Some("Asha Rao".into()),
            level: Some(" Strategic ".into()),
            email: Some("Asha@Org.in".into()),
            date_of_joining: Some("2023-04-01T00:00:00Z".into()),
            ..EmployeeProfileDraft::default()
        }
    }

    #[test]
    fn validate_normalizes_fields() {
        let p = draft()
            .validate("p1".into(), None, Utc::now())
            .expect("valid");
        assert_eq!(p.employee_id, "EMP001");
        assert_eq!(p.level.as_deref(), Some("Strategic"));
        assert_eq!(p.email.as_deref(), Some("asha@org.in"));
        assert_eq!(
            p.date_of_joining,
            NaiveDate::from_ymd_opt(2023, 4, 1)
        );
        assert_eq!(p.department, None);
        assert_eq!(p.attribute(TargetDimension::Level), Some("Strategic"));
    }

    #[test]
    fn validate_rejects_missing_or_short_ids() {
        let mut d = draft();
        d.employee_name = None;
        let err = d.validate("p".into(), None, Utc::now()).expect_err("name");
        assert_eq!(err.message, "Employee ID and Name are required");

        let mut d = draft();
        d.employee_id = Some("E1".into());
        assert!(d.validate("p".into(), None, Utc::now()).is_err());
    }

    #[test]
    fn validate_rejects_bad_email_and_date() {
        let mut d = draft();
        d.email = Some("not-an-email".into());
        assert_eq!(
            d.validate("p".into(), None, Utc::now()).expect_err("email").field,
            "email"
        );
        let mut d = draft();
        d.date_of_joining = Some("yesterday".into());
        assert_eq!(
            d.validate("p".into(), None, Utc::now()).expect_err("date").field,
            "dateOfJoining"
        );
    }
}
