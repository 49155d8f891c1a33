// SPDX-License-Identifier: Apache-2.0

use crate::validation::ValidationError;
use chrono::{DateTime, Utc};
use formflow_core::text::{looks_like_email, normalize_email, opt_non_empty};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Employee => "employee",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "admin" => Some(Self::Admin),
            "employee" => Some(Self::Employee),
            _ => None,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stored account. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    #[must_use]
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
            is_registered: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_registered: bool,
}

/// Registration body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDraft {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub role: Option<String>,
}

/// Checked registration fields: username, normalized e-mail, password, role.
pub type ValidatedUser = (String, String, String, Role);

impl UserDraft {
    pub fn validate(self) -> Result<ValidatedUser, ValidationError> {
        let username = opt_non_empty(self.username.as_deref());
        let email = opt_non_empty(self.email.as_deref());
        let password = self.password.filter(|p| !p.is_empty());
        let confirm = self.confirm_password.filter(|p| !p.is_empty());
        let role = opt_non_empty(self.role.as_deref());
        let (Some(username), Some(email), Some(password), Some(confirm), Some(role)) =
            (username, email, password, confirm, role)
        else {
            return Err(ValidationError::new(
                "body",
                "All fields are required including role",
            ));
        };
        let role = Role::parse(&role).ok_or_else(|| ValidationError::new("role", "Invalid role"))?;
        if !looks_like_email(&email) {
            return Err(ValidationError::new("email", "email is not a valid address"));
        }
        if password != confirm {
            return Err(ValidationError::new(
                "confirmPassword",
                "Passwords do not match",
            ));
        }
        Ok((username, normalize_email(&email), password, role))
    }
}
