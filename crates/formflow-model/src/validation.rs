// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn required(field: &str) -> Self {
        Self::new(field, format!("{field} is required"))
    }

    #[must_use]
    pub fn too_long(field: &str, max: usize) -> Self {
        Self::new(field, format!("{field} max length is {max} characters"))
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

pub(crate) fn required_trimmed(field: &str, value: Option<&str>) -> Result<String, ValidationError> {
    formflow_core::text::opt_non_empty(value).ok_or_else(|| ValidationError::required(field))
}

pub(crate) fn bounded(field: &str, value: String, max: usize) -> Result<String, ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::too_long(field, max));
    }
    Ok(value)
}
