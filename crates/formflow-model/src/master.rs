// SPDX-License-Identifier: Apache-2.0

use crate::validation::{required_trimmed, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub dept_id: String,
    pub name: String,
    #[serde(rename = "levelCategory")]
    pub level_category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub level_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Designation {
    pub desig_id: String,
    pub name: String,
    pub dept_id: String,
    pub level_id: String,
}

/// Designation with its level record resolved, as listed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignationWithLevel {
    #[serde(flatten)]
    pub designation: Designation,
    pub level: Option<Level>,
}

impl Department {
    pub fn new(dept_id: &str, name: &str, level_category: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            dept_id: required_trimmed("dept_id", Some(dept_id)).map_err(missing)?,
            name: required_trimmed("name", Some(name)).map_err(missing)?,
            level_category: required_trimmed("levelCategory", Some(level_category))
                .map_err(missing)?,
        })
    }
}

impl Level {
    pub fn new(level_id: &str, name: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            level_id: required_trimmed("level_id", Some(level_id)).map_err(missing)?,
            name: required_trimmed("name", Some(name)).map_err(missing)?,
        })
    }
}

impl Designation {
    pub fn new(
        desig_id: &str,
        name: &str,
        dept_id: &str,
        level_id: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            desig_id: required_trimmed("desig_id", Some(desig_id)).map_err(missing)?,
            name: required_trimmed("name", Some(name)).map_err(missing)?,
            dept_id: required_trimmed("dept_id", Some(dept_id)).map_err(missing)?,
            level_id: required_trimmed("level_id", Some(level_id)).map_err(missing)?,
        })
    }
}

fn missing(err: ValidationError) -> ValidationError {
    ValidationError::new(err.field, "Missing required fields")
}

/// Full reference data snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterData {
    pub departments: Vec<Department>,
    pub levels: Vec<Level>,
    pub designations: Vec<Designation>,
}

impl MasterData {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.departments.is_empty() && self.levels.is_empty() && self.designations.is_empty()
    }

    #[must_use]
    pub fn level(&self, level_id: &str) -> Option<&Level> {
        self.levels.iter().find(|l| l.level_id == level_id)
    }

    #[must_use]
    pub fn department(&self, dept_id: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.dept_id == dept_id)
    }

    /// Levels whose name equals the department's level category.
    #[must_use]
    pub fn levels_for_department(&self, dept_id: &str) -> Option<Vec<Level>> {
        let dept = self.department(dept_id)?;
        Some(
            self.levels
                .iter()
                .filter(|l| l.name == dept.level_category)
                .cloned()
                .collect(),
        )
    }

    #[must_use]
    pub fn designations_with_levels(&self, dept_id: Option<&str>) -> Vec<DesignationWithLevel> {
        self.designations
            .iter()
            .filter(|d| dept_id.map_or(true, |dept| d.dept_id == dept))
            .map(|d| DesignationWithLevel {
                designation: d.clone(),
                level: self.level(&d.level_id).cloned(),
            })
            .collect()
    }
}
