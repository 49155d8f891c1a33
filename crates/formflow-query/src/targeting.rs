// SPDX-License-Identifier: Apache-2.0

//! Form visibility for employees.
//!
//! Both sides of the comparison go through [`MasterIndex`]: a profile value
//! or a form target entry may be a master-data id ("L001") or a display name
//! ("Strategic"), in any case or spacing. Each resolves to the set of
//! canonical ids it can denote. Values unknown to the master data resolve
//! to their own normalized text, so literal matches still work.

use crate::normalize::normalize_key;
use formflow_model::{EmployeeProfile, Form, FormContent, MasterData, TargetDimension};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

type Candidates = BTreeSet<String>;

#[derive(Debug, Clone, Default)]
struct DimensionIndex {
    ids: BTreeSet<String>,
    names: BTreeMap<String, Candidates>,
}

impl DimensionIndex {
    fn insert(&mut self, id: &str, name: &str) {
        let id = normalize_key(id);
        if id.is_empty() {
            return;
        }
        self.ids.insert(id.clone());
        let name = normalize_key(name);
        if !name.is_empty() {
            self.names.entry(name).or_default().insert(id);
        }
    }

    fn candidates(&self, raw: &str) -> Option<Candidates> {
        let key = normalize_key(raw);
        if key.is_empty() {
            return None;
        }
        if self.ids.contains(&key) {
            return Some(BTreeSet::from([key]));
        }
        Some(
            self.names
                .get(&key)
                .cloned()
                .unwrap_or_else(|| BTreeSet::from([key])),
        )
    }
}

/// Alias lookup built from the master data.
#[derive(Debug, Clone, Default)]
pub struct MasterIndex {
    levels: DimensionIndex,
    departments: DimensionIndex,
    designations: DimensionIndex,
}

impl MasterIndex {
    #[must_use]
    pub fn from_master(master: &MasterData) -> Self {
        let mut index = Self::default();
        for l in &master.levels {
            index.levels.insert(&l.level_id, &l.name);
        }
        for d in &master.departments {
            index.departments.insert(&d.dept_id, &d.name);
        }
        for d in &master.designations {
            index.designations.insert(&d.desig_id, &d.name);
        }
        index
    }

    fn dimension(&self, dimension: TargetDimension) -> &DimensionIndex {
        match dimension {
            TargetDimension::Level => &self.levels,
            TargetDimension::Department => &self.departments,
            TargetDimension::Designation => &self.designations,
        }
    }

    /// Canonical ids `raw` may denote; `None` for blank input.
    #[must_use]
    pub fn canonical(&self, dimension: TargetDimension, raw: &str) -> Option<BTreeSet<String>> {
        self.dimension(dimension).candidates(raw)
    }

    /// Union of the canonical ids of every entry in `values`.
    #[must_use]
    pub fn canonical_set(&self, dimension: TargetDimension, values: &[String]) -> BTreeSet<String> {
        values
            .iter()
            .filter_map(|v| self.canonical(dimension, v))
            .flatten()
            .collect()
    }
}

/// Normalized organizational position of one employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TargetProfile {
    pub level: Option<BTreeSet<String>>,
    pub department: Option<BTreeSet<String>>,
    pub designation: Option<BTreeSet<String>>,
}

impl TargetProfile {
    #[must_use]
    pub fn from_values(
        index: &MasterIndex,
        level: Option<&str>,
        department: Option<&str>,
        designation: Option<&str>,
    ) -> Self {
        Self {
            level: level.and_then(|v| index.canonical(TargetDimension::Level, v)),
            department: department.and_then(|v| index.canonical(TargetDimension::Department, v)),
            designation: designation
                .and_then(|v| index.canonical(TargetDimension::Designation, v)),
        }
    }

    #[must_use]
    pub fn from_employee(index: &MasterIndex, profile: &EmployeeProfile) -> Self {
        Self::from_values(
            index,
            profile.level.as_deref(),
            profile.department.as_deref(),
            profile.designation.as_deref(),
        )
    }

    #[must_use]
    pub fn get(&self, dimension: TargetDimension) -> Option<&BTreeSet<String>> {
        match dimension {
            TargetDimension::Level => self.level.as_ref(),
            TargetDimension::Department => self.department.as_ref(),
            TargetDimension::Designation => self.designation.as_ref(),
        }
    }
}

/// Canonical target sets of one form; an empty set means unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormTargets {
    pub levels: BTreeSet<String>,
    pub departments: BTreeSet<String>,
    pub designations: BTreeSet<String>,
}

impl FormTargets {
    #[must_use]
    pub fn from_form(index: &MasterIndex, content: &FormContent) -> Self {
        Self {
            levels: index.canonical_set(TargetDimension::Level, &content.target_levels),
            departments: index
                .canonical_set(TargetDimension::Department, &content.target_departments),
            designations: index
                .canonical_set(TargetDimension::Designation, &content.target_designations),
        }
    }

    #[must_use]
    pub fn get(&self, dimension: TargetDimension) -> &BTreeSet<String> {
        match dimension {
            TargetDimension::Level => &self.levels,
            TargetDimension::Department => &self.departments,
            TargetDimension::Designation => &self.designations,
        }
    }
}

/// Optional relaxation of the matching rules.
///
/// With `level_override` set, an employee at that level sees every form that
/// targets the level, whatever its department and designation targets say.
/// Off unless configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TargetingPolicy {
    pub level_override: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionOutcome {
    Unrestricted,
    Matched,
    Mismatched,
    MissingProfileValue,
    Overridden,
}

impl DimensionOutcome {
    #[must_use]
    pub const fn admits(self) -> bool {
        matches!(self, Self::Unrestricted | Self::Matched | Self::Overridden)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TargetDecision {
    pub level: DimensionOutcome,
    pub department: DimensionOutcome,
    pub designation: DimensionOutcome,
}

impl TargetDecision {
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.level.admits() && self.department.admits() && self.designation.admits()
    }

    #[must_use]
    pub const fn get(&self, dimension: TargetDimension) -> DimensionOutcome {
        match dimension {
            TargetDimension::Level => self.level,
            TargetDimension::Department => self.department,
            TargetDimension::Designation => self.designation,
        }
    }
}

fn outcome(profile: Option<&BTreeSet<String>>, targets: &BTreeSet<String>) -> DimensionOutcome {
    if targets.is_empty() {
        return DimensionOutcome::Unrestricted;
    }
    match profile {
        None => DimensionOutcome::MissingProfileValue,
        Some(values) if values.iter().any(|v| targets.contains(v)) => DimensionOutcome::Matched,
        Some(_) => DimensionOutcome::Mismatched,
    }
}

/// The single place that decides whether an employee may see a form.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    index: MasterIndex,
    policy: TargetingPolicy,
}

impl Resolver {
    #[must_use]
    pub fn new(master: &MasterData, policy: TargetingPolicy) -> Self {
        Self {
            index: MasterIndex::from_master(master),
            policy,
        }
    }

    #[must_use]
    pub fn index(&self) -> &MasterIndex {
        &self.index
    }

    #[must_use]
    pub fn profile(&self, employee: &EmployeeProfile) -> TargetProfile {
        TargetProfile::from_employee(&self.index, employee)
    }

    #[must_use]
    pub fn decide(&self, profile: &TargetProfile, content: &FormContent) -> TargetDecision {
        let targets = FormTargets::from_form(&self.index, content);
        let level = outcome(profile.level.as_ref(), &targets.levels);

        if level == DimensionOutcome::Matched && self.override_applies(profile) {
            let override_levels = self.override_levels();
            if targets.levels.iter().any(|l| override_levels.contains(l)) {
                return TargetDecision {
                    level,
                    department: DimensionOutcome::Overridden,
                    designation: DimensionOutcome::Overridden,
                };
            }
        }

        TargetDecision {
            level,
            department: outcome(profile.department.as_ref(), &targets.departments),
            designation: outcome(profile.designation.as_ref(), &targets.designations),
        }
    }

    #[must_use]
    pub fn is_visible(&self, profile: &TargetProfile, content: &FormContent) -> bool {
        self.decide(profile, content).is_visible()
    }

    /// Forms from `forms` visible to `profile`, in input order.
    #[must_use]
    pub fn visible_forms<'a>(&self, profile: &TargetProfile, forms: &'a [Form]) -> Vec<&'a Form> {
        forms
            .iter()
            .filter(|f| self.is_visible(profile, &f.content))
            .collect()
    }

    fn override_levels(&self) -> BTreeSet<String> {
        self.policy
            .level_override
            .as_deref()
            .and_then(|raw| self.index.canonical(TargetDimension::Level, raw))
            .unwrap_or_default()
    }

    fn override_applies(&self, profile: &TargetProfile) -> bool {
        let levels = self.override_levels();
        !levels.is_empty()
            && profile
                .level
                .as_ref()
                .is_some_and(|own| own.iter().any(|l| levels.contains(l)))
    }
}
