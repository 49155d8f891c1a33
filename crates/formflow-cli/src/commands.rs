// SPDX-License-Identifier: Apache-2.0

use chrono::Utc;
use formflow_api::openapi_spec;
use formflow_core::text::normalize_email;
use formflow_core::ExitCode;
use formflow_query::{Resolver, TargetingPolicy};
use formflow_store::{Store, StoreError};
use serde_json::{json, Value};
use std::fmt::{Display, Formatter};
use std::path::Path;
use tracing::info;

#[derive(Debug)]
pub enum CliError {
    Store(StoreError),
    Io(String),
    Validation(String),
}

impl CliError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Store(_) => ExitCode::DependencyFailure,
            Self::Io(_) => ExitCode::Internal,
            Self::Validation(_) => ExitCode::Validation,
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(e) => write!(f, "store error: {e}"),
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Validation(e) => write!(f, "{e}"),
        }
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

/// Result of a command: a line for people and a document for `--json`.
pub struct Output {
    pub human: String,
    pub json: Value,
}

pub fn emit(output: &Output, machine_json: bool) -> Result<(), CliError> {
    if machine_json {
        let text = serde_json::to_string_pretty(&output.json)
            .map_err(|e| CliError::Io(format!("encode output: {e}")))?;
        println!("{text}");
    } else {
        println!("{}", output.human);
    }
    Ok(())
}

fn open(db: &Path) -> Result<Store, CliError> {
    Ok(Store::open(db)?)
}

pub fn seed_master(db: &Path, force: bool) -> Result<Output, CliError> {
    let store = open(db)?;
    let master = store.seed_master_data(force)?;
    Ok(Output {
        human: format!(
            "seeded {} departments, {} levels, {} designations",
            master.departments.len(),
            master.levels.len(),
            master.designations.len()
        ),
        json: json!({
            "departments": master.departments.len(),
            "levels": master.levels.len(),
            "designations": master.designations.len(),
            "replaced": force,
        }),
    })
}

pub fn publish_all(db: &Path) -> Result<Output, CliError> {
    let store = open(db)?;
    let outcome = store.publish_all_forms(Utc::now())?;
    info!(matched = outcome.matched, modified = outcome.modified, "publish-all done");
    Ok(Output {
        human: format!(
            "matched {} forms, published {}",
            outcome.matched, outcome.modified
        ),
        json: json!({"matched": outcome.matched, "modified": outcome.modified}),
    })
}

pub fn debug_targeting(
    db: &Path,
    email: Option<&str>,
    level_override: Option<String>,
) -> Result<Output, CliError> {
    let store = open(db)?;
    let master = store.master_snapshot()?;
    let forms = store.list_published_forms()?;
    let employees = match email {
        Some(raw) => {
            let wanted = normalize_email(raw);
            let profile = store.employee_by_email(&wanted)?.ok_or_else(|| {
                CliError::Validation(format!("no employee profile for {wanted}"))
            })?;
            vec![profile]
        }
        None => store.list_employees()?,
    };
    let resolver = Resolver::new(&master, TargetingPolicy { level_override });

    let mut human = Vec::new();
    let mut report = Vec::new();
    for employee in &employees {
        let profile = resolver.profile(employee);
        let visible = resolver.visible_forms(&profile, &forms);
        human.push(format!(
            "{} ({}): {} of {} published forms visible{}",
            employee.employee_id,
            employee.email.as_deref().unwrap_or("-"),
            visible.len(),
            forms.len(),
            visible
                .iter()
                .map(|f| format!("\n  - {} [{}]", f.content.title, f.id))
                .collect::<String>()
        ));
        report.push(json!({
            "employeeId": employee.employee_id,
            "email": employee.email,
            "normalizedProfile": profile,
            "visibleForms": visible
                .iter()
                .map(|f| json!({"formId": f.id, "title": f.content.title}))
                .collect::<Vec<_>>(),
        }));
    }
    if human.is_empty() {
        human.push("no employee profiles".to_string());
    }
    Ok(Output {
        human: human.join("\n"),
        json: json!({"publishedForms": forms.len(), "employees": report}),
    })
}

pub fn openapi(out: Option<&Path>) -> Result<Output, CliError> {
    let spec = openapi_spec();
    let text = serde_json::to_string_pretty(&spec)
        .map_err(|e| CliError::Io(format!("encode openapi: {e}")))?;
    match out {
        Some(path) => {
            std::fs::write(path, format!("{text}\n"))
                .map_err(|e| CliError::Io(format!("write {}: {e}", path.display())))?;
            Ok(Output {
                human: format!("wrote {}", path.display()),
                json: json!({"written": path.display().to_string()}),
            })
        }
        None => Ok(Output { human: text, json: spec }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_all_reports_counts_on_an_empty_db() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let db = tmp.path().join("ff.sqlite");
        let out = publish_all(&db).expect("publish-all");
        assert_eq!(out.json["matched"], 0);
        assert_eq!(out.json["modified"], 0);
    }

    #[test]
    fn unknown_email_is_a_validation_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let db = tmp.path().join("ff.sqlite");
        let err = debug_targeting(&db, Some("ghost@org.in"), None)
            .err()
            .expect("missing profile");
        assert!(matches!(err.exit_code(), ExitCode::Validation));
    }
}
