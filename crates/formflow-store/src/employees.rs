// SPDX-License-Identifier: Apache-2.0

use crate::{encode_time, Store, StoreError, StoreErrorCode};
use formflow_model::EmployeeProfile;
use rusqlite::{params, OptionalExtension};

impl Store {
    /// Stores a new profile; an existing employee id is a conflict.
    pub fn register_employee(&self, profile: &EmployeeProfile) -> Result<(), StoreError> {
        let doc = serde_json::to_string(profile)?;
        let conn = self.conn()?;
        let result = conn.execute(
            "INSERT INTO employee_profiles (id, employee_id, email, user_id, doc, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                profile.id,
                profile.employee_id,
                profile.email,
                profile.user_id,
                doc,
                encode_time(profile.created_at)
            ],
        );
        match result.map_err(StoreError::from) {
            Ok(_) => Ok(()),
            Err(e) if e.is(StoreErrorCode::Conflict) => Err(StoreError::conflict(
                "Employee with this ID already exists",
            )),
            Err(e) => Err(e),
        }
    }

    /// Most recent profile registered under `email`.
    pub fn employee_by_email(&self, email: &str) -> Result<Option<EmployeeProfile>, StoreError> {
        let conn = self.conn()?;
        let doc: Option<String> = conn
            .query_row(
                "SELECT doc FROM employee_profiles WHERE email = ?1 ORDER BY created_at DESC LIMIT 1",
                params![email],
                |row| row.get(0),
            )
            .optional()?;
        Ok(doc.map(|d| serde_json::from_str(&d)).transpose()?)
    }

    pub fn list_employees(&self) -> Result<Vec<EmployeeProfile>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT doc FROM employee_profiles ORDER BY created_at, id")?;
        let docs = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut out = Vec::new();
        for doc in docs {
            out.push(serde_json::from_str(&doc?)?);
        }
        Ok(out)
    }
}
