// SPDX-License-Identifier: Apache-2.0

use crate::seed::{SEED_DEPARTMENTS, SEED_DESIGNATIONS, SEED_LEVELS};
use crate::{Store, StoreError, StoreErrorCode};
use formflow_model::{Department, Designation, DesignationWithLevel, Level, MasterData};
use rusqlite::{params, Connection};

fn conflict_as(message: &'static str) -> impl FnOnce(StoreError) -> StoreError {
    move |e| {
        if e.is(StoreErrorCode::Conflict) {
            StoreError::conflict(message)
        } else {
            e
        }
    }
}

fn departments(conn: &Connection) -> Result<Vec<Department>, StoreError> {
    let mut stmt =
        conn.prepare("SELECT dept_id, name, level_category FROM departments ORDER BY dept_id")?;
    let rows = stmt.query_map([], |row| {
        Ok(Department {
            dept_id: row.get(0)?,
            name: row.get(1)?,
            level_category: row.get(2)?,
        })
    })?;
    Ok(rows.collect::<Result<_, _>>()?)
}

fn levels(conn: &Connection) -> Result<Vec<Level>, StoreError> {
    let mut stmt = conn.prepare("SELECT level_id, name FROM levels ORDER BY level_id")?;
    let rows = stmt.query_map([], |row| {
        Ok(Level {
            level_id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;
    Ok(rows.collect::<Result<_, _>>()?)
}

fn designations(conn: &Connection) -> Result<Vec<Designation>, StoreError> {
    let mut stmt = conn
        .prepare("SELECT desig_id, name, dept_id, level_id FROM designations ORDER BY desig_id")?;
    let rows = stmt.query_map([], |row| {
        Ok(Designation {
            desig_id: row.get(0)?,
            name: row.get(1)?,
            dept_id: row.get(2)?,
            level_id: row.get(3)?,
        })
    })?;
    Ok(rows.collect::<Result<_, _>>()?)
}

fn snapshot(conn: &Connection) -> Result<MasterData, StoreError> {
    Ok(MasterData {
        departments: departments(conn)?,
        levels: levels(conn)?,
        designations: designations(conn)?,
    })
}

fn delete_by_id(
    conn: &Connection,
    table: &str,
    column: &str,
    id: &str,
    missing: &str,
) -> Result<(), StoreError> {
    let removed = conn.execute(&format!("DELETE FROM {table} WHERE {column} = ?1"), params![id])?;
    if removed == 0 {
        return Err(StoreError::not_found(missing));
    }
    Ok(())
}

impl Store {
    pub fn add_department(&self, department: &Department) -> Result<(), StoreError> {
        self.conn()?
            .execute(
                "INSERT INTO departments (dept_id, name, level_category) VALUES (?1, ?2, ?3)",
                params![department.dept_id, department.name, department.level_category],
            )
            .map(|_| ())
            .map_err(StoreError::from)
            .map_err(conflict_as("Department already exists"))
    }

    pub fn delete_department(&self, dept_id: &str) -> Result<(), StoreError> {
        delete_by_id(&*self.conn()?, "departments", "dept_id", dept_id, "Department not found")
    }

    pub fn list_departments(&self) -> Result<Vec<Department>, StoreError> {
        departments(&*self.conn()?)
    }

    pub fn add_level(&self, level: &Level) -> Result<(), StoreError> {
        self.conn()?
            .execute(
                "INSERT INTO levels (level_id, name) VALUES (?1, ?2)",
                params![level.level_id, level.name],
            )
            .map(|_| ())
            .map_err(StoreError::from)
            .map_err(conflict_as("Level already exists"))
    }

    pub fn delete_level(&self, level_id: &str) -> Result<(), StoreError> {
        delete_by_id(&*self.conn()?, "levels", "level_id", level_id, "Level not found")
    }

    pub fn list_levels(&self) -> Result<Vec<Level>, StoreError> {
        levels(&*self.conn()?)
    }

    /// Levels named like the department's level category.
    pub fn levels_for_department(&self, dept_id: &str) -> Result<Vec<Level>, StoreError> {
        snapshot(&*self.conn()?)?
            .levels_for_department(dept_id)
            .ok_or_else(|| StoreError::not_found("Department not found"))
    }

    pub fn add_designation(&self, designation: &Designation) -> Result<(), StoreError> {
        self.conn()?
            .execute(
                "INSERT INTO designations (desig_id, name, dept_id, level_id) VALUES (?1, ?2, ?3, ?4)",
                params![
                    designation.desig_id,
                    designation.name,
                    designation.dept_id,
                    designation.level_id
                ],
            )
            .map(|_| ())
            .map_err(StoreError::from)
            .map_err(conflict_as("Designation already exists"))
    }

    pub fn delete_designation(&self, desig_id: &str) -> Result<(), StoreError> {
        delete_by_id(
            &*self.conn()?,
            "designations",
            "desig_id",
            desig_id,
            "Designation not found",
        )
    }

    /// Designations, optionally of one department, each with its level.
    pub fn designations_with_levels(
        &self,
        dept_id: Option<&str>,
    ) -> Result<Vec<DesignationWithLevel>, StoreError> {
        Ok(snapshot(&*self.conn()?)?.designations_with_levels(dept_id))
    }

    pub fn master_snapshot(&self) -> Result<MasterData, StoreError> {
        snapshot(&*self.conn()?)
    }

    /// Loads the organization's reference data. Existing rows are replaced
    /// when `replace` is set, otherwise seed ids already present are skipped.
    pub fn seed_master_data(&self, replace: bool) -> Result<MasterData, StoreError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        if replace {
            tx.execute_batch("DELETE FROM designations; DELETE FROM levels; DELETE FROM departments;")?;
        }
        for (id, name, category) in SEED_DEPARTMENTS {
            tx.execute(
                "INSERT OR IGNORE INTO departments (dept_id, name, level_category) VALUES (?1, ?2, ?3)",
                params![id, name, category],
            )?;
        }
        for (id, name) in SEED_LEVELS {
            tx.execute(
                "INSERT OR IGNORE INTO levels (level_id, name) VALUES (?1, ?2)",
                params![id, name],
            )?;
        }
        for (id, name, dept_id, level_id) in SEED_DESIGNATIONS {
            tx.execute(
                "INSERT OR IGNORE INTO designations (desig_id, name, dept_id, level_id) VALUES (?1, ?2, ?3, ?4)",
                params![id, name, dept_id, level_id],
            )?;
        }
        let master = snapshot(&tx)?;
        tx.commit()?;
        tracing::info!(
            departments = master.departments.len(),
            levels = master.levels.len(),
            designations = master.designations.len(),
            replace,
            "master data seeded"
        );
        Ok(master)
    }

    /// Seeds only into an empty database. Returns whether it seeded.
    pub fn seed_master_data_if_empty(&self) -> Result<bool, StoreError> {
        if !self.master_snapshot()?.is_empty() {
            return Ok(false);
        }
        self.seed_master_data(false)?;
        Ok(true)
    }
}
