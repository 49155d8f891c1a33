// SPDX-License-Identifier: Apache-2.0

use crate::StoreError;
use rusqlite::{params, Connection, OptionalExtension};

pub const SCHEMA_VERSION: i64 = 1;

const MIGRATIONS: [(i64, &str); 1] = [(
    1,
    "
    CREATE TABLE IF NOT EXISTS users (
      id TEXT PRIMARY KEY,
      username TEXT NOT NULL,
      email TEXT NOT NULL UNIQUE,
      password_hash TEXT NOT NULL,
      role TEXT NOT NULL,
      created_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS employee_profiles (
      id TEXT PRIMARY KEY,
      employee_id TEXT NOT NULL UNIQUE,
      email TEXT,
      user_id TEXT,
      doc TEXT NOT NULL,
      created_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_employee_profiles_email ON employee_profiles(email);
    CREATE TABLE IF NOT EXISTS forms (
      id TEXT PRIMARY KEY,
      short_id TEXT NOT NULL UNIQUE,
      title TEXT NOT NULL,
      is_published INTEGER NOT NULL,
      doc TEXT NOT NULL,
      created_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_forms_title ON forms(title);
    CREATE TABLE IF NOT EXISTS responses (
      id TEXT PRIMARY KEY,
      form_id TEXT NOT NULL,
      respondent_email TEXT,
      doc TEXT NOT NULL,
      created_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_responses_form ON responses(form_id, respondent_email);
    CREATE TABLE IF NOT EXISTS departments (
      dept_id TEXT PRIMARY KEY,
      name TEXT NOT NULL,
      level_category TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS levels (
      level_id TEXT PRIMARY KEY,
      name TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS designations (
      desig_id TEXT PRIMARY KEY,
      name TEXT NOT NULL,
      dept_id TEXT NOT NULL,
      level_id TEXT NOT NULL
    );
    ",
)];

pub(crate) fn current_version(conn: &Connection) -> Result<i64, StoreError> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;
    let version = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get::<_, Option<i64>>(0)
        })
        .optional()?
        .flatten()
        .unwrap_or(0);
    Ok(version)
}

/// Applies pending migrations; running it again is a no-op.
pub(crate) fn migrate(conn: &Connection) -> Result<i64, StoreError> {
    let mut version = current_version(conn)?;
    for (target, sql) in MIGRATIONS {
        if target <= version {
            continue;
        }
        conn.execute_batch(sql)?;
        conn.execute("INSERT INTO schema_version (version) VALUES (?1)", params![target])?;
        tracing::info!(from = version, to = target, "schema migrated");
        version = target;
    }
    Ok(version)
}
