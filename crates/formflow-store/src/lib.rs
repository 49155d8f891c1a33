// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! SQLite persistence.
//!
//! Nested documents (form content, answers, profiles) live in JSON text
//! columns next to the scalar columns that queries filter on. The handle
//! wraps one connection in a mutex; async callers go through
//! `spawn_blocking`.

mod employees;
mod forms;
mod master;
mod responses;
mod schema;
pub mod seed;
mod users;

use formflow_core::ErrorCode;
use rusqlite::Connection;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

pub use forms::PublishAllOutcome;
pub use schema::SCHEMA_VERSION;

pub const CRATE_NAME: &str = "formflow-store";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorCode {
    NotFound,
    Conflict,
    Validation,
    Io,
    Internal,
}

impl StoreErrorCode {
    #[must_use]
    pub const fn as_error_code(self) -> ErrorCode {
        match self {
            Self::NotFound => ErrorCode::NotFound,
            Self::Conflict => ErrorCode::Conflict,
            Self::Validation => ErrorCode::ValidationFailed,
            Self::Io | Self::Internal => ErrorCode::Internal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::NotFound, message)
    }

    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::Conflict, message)
    }

    #[must_use]
    pub fn is(&self, code: StoreErrorCode) -> bool {
        self.code == code
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Self::conflict(err.to_string())
            }
            _ => Self::new(StoreErrorCode::Internal, err.to_string()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(StoreErrorCode::Internal, format!("document codec: {err}"))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::new(StoreErrorCode::Io, err.to_string())
    }
}

impl From<formflow_model::ValidationError> for StoreError {
    fn from(err: formflow_model::ValidationError) -> Self {
        Self::new(StoreErrorCode::Validation, err.message)
    }
}

/// Shared database handle.
#[derive(Debug)]
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Opens (creating if needed) the database at `path` and migrates it.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL; PRAGMA foreign_keys=ON; PRAGMA busy_timeout=5000;",
        )?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        let version = schema::migrate(&conn)?;
        tracing::debug!(schema_version = version, "store ready");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::new(StoreErrorCode::Internal, "store lock poisoned"))
    }

    pub fn schema_version(&self) -> Result<i64, StoreError> {
        schema::current_version(&*self.conn()?)
    }
}

pub(crate) fn encode_time(at: chrono::DateTime<chrono::Utc>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

pub(crate) fn decode_time(raw: &str) -> Result<chrono::DateTime<chrono::Utc>, StoreError> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&chrono::Utc))
        .map_err(|e| StoreError::new(StoreErrorCode::Internal, format!("bad timestamp {raw}: {e}")))
}
