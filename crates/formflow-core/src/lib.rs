// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod errors;
pub mod text;

use sha2::{Digest, Sha256};

pub use errors::{ErrorCode, ExitCode, MachineError, ERROR_CODES};

pub const CRATE_NAME: &str = "formflow-core";

pub const ENV_FORMFLOW_DB_PATH: &str = "FORMFLOW_DB_PATH";
pub const ENV_FORMFLOW_LOG_JSON: &str = "FORMFLOW_LOG_JSON";
pub const DEFAULT_DB_PATH: &str = "artifacts/formflow.sqlite";

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Resolves the database path from `FORMFLOW_DB_PATH`, falling back to the default.
#[must_use]
pub fn resolve_db_path() -> std::path::PathBuf {
    match std::env::var(ENV_FORMFLOW_DB_PATH) {
        Ok(raw) if !raw.trim().is_empty() => std::path::PathBuf::from(raw.trim()),
        _ => std::path::PathBuf::from(DEFAULT_DB_PATH),
    }
}
