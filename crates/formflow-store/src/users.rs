// SPDX-License-Identifier: Apache-2.0

use crate::{decode_time, encode_time, Store, StoreError, StoreErrorCode};
use formflow_model::{Role, User};
use rusqlite::{params, OptionalExtension, Row};
use std::collections::BTreeMap;

const USER_COLUMNS: &str = "id, username, email, password_hash, role, created_at";

type UserRow = (String, String, String, String, String, String);

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn finish(raw: UserRow) -> Result<User, StoreError> {
    let (id, username, email, password_hash, role, created_at) = raw;
    Ok(User {
        id,
        username,
        email,
        password_hash,
        role: Role::parse(&role).ok_or_else(|| {
            StoreError::new(StoreErrorCode::Internal, format!("unknown role {role}"))
        })?,
        created_at: decode_time(&created_at)?,
    })
}

impl Store {
    /// Inserts an account; a taken e-mail is a conflict.
    pub fn create_user(&self, user: &User) -> Result<(), StoreError> {
        let conn = self.conn()?;
        let result = conn.execute(
            "INSERT INTO users (id, username, email, password_hash, role, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user.id,
                user.username,
                user.email,
                user.password_hash,
                user.role.as_str(),
                encode_time(user.created_at)
            ],
        );
        match result.map_err(StoreError::from) {
            Ok(_) => Ok(()),
            Err(e) if e.is(StoreErrorCode::Conflict) => {
                Err(StoreError::conflict("User already exists"))
            }
            Err(e) => Err(e),
        }
    }

    pub fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let conn = self.conn()?;
        conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
            params![email],
            user_from_row,
        )
        .optional()?
        .map(finish)
        .transpose()
    }

    pub fn user_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let conn = self.conn()?;
        conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
            params![id],
            user_from_row,
        )
        .optional()?
        .map(finish)
        .transpose()
    }

    pub fn count_users_by_role(&self, role: Role) -> Result<u64, StoreError> {
        let conn = self.conn()?;
        let n: i64 = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE role = ?1",
            params![role.as_str()],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(n).unwrap_or(0))
    }

    /// E-mail to username for every account.
    pub fn usernames_by_email(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT email, username FROM users")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        let mut out = BTreeMap::new();
        for row in rows {
            let (email, username): (String, String) = row?;
            out.insert(email, username);
        }
        Ok(out)
    }
}
