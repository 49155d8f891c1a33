// SPDX-License-Identifier: Apache-2.0

use crate::{encode_time, Store, StoreError};
use formflow_model::Response;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

fn insert_row(conn: &Connection, response: &Response) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO responses (id, form_id, respondent_email, doc, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            response.id,
            response.form_id,
            response.respondent_email,
            serde_json::to_string(response)?,
            encode_time(response.created_at)
        ],
    )?;
    Ok(())
}

fn exists_row(conn: &Connection, form_id: &str, email: &str) -> Result<bool, StoreError> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM responses WHERE form_id = ?1 AND respondent_email = ?2 LIMIT 1",
            params![form_id, email],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

impl Store {
    pub fn insert_response(&self, response: &Response) -> Result<(), StoreError> {
        insert_row(&*self.conn()?, response)
    }

    /// Stores `response` unless `limit_one` is set and its respondent already
    /// answered the form. The check and the insert share one transaction under
    /// the store lock. Returns whether the response was stored.
    pub fn insert_response_once(
        &self,
        response: &Response,
        limit_one: bool,
    ) -> Result<bool, StoreError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        if limit_one {
            if let Some(email) = response.respondent_email.as_deref() {
                if exists_row(&tx, &response.form_id, email)? {
                    return Ok(false);
                }
            }
        }
        insert_row(&tx, response)?;
        tx.commit()?;
        Ok(true)
    }

    pub fn response_by_id(&self, id: &str) -> Result<Option<Response>, StoreError> {
        let conn = self.conn()?;
        let doc: Option<String> = conn
            .query_row(
                "SELECT doc FROM responses WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(doc.map(|d| serde_json::from_str(&d)).transpose()?)
    }

    /// Responses on any of `form_ids`, newest first.
    pub fn responses_for_forms(&self, form_ids: &[String]) -> Result<Vec<Response>, StoreError> {
        if form_ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; form_ids.len()].join(", ");
        let sql = format!(
            "SELECT doc FROM responses WHERE form_id IN ({placeholders}) ORDER BY created_at DESC, id"
        );
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let docs = stmt.query_map(params_from_iter(form_ids.iter()), |row| {
            row.get::<_, String>(0)
        })?;
        let mut out = Vec::new();
        for doc in docs {
            out.push(serde_json::from_str(&doc?)?);
        }
        Ok(out)
    }

    pub fn response_exists(&self, form_id: &str, email: &str) -> Result<bool, StoreError> {
        exists_row(&*self.conn()?, form_id, email)
    }

    pub fn delete_response(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.conn()?;
        if conn.execute("DELETE FROM responses WHERE id = ?1", params![id])? == 0 {
            return Err(StoreError::not_found("Response not found"));
        }
        Ok(())
    }

    pub fn count_responses(&self) -> Result<u64, StoreError> {
        let conn = self.conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM responses", [], |row| row.get(0))?;
        Ok(u64::try_from(n).unwrap_or(0))
    }
}
