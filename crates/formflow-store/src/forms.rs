// SPDX-License-Identifier: Apache-2.0

use crate::{encode_time, Store, StoreError};
use chrono::{DateTime, Utc};
use formflow_model::{Form, FormContent};
use rusqlite::{params, Connection, OptionalExtension};

const SHORT_ID_LEN: usize = 10;

/// Counts reported by `publish_all_forms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishAllOutcome {
    pub matched: u64,
    pub modified: u64,
}

fn short_id() -> String {
    uuid::Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(SHORT_ID_LEN)
        .collect()
}

fn load_forms(conn: &Connection, sql: &str) -> Result<Vec<Form>, StoreError> {
    let mut stmt = conn.prepare(sql)?;
    let docs = stmt.query_map([], |row| row.get::<_, String>(0))?;
    let mut out = Vec::new();
    for doc in docs {
        out.push(serde_json::from_str(&doc?)?);
    }
    Ok(out)
}

fn load_form(conn: &Connection, id: &str) -> Result<Option<Form>, StoreError> {
    let doc: Option<String> = conn
        .query_row("SELECT doc FROM forms WHERE id = ?1", params![id], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(doc.map(|d| serde_json::from_str(&d)).transpose()?)
}

fn save_form(conn: &Connection, form: &Form) -> Result<(), StoreError> {
    let changed = conn.execute(
        "UPDATE forms SET title = ?2, is_published = ?3, doc = ?4 WHERE id = ?1",
        params![
            form.id,
            form.content.title,
            form.content.is_published,
            serde_json::to_string(form)?
        ],
    )?;
    if changed == 0 {
        return Err(StoreError::not_found("Form not found"));
    }
    Ok(())
}

impl Store {
    /// Persists `content` as a new form with fresh ids.
    pub fn insert_form(&self, content: FormContent, now: DateTime<Utc>) -> Result<Form, StoreError> {
        let form = Form {
            id: formflow_model::new_id(),
            short_id: short_id(),
            content,
            created_at: now,
            updated_at: now,
        };
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO forms (id, short_id, title, is_published, doc, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                form.id,
                form.short_id,
                form.content.title,
                form.content.is_published,
                serde_json::to_string(&form)?,
                encode_time(form.created_at)
            ],
        )?;
        Ok(form)
    }

    pub fn form_by_id(&self, id: &str) -> Result<Option<Form>, StoreError> {
        load_form(&*self.conn()?, id)
    }

    /// First form (oldest) whose title equals `title` exactly.
    pub fn form_by_title(&self, title: &str) -> Result<Option<Form>, StoreError> {
        let conn = self.conn()?;
        let doc: Option<String> = conn
            .query_row(
                "SELECT doc FROM forms WHERE title = ?1 ORDER BY created_at, id LIMIT 1",
                params![title],
                |row| row.get(0),
            )
            .optional()?;
        Ok(doc.map(|d| serde_json::from_str(&d)).transpose()?)
    }

    /// Newest first.
    pub fn list_forms(&self) -> Result<Vec<Form>, StoreError> {
        load_forms(&*self.conn()?, "SELECT doc FROM forms ORDER BY created_at DESC, id")
    }

    pub fn list_published_forms(&self) -> Result<Vec<Form>, StoreError> {
        load_forms(
            &*self.conn()?,
            "SELECT doc FROM forms WHERE is_published = 1 ORDER BY created_at DESC, id",
        )
    }

    /// Replaces the content of form `id`.
    pub fn update_form(
        &self,
        id: &str,
        content: FormContent,
        now: DateTime<Utc>,
    ) -> Result<Form, StoreError> {
        let conn = self.conn()?;
        let mut form = load_form(&conn, id)?.ok_or_else(|| StoreError::not_found("Form not found"))?;
        form.content = content;
        form.updated_at = now;
        save_form(&conn, &form)?;
        Ok(form)
    }

    pub fn set_form_published(
        &self,
        id: &str,
        published: bool,
        now: DateTime<Utc>,
    ) -> Result<Form, StoreError> {
        let conn = self.conn()?;
        let mut form = load_form(&conn, id)?.ok_or_else(|| StoreError::not_found("Form not found"))?;
        form.content.is_published = published;
        form.updated_at = now;
        save_form(&conn, &form)?;
        Ok(form)
    }

    /// Publishes every unpublished form.
    pub fn publish_all_forms(&self, now: DateTime<Utc>) -> Result<PublishAllOutcome, StoreError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let drafts = load_forms(&tx, "SELECT doc FROM forms WHERE is_published = 0")?;
        let mut modified = 0;
        for mut form in drafts.iter().cloned() {
            form.content.is_published = true;
            form.updated_at = now;
            save_form(&tx, &form)?;
            modified += 1;
        }
        tx.commit()?;
        Ok(PublishAllOutcome {
            matched: drafts.len() as u64,
            modified,
        })
    }

    /// Deletes form `id`. Its responses stay readable by id but drop out of
    /// per-form listings.
    pub fn delete_form(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM forms WHERE id = ?1", params![id])?;
        if removed == 0 {
            return Err(StoreError::not_found("Form not found"));
        }
        Ok(())
    }

    pub fn count_forms(&self) -> Result<u64, StoreError> {
        let conn = self.conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM forms", [], |row| row.get(0))?;
        Ok(u64::try_from(n).unwrap_or(0))
    }
}
