// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::directory::types::{normalize_tags, Intern, InternDraft};
use crate::store::seed::seed_interns;
use crate::store::{InternStore, PageRequest, StoreError};

const SELECT_COLUMNS: &str = "id, name, role, email, phone, image_url, projects, \
     manager, start_date, performance, skills, department";

/// SQLite-backed record store. One connection behind a mutex; per-call
/// critical sections are short and the tool is single-writer by design.
pub struct SqliteInternStore {
    conn: Mutex<Connection>,
}

impl SqliteInternStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Fresh private database, used by tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS interns (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                role TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT,
                image_url TEXT,
                projects TEXT,
                manager TEXT,
                start_date TEXT,
                performance TEXT,
                skills TEXT,
                department TEXT,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        match self.conn.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::error!("Intern store lock poisoned; recovering");
                poisoned.into_inner()
            }
        }
    }

    /// Next sequential identity: one past the highest existing `ID<n>`.
    /// Foreign-format ids (imported from elsewhere) are ignored.
    fn next_id(conn: &Connection) -> Result<String, StoreError> {
        let mut statement = conn.prepare("SELECT id FROM interns")?;
        let ids = statement.query_map([], |row| row.get::<_, String>(0))?;
        let mut max = 0u64;
        for id in ids {
            if let Some(number) = id_number(&id?) {
                max = max.max(number);
            }
        }
        Ok(format_intern_id(max + 1))
    }

    fn fetch(conn: &Connection, id: &str) -> Result<Intern, StoreError> {
        let query = format!("SELECT {} FROM interns WHERE id = ?1", SELECT_COLUMNS);
        conn.query_row(&query, params![id], row_to_intern)
            .optional()?
            .ok_or(StoreError::NotFound)
    }

    fn upsert_row(conn: &Connection, id: &str, draft: &InternDraft) -> Result<(), StoreError> {
        let fields = WriteFields::from_draft(draft)?;
        conn.execute(
            "INSERT INTO interns (
                id, name, role, email, phone, image_url, projects,
                manager, start_date, performance, skills, department
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                role = excluded.role,
                email = excluded.email,
                phone = excluded.phone,
                image_url = excluded.image_url,
                projects = excluded.projects,
                manager = excluded.manager,
                start_date = excluded.start_date,
                performance = excluded.performance,
                skills = excluded.skills,
                department = excluded.department",
            params![
                id,
                fields.name,
                fields.role,
                fields.email,
                fields.phone,
                fields.image_url,
                fields.projects,
                fields.manager,
                fields.start_date,
                fields.performance,
                fields.skills,
                fields.department,
            ],
        )?;
        Ok(())
    }

    fn insert_seed_rows(conn: &Connection) -> Result<(), StoreError> {
        for intern in seed_interns() {
            Self::upsert_row(conn, &intern.id, &intern.to_draft())?;
        }
        Ok(())
    }

    fn count_rows(conn: &Connection) -> Result<u64, StoreError> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM interns", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

/// Normalized column values for a write. Fields absent from the draft become
/// empty strings and empty lists; nothing is carried over from existing rows.
struct WriteFields {
    name: String,
    role: String,
    email: String,
    phone: String,
    image_url: String,
    projects: String,
    manager: String,
    start_date: String,
    performance: String,
    skills: String,
    department: String,
}

impl WriteFields {
    fn from_draft(draft: &InternDraft) -> Result<Self, StoreError> {
        let text = |value: &Option<String>| {
            value.as_deref().map(str::trim).unwrap_or_default().to_string()
        };
        let tags = |value: &Option<Vec<String>>| -> Result<String, StoreError> {
            let normalized = normalize_tags(value.as_deref().unwrap_or_default());
            serde_json::to_string(&normalized)
                .map_err(|err| StoreError::Backend(err.to_string()))
        };
        Ok(Self {
            name: text(&draft.name),
            role: text(&draft.role),
            email: text(&draft.email),
            phone: text(&draft.phone),
            image_url: text(&draft.image_url),
            projects: tags(&draft.projects)?,
            manager: text(&draft.manager),
            start_date: text(&draft.start_date),
            performance: text(&draft.performance),
            skills: tags(&draft.skills)?,
            department: text(&draft.department),
        })
    }

    fn has_required(&self) -> bool {
        !self.name.is_empty() && !self.role.is_empty() && !self.email.is_empty()
    }
}

// Null-in, empty-out: legacy rows may hold NULLs or malformed tag JSON;
// clients always see '' and [].
fn row_to_intern(row: &Row<'_>) -> rusqlite::Result<Intern> {
    let text = |index: usize| -> rusqlite::Result<String> {
        Ok(row.get::<_, Option<String>>(index)?.unwrap_or_default())
    };
    let tags = |index: usize| -> rusqlite::Result<Vec<String>> {
        let raw = row.get::<_, Option<String>>(index)?.unwrap_or_default();
        Ok(serde_json::from_str(&raw).unwrap_or_default())
    };
    Ok(Intern {
        id: text(0)?,
        name: text(1)?,
        role: text(2)?,
        email: text(3)?,
        phone: text(4)?,
        image_url: text(5)?,
        projects: tags(6)?,
        manager: text(7)?,
        start_date: text(8)?,
        performance: text(9)?,
        skills: tags(10)?,
        department: text(11)?,
    })
}

fn id_number(id: &str) -> Option<u64> {
    let digits = id.strip_prefix("ID")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn format_intern_id(number: u64) -> String {
    format!("ID{:02}", number)
}

impl InternStore for SqliteInternStore {
    fn list(&self, page: Option<PageRequest>) -> Result<(Vec<Intern>, u64), StoreError> {
        let conn = self.conn();
        let total = Self::count_rows(&conn)?;
        let base = format!("SELECT {} FROM interns ORDER BY id ASC", SELECT_COLUMNS);
        let mut interns = Vec::new();
        match page {
            Some(page) => {
                let query = format!("{} LIMIT ?1 OFFSET ?2", base);
                let mut statement = conn.prepare(&query)?;
                let rows = statement
                    .query_map(params![page.limit as i64, page.offset as i64], row_to_intern)?;
                for row in rows {
                    interns.push(row?);
                }
            }
            None => {
                let mut statement = conn.prepare(&base)?;
                let rows = statement.query_map([], row_to_intern)?;
                for row in rows {
                    interns.push(row?);
                }
            }
        }
        Ok((interns, total))
    }

    fn create(&self, draft: &InternDraft) -> Result<Intern, StoreError> {
        let fields = WriteFields::from_draft(draft)?;
        if !fields.has_required() {
            return Err(StoreError::Validation(
                "Missing required fields".to_string(),
            ));
        }
        let conn = self.conn();
        let id = Self::next_id(&conn)?;
        Self::upsert_row(&conn, &id, draft)?;
        Self::fetch(&conn, &id)
    }

    fn update(&self, id: &str, draft: &InternDraft) -> Result<Intern, StoreError> {
        let fields = WriteFields::from_draft(draft)?;
        let conn = self.conn();
        let changed = conn.execute(
            "UPDATE interns SET
                name = ?2, role = ?3, email = ?4, phone = ?5, image_url = ?6,
                projects = ?7, manager = ?8, start_date = ?9,
                performance = ?10, skills = ?11, department = ?12
            WHERE id = ?1",
            params![
                id,
                fields.name,
                fields.role,
                fields.email,
                fields.phone,
                fields.image_url,
                fields.projects,
                fields.manager,
                fields.start_date,
                fields.performance,
                fields.skills,
                fields.department,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound);
        }
        Self::fetch(&conn, id)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.conn();
        let removed = conn.execute("DELETE FROM interns WHERE id = ?1", params![id])?;
        if removed == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn bulk_upsert(&self, drafts: &[InternDraft]) -> Result<Vec<Intern>, StoreError> {
        let conn = self.conn();
        let mut saved = Vec::with_capacity(drafts.len());
        // One row at a time, deliberately outside a transaction: a failure
        // on row N leaves rows 1..N-1 committed (best-effort sequential
        // upsert).
        for draft in drafts {
            let id = match draft.id.as_deref().map(str::trim) {
                Some(id) if !id.is_empty() => id.to_string(),
                _ => Self::next_id(&conn)?,
            };
            Self::upsert_row(&conn, &id, draft)?;
            saved.push(Self::fetch(&conn, &id)?);
        }
        Ok(saved)
    }

    fn reset_to_seed(&self) -> Result<(), StoreError> {
        let conn = self.conn();
        conn.execute("DELETE FROM interns", [])?;
        Self::insert_seed_rows(&conn)
    }

    fn seed_if_empty(&self) -> Result<(), StoreError> {
        let conn = self.conn();
        if Self::count_rows(&conn)? > 0 {
            return Ok(());
        }
        Self::insert_seed_rows(&conn)
    }

    fn count(&self) -> Result<u64, StoreError> {
        Self::count_rows(&self.conn())
    }
}
