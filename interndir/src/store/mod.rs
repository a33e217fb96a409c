// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod seed;
pub mod sqlite;

pub use sqlite::SqliteInternStore;

use crate::directory::types::{Intern, InternDraft};

#[derive(Debug)]
pub enum StoreError {
    /// Required fields missing or malformed; the write was not attempted.
    Validation(String),
    /// No record with the given identity.
    NotFound,
    /// The backing database failed; details are logged, not leaked.
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Validation(msg) => write!(f, "{}", msg),
            StoreError::NotFound => write!(f, "Not found"),
            StoreError::Backend(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub offset: u64,
    pub limit: u64,
}

/// The persistence contract the directory consumes. Identity assignment,
/// normalization, and upsert semantics live behind this seam; everything
/// above it only sees fully-normalized records.
pub trait InternStore: Send + Sync {
    /// All records in stable id order, optionally windowed. The total count
    /// always covers the full collection, not the window.
    fn list(&self, page: Option<PageRequest>) -> Result<(Vec<Intern>, u64), StoreError>;

    /// Insert with a newly assigned identity. Rejects drafts missing
    /// name, role, or email.
    fn create(&self, draft: &InternDraft) -> Result<Intern, StoreError>;

    /// Full-field replace: fields absent from the draft are written as
    /// empty, not left unchanged. Callers must submit complete records.
    fn update(&self, id: &str, draft: &InternDraft) -> Result<Intern, StoreError>;

    fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Insert-or-replace each row by identity, assigning identities to rows
    /// without one. Sequential and not transactional: a failure partway
    /// through leaves earlier rows committed.
    fn bulk_upsert(&self, drafts: &[InternDraft]) -> Result<Vec<Intern>, StoreError>;

    /// Drop everything and repopulate from the seed set. Explicit only.
    fn reset_to_seed(&self) -> Result<(), StoreError>;

    /// Populate the seed set only when the table is empty. Idempotent; safe
    /// on every read.
    fn seed_if_empty(&self) -> Result<(), StoreError>;

    fn count(&self) -> Result<u64, StoreError>;
}
