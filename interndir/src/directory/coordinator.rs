// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::sync::Arc;

use crate::directory::csv::{drafts_from_csv, to_csv, CsvError};
use crate::directory::pipeline::DirectoryPipeline;
use crate::directory::types::{is_valid_email, is_valid_start_date, Intern, InternDraft};
use crate::store::{InternStore, StoreError};

#[derive(Debug)]
pub enum CoordinatorError {
    /// The draft failed local validation; no store call was made.
    Validation(String),
    Csv(CsvError),
    Store(StoreError),
}

impl std::fmt::Display for CoordinatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinatorError::Validation(msg) => write!(f, "{}", msg),
            CoordinatorError::Csv(err) => write!(f, "{}", err),
            CoordinatorError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CoordinatorError {}

impl From<CsvError> for CoordinatorError {
    fn from(err: CsvError) -> Self {
        CoordinatorError::Csv(err)
    }
}

impl From<StoreError> for CoordinatorError {
    fn from(err: StoreError) -> Self {
        CoordinatorError::Store(err)
    }
}

/// Which tag list a tag mutation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagField {
    Projects,
    Skills,
}

/// The confirmation step of a staged delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePrompt {
    pub id: String,
    pub name: String,
}

/// Drives every admin mutation against the store while keeping a local
/// collection in sync. Mutations validate locally first, and the local
/// collection only reflects writes the store accepted: tag mutations apply
/// optimistically but roll back to the pre-mutation record on failure.
pub struct MutationCoordinator {
    store: Arc<dyn InternStore>,
    pipeline: DirectoryPipeline,
    selected_id: Option<String>,
    staged_delete: Option<String>,
}

impl MutationCoordinator {
    pub fn new(store: Arc<dyn InternStore>) -> Self {
        Self {
            store,
            pipeline: DirectoryPipeline::new(),
            selected_id: None,
            staged_delete: None,
        }
    }

    pub fn pipeline(&self) -> &DirectoryPipeline {
        &self.pipeline
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn select(&mut self, id: Option<String>) {
        self.selected_id = id;
    }

    pub fn staged_delete(&self) -> Option<&str> {
        self.staged_delete.as_deref()
    }

    /// Replace the local collection with server truth.
    pub fn refresh(&mut self) -> Result<(), CoordinatorError> {
        let (interns, _total) = self.store.list(None)?;
        self.pipeline.replace_all(interns);
        Ok(())
    }

    pub fn create(&mut self, draft: &InternDraft) -> Result<Intern, CoordinatorError> {
        validate_draft(draft)?;
        let created = self.store.create(draft)?;
        self.pipeline.insert(created.clone());
        Ok(created)
    }

    pub fn edit(&mut self, id: &str, draft: &InternDraft) -> Result<Intern, CoordinatorError> {
        validate_draft(draft)?;
        let updated = self.store.update(id, draft)?;
        self.pipeline.merge(updated.clone());
        Ok(updated)
    }

    /// Append a tag. Duplicates are a no-op that never reaches the store.
    pub fn add_tag(
        &mut self,
        id: &str,
        field: TagField,
        tag: &str,
    ) -> Result<Intern, CoordinatorError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(CoordinatorError::Validation("Tag must not be empty".to_string()));
        }
        let before = self.record(id)?;
        if tags_of(&before, field).iter().any(|existing| existing == tag) {
            return Ok(before);
        }
        let mut candidate = before.clone();
        tags_of_mut(&mut candidate, field).push(tag.to_string());
        self.commit_tag_change(before, candidate)
    }

    /// Remove a tag. Absent tags are a no-op that never reaches the store.
    pub fn remove_tag(
        &mut self,
        id: &str,
        field: TagField,
        tag: &str,
    ) -> Result<Intern, CoordinatorError> {
        let before = self.record(id)?;
        if !tags_of(&before, field).iter().any(|existing| existing == tag) {
            return Ok(before);
        }
        let mut candidate = before.clone();
        tags_of_mut(&mut candidate, field).retain(|existing| existing != tag);
        self.commit_tag_change(before, candidate)
    }

    /// Optimistic apply: the local record changes immediately, the store
    /// write follows. Success merges the canonical record; failure restores
    /// the pre-mutation record.
    fn commit_tag_change(
        &mut self,
        before: Intern,
        candidate: Intern,
    ) -> Result<Intern, CoordinatorError> {
        let id = candidate.id.clone();
        let draft = candidate.to_draft();
        self.pipeline.merge(candidate);
        match self.store.update(&id, &draft) {
            Ok(canonical) => {
                self.pipeline.merge(canonical.clone());
                Ok(canonical)
            }
            Err(err) => {
                self.pipeline.merge(before);
                Err(err.into())
            }
        }
    }

    /// First step of a delete: nothing is removed yet, the caller gets a
    /// prompt to confirm against.
    pub fn stage_delete(&mut self, id: &str) -> Result<DeletePrompt, CoordinatorError> {
        let record = self.record(id)?;
        self.staged_delete = Some(record.id.clone());
        Ok(DeletePrompt {
            id: record.id,
            name: record.name,
        })
    }

    pub fn cancel_delete(&mut self) {
        self.staged_delete = None;
    }

    /// Second step: issue the remote delete, then drop the record locally
    /// and clear the selection if it pointed at the deleted record.
    pub fn confirm_delete(&mut self, id: &str) -> Result<(), CoordinatorError> {
        self.store.delete(id)?;
        self.pipeline.remove(id);
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        }
        self.staged_delete = None;
        Ok(())
    }

    /// Parse, validate, and bulk-save an import file, then merge each saved
    /// record into the local collection by identity.
    pub fn import_csv(&mut self, text: &str) -> Result<Vec<Intern>, CoordinatorError> {
        let drafts = drafts_from_csv(text)?;
        for (index, draft) in drafts.iter().enumerate() {
            validate_draft(draft).map_err(|err| {
                CoordinatorError::Validation(format!("Row {}: {}", index + 1, err))
            })?;
        }
        let saved = self.store.bulk_upsert(&drafts)?;
        for intern in &saved {
            self.pipeline.upsert(intern.clone());
        }
        Ok(saved)
    }

    pub fn export_csv(&self) -> String {
        to_csv(self.pipeline.interns())
    }

    fn record(&self, id: &str) -> Result<Intern, CoordinatorError> {
        self.pipeline
            .get(id)
            .cloned()
            .ok_or(CoordinatorError::Store(StoreError::NotFound))
    }
}

fn tags_of(intern: &Intern, field: TagField) -> &Vec<String> {
    match field {
        TagField::Projects => &intern.projects,
        TagField::Skills => &intern.skills,
    }
}

fn tags_of_mut(intern: &mut Intern, field: TagField) -> &mut Vec<String> {
    match field {
        TagField::Projects => &mut intern.projects,
        TagField::Skills => &mut intern.skills,
    }
}

/// Shared pre-store validation for create, edit, and import rows.
pub fn validate_draft(draft: &InternDraft) -> Result<(), CoordinatorError> {
    let missing = |value: &Option<String>| value.as_deref().map(str::trim).unwrap_or("").is_empty();
    if missing(&draft.name) || missing(&draft.role) || missing(&draft.email) {
        return Err(CoordinatorError::Validation(
            "Name, role, and email are required".to_string(),
        ));
    }
    let email = draft.email.as_deref().unwrap_or("").trim();
    if !is_valid_email(email) {
        return Err(CoordinatorError::Validation(
            "Invalid email format".to_string(),
        ));
    }
    let start_date = draft.start_date.as_deref().unwrap_or("").trim();
    if !is_valid_start_date(start_date) {
        return Err(CoordinatorError::Validation(
            "Start date must be YYYY-MM-DD".to_string(),
        ));
    }
    Ok(())
}
