// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::directory::types::Intern;

/// Sentinel filter value meaning "no constraint".
pub const FILTER_ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Role,
    /// Compares by number of projects, not by project names.
    ProjectCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Ephemeral view state; derived from scratch on every render, never stored.
#[derive(Debug, Clone)]
pub struct ViewQuery {
    pub query: String,
    pub role_filter: String,
    pub project_filter: String,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub secondary_sort_key: SortKey,
    pub page: usize,
    pub page_size: usize,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            role_filter: FILTER_ALL.to_string(),
            project_filter: FILTER_ALL.to_string(),
            sort_key: SortKey::Name,
            sort_direction: SortDirection::Ascending,
            secondary_sort_key: SortKey::Role,
            page: 1,
            page_size: 5,
        }
    }
}

/// One page of the filtered, sorted collection.
#[derive(Debug, Clone)]
pub struct DirectoryView {
    pub interns: Vec<Intern>,
    /// Records matching the filters, across all pages.
    pub total: usize,
    /// The clamped 1-indexed page actually returned.
    pub page: usize,
    pub page_count: usize,
}

/// The client-held collection of intern records. Mutations flow through the
/// coordinator, which merges server-canonical records back in; views are
/// recomputed from the full collection on demand.
#[derive(Debug, Default)]
pub struct DirectoryPipeline {
    interns: Vec<Intern>,
}

impl DirectoryPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interns(&self) -> &[Intern] {
        &self.interns
    }

    pub fn len(&self) -> usize {
        self.interns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interns.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Intern> {
        self.interns.iter().find(|intern| intern.id == id)
    }

    /// Replace the whole collection with server truth.
    pub fn replace_all(&mut self, interns: Vec<Intern>) {
        self.interns = interns;
    }

    /// Newly created records go to the front, like the admin list renders
    /// them.
    pub fn insert(&mut self, intern: Intern) {
        self.interns.insert(0, intern);
    }

    /// Merge a server-canonical record by identity. Unknown ids are ignored;
    /// merging never invents records.
    pub fn merge(&mut self, intern: Intern) -> bool {
        match self.interns.iter_mut().find(|item| item.id == intern.id) {
            Some(slot) => {
                *slot = intern;
                true
            }
            None => false,
        }
    }

    /// Merge by identity, appending when the id is new. Used by bulk import,
    /// where saved rows may or may not already be present locally.
    pub fn upsert(&mut self, intern: Intern) {
        if !self.merge(intern.clone()) {
            self.interns.push(intern);
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.interns.len();
        self.interns.retain(|intern| intern.id != id);
        self.interns.len() != before
    }

    /// Distinct roles, sorted, for the role filter dropdown.
    pub fn role_options(&self) -> Vec<String> {
        self.interns
            .iter()
            .map(|intern| intern.role.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct project tags, sorted, for the project filter dropdown.
    pub fn project_options(&self) -> Vec<String> {
        self.interns
            .iter()
            .flat_map(|intern| intern.projects.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn department_count(&self) -> usize {
        self.interns
            .iter()
            .filter(|intern| !intern.department.is_empty())
            .map(|intern| intern.department.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn active_project_count(&self) -> usize {
        self.interns.iter().map(|intern| intern.projects.len()).sum()
    }

    /// Apply search, filters, the two-level sort, and pagination. Page
    /// numbers past the end clamp to the last valid page so a narrowed
    /// filter never strands the client on an empty page.
    pub fn view(&self, query: &ViewQuery) -> DirectoryView {
        let needle = query.query.to_lowercase();
        let mut matched: Vec<&Intern> = self
            .interns
            .iter()
            .filter(|intern| {
                if query.role_filter != FILTER_ALL && intern.role != query.role_filter {
                    return false;
                }
                if query.project_filter != FILTER_ALL
                    && !intern.projects.iter().any(|p| *p == query.project_filter)
                {
                    return false;
                }
                matches_query(intern, &needle)
            })
            .collect();

        matched.sort_by(|a, b| {
            let primary = compare_by_key(a, b, query.sort_key);
            let primary = match query.sort_direction {
                SortDirection::Ascending => primary,
                SortDirection::Descending => primary.reverse(),
            };
            if primary != Ordering::Equal {
                return primary;
            }
            // Secondary is always ascending and only breaks primary ties.
            compare_by_key(a, b, query.secondary_sort_key)
        });

        let page_size = query.page_size.max(1);
        let total = matched.len();
        let page_count = total.div_ceil(page_size).max(1);
        let page = query.page.clamp(1, page_count);
        let start = (page - 1) * page_size;
        let interns = matched
            .into_iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect();

        DirectoryView {
            interns,
            total,
            page,
            page_count,
        }
    }
}

fn matches_query(intern: &Intern, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [
        &intern.name,
        &intern.role,
        &intern.id,
        &intern.email,
        &intern.department,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

fn compare_by_key(a: &Intern, b: &Intern, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => compare_strings(&a.name, &b.name),
        SortKey::Role => compare_strings(&a.role, &b.role),
        SortKey::ProjectCount => a.projects.len().cmp(&b.projects.len()),
    }
}

// Case-insensitive with a bytewise tiebreak so ordering stays total and
// deterministic.
fn compare_strings(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
