// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod coordinator;
pub mod csv;
pub mod pipeline;
pub mod types;

pub use coordinator::{CoordinatorError, DeletePrompt, MutationCoordinator, TagField};
pub use pipeline::{DirectoryPipeline, DirectoryView, SortDirection, SortKey, ViewQuery, FILTER_ALL};
pub use types::{Intern, InternDraft};
