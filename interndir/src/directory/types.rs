// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A directory record as exposed to clients. Optional fields are always
/// coerced to empty strings or empty lists at the store boundary; consumers
/// never see nulls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Intern {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub image_url: String,
    pub projects: Vec<String>,
    pub manager: String,
    pub start_date: String,
    pub performance: String,
    pub skills: Vec<String>,
    pub department: String,
}

impl Intern {
    /// Full-record draft for full-replace updates. Every field is supplied so
    /// the store's "missing means empty" semantics cannot blank anything.
    pub fn to_draft(&self) -> InternDraft {
        InternDraft {
            id: Some(self.id.clone()),
            name: Some(self.name.clone()),
            role: Some(self.role.clone()),
            email: Some(self.email.clone()),
            phone: Some(self.phone.clone()),
            image_url: Some(self.image_url.clone()),
            projects: Some(self.projects.clone()),
            manager: Some(self.manager.clone()),
            start_date: Some(self.start_date.clone()),
            performance: Some(self.performance.clone()),
            skills: Some(self.skills.clone()),
            department: Some(self.department.clone()),
        }
    }
}

/// Incoming record fields. Absent fields default to empty on writes; the
/// update contract is full-replace, never partial patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InternDraft {
    pub id: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub projects: Option<Vec<String>>,
    pub manager: Option<String>,
    pub start_date: Option<String>,
    pub performance: Option<String>,
    pub skills: Option<Vec<String>>,
    pub department: Option<String>,
}

/// Trim tag entries and drop the empty ones. Tag lists never contain
/// whitespace-only entries.
pub fn normalize_tags(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

/// Basic `local@domain.tld` shape check, matching the admin form's rule:
/// no whitespace, exactly one `@`, and a dot somewhere in the domain.
pub fn is_valid_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Start dates are either empty or ISO `YYYY-MM-DD`.
pub fn is_valid_start_date(value: &str) -> bool {
    value.is_empty() || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}
