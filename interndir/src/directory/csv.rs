// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::collections::HashMap;

use crate::directory::types::{Intern, InternDraft};

/// Export column order. Import matches header names case-insensitively, so
/// this is also the set of recognized column names.
pub const CSV_COLUMNS: [&str; 11] = [
    "id",
    "name",
    "role",
    "email",
    "phone",
    "projects",
    "manager",
    "startDate",
    "performance",
    "skills",
    "department",
];

const LIST_JOIN: &str = " | ";

#[derive(Debug, PartialEq, Eq)]
pub enum CsvError {
    /// Empty input or a header with no data rows.
    NoDataRows,
}

impl std::fmt::Display for CsvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CsvError::NoDataRows => write!(f, "CSV file has no data rows"),
        }
    }
}

impl std::error::Error for CsvError {}

/// Split raw CSV text into rows of cells. Double quotes escape embedded
/// quotes, commas and newlines lose their meaning inside quotes, and bare
/// carriage returns are dropped.
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if chars.peek() == Some(&'"') => {
                cell.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                row.push(std::mem::take(&mut cell));
            }
            '\n' if !in_quotes => {
                row.push(std::mem::take(&mut cell));
                rows.push(std::mem::take(&mut row));
            }
            '\r' if !in_quotes => {}
            _ => cell.push(ch),
        }
    }
    if !cell.is_empty() || !row.is_empty() {
        row.push(cell);
        rows.push(row);
    }

    rows
}

/// Split a list-valued cell. `|` wins over `;` wins over `,`; items are
/// trimmed and empties dropped.
pub fn parse_list_cell(value: &str) -> Vec<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    let separator = if trimmed.contains('|') {
        '|'
    } else if trimmed.contains(';') {
        ';'
    } else {
        ','
    };
    split_list(trimmed, separator)
}

/// Comma-separated list as typed into the admin form's tag fields.
pub fn normalize_list(value: &str) -> Vec<String> {
    split_list(value, ',')
}

fn split_list(value: &str, separator: char) -> Vec<String> {
    value
        .split(separator)
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Parse an import file into record drafts.
///
/// The header row is matched case-insensitively against `CSV_COLUMNS`;
/// unknown columns are ignored and missing columns default to empty. Rows
/// whose every cell is blank (stray blank lines) are skipped.
pub fn drafts_from_csv(text: &str) -> Result<Vec<InternDraft>, CsvError> {
    let rows = parse_csv(text);
    if rows.len() < 2 {
        return Err(CsvError::NoDataRows);
    }

    // Name -> index lookup, built once; column order in the file is free.
    let columns: HashMap<String, usize> = rows[0]
        .iter()
        .enumerate()
        .map(|(index, name)| (name.trim().to_lowercase(), index))
        .collect();
    let cell = |row: &[String], name: &str| -> String {
        columns
            .get(name)
            .and_then(|&index| row.get(index))
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    };

    let drafts: Vec<InternDraft> = rows[1..]
        .iter()
        .filter(|row| row.iter().any(|value| !value.trim().is_empty()))
        .map(|row| {
            let id = cell(row, "id");
            InternDraft {
                id: if id.is_empty() { None } else { Some(id) },
                name: Some(cell(row, "name")),
                role: Some(cell(row, "role")),
                email: Some(cell(row, "email")),
                phone: Some(cell(row, "phone")),
                image_url: Some(cell(row, "imageurl")),
                projects: Some(parse_list_cell(&cell(row, "projects"))),
                manager: Some(cell(row, "manager")),
                start_date: Some(cell(row, "startdate")),
                performance: Some(cell(row, "performance")),
                skills: Some(parse_list_cell(&cell(row, "skills"))),
                department: Some(cell(row, "department")),
            }
        })
        .collect();

    if drafts.is_empty() {
        return Err(CsvError::NoDataRows);
    }
    Ok(drafts)
}

/// Serialize the full record set with the fixed column order. A faithful
/// inverse of the parser: anything this writes, `drafts_from_csv` reads back.
pub fn to_csv(interns: &[Intern]) -> String {
    let mut lines = vec![CSV_COLUMNS.join(",")];
    for intern in interns {
        let cells = [
            intern.id.clone(),
            intern.name.clone(),
            intern.role.clone(),
            intern.email.clone(),
            intern.phone.clone(),
            intern.projects.join(LIST_JOIN),
            intern.manager.clone(),
            intern.start_date.clone(),
            intern.performance.clone(),
            intern.skills.join(LIST_JOIN),
            intern.department.clone(),
        ];
        let row: Vec<String> = cells.iter().map(|cell| escape_csv(cell)).collect();
        lines.push(row.join(","));
    }
    lines.join("\n")
}

fn escape_csv(value: &str) -> String {
    if value.contains('"') || value.contains(',') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
