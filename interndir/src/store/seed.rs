// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::directory::types::Intern;

fn record(
    id: &str,
    name: &str,
    role: &str,
    email: &str,
    phone: &str,
    projects: &[&str],
    manager: &str,
    start_date: &str,
    performance: &str,
    skills: &[&str],
    department: &str,
) -> Intern {
    Intern {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        image_url: String::new(),
        projects: projects.iter().map(|p| p.to_string()).collect(),
        manager: manager.to_string(),
        start_date: start_date.to_string(),
        performance: performance.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        department: department.to_string(),
    }
}

/// The fixed sample roster used to initialize or reset the directory.
pub fn seed_interns() -> Vec<Intern> {
    vec![
        record(
            "ID01",
            "Ana Martinez",
            "Software Engineer",
            "ana.martinez@example.com",
            "555-0101",
            &["Onboarding Portal", "API Gateway"],
            "Priya Shah",
            "2026-06-01",
            "Exceeds expectations",
            &["Rust", "SQL"],
            "Platform",
        ),
        record(
            "ID02",
            "Ben Okafor",
            "Software Engineer",
            "ben.okafor@example.com",
            "555-0102",
            &["API Gateway"],
            "Priya Shah",
            "2026-06-01",
            "Meets expectations",
            &["Go", "Kubernetes"],
            "Platform",
        ),
        record(
            "ID03",
            "Carla Nguyen",
            "Product Designer",
            "carla.nguyen@example.com",
            "555-0103",
            &["Onboarding Portal"],
            "Lena Fischer",
            "2026-06-08",
            "Exceeds expectations",
            &["Figma", "User research"],
            "Design",
        ),
        record(
            "ID04",
            "Diego Rossi",
            "Data Analyst",
            "diego.rossi@example.com",
            "555-0104",
            &["Metrics Warehouse"],
            "Sam Porter",
            "2026-06-15",
            "Meets expectations",
            &["Python", "dbt"],
            "Data",
        ),
        record(
            "ID05",
            "Emi Tanaka",
            "Software Engineer",
            "emi.tanaka@example.com",
            "555-0105",
            &["Mobile App", "API Gateway"],
            "Priya Shah",
            "2026-06-15",
            "Outstanding",
            &["Swift", "TypeScript"],
            "Mobile",
        ),
        record(
            "ID06",
            "Farah Haddad",
            "QA Engineer",
            "farah.haddad@example.com",
            "555-0106",
            &["Mobile App"],
            "Sam Porter",
            "2026-06-22",
            "Meets expectations",
            &["Test automation"],
            "Quality",
        ),
        record(
            "ID07",
            "Gustav Lindqvist",
            "Product Manager",
            "gustav.lindqvist@example.com",
            "555-0107",
            &["Metrics Warehouse", "Onboarding Portal"],
            "Lena Fischer",
            "2026-07-01",
            "Meets expectations",
            &["Roadmapping"],
            "Product",
        ),
        record(
            "ID08",
            "Hana Kim",
            "Security Engineer",
            "hana.kim@example.com",
            "",
            &[],
            "Priya Shah",
            "",
            "",
            &["Threat modeling", "Rust"],
            "Platform",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::types::{is_valid_email, is_valid_start_date};
    use std::collections::HashSet;

    #[test]
    fn seed_ids_are_unique_and_sequential_format() {
        let seeds = seed_interns();
        let ids: HashSet<_> = seeds.iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids.len(), seeds.len());
        for intern in &seeds {
            assert!(intern.id.starts_with("ID"));
            assert!(intern.id[2..].bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn seed_records_pass_field_validation() {
        for intern in seed_interns() {
            assert!(!intern.name.trim().is_empty());
            assert!(!intern.role.trim().is_empty());
            assert!(is_valid_email(&intern.email));
            assert!(is_valid_start_date(&intern.start_date));
            assert!(intern.projects.iter().all(|p| !p.trim().is_empty()));
            assert!(intern.skills.iter().all(|s| !s.trim().is_empty()));
        }
    }
}
