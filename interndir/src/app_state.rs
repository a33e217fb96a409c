// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::sync::Arc;

use crate::config::ValidatedConfig;
use crate::session::{SessionGate, SessionTokenError};
use crate::store::InternStore;

/// Everything the handlers need, shared via `web::Data<AppState>`.
pub struct AppState {
    pub gate: SessionGate,
    pub store: Arc<dyn InternStore>,
    pub admin_password_hash: String,
}

impl AppState {
    pub fn new(
        config: &ValidatedConfig,
        store: Arc<dyn InternStore>,
    ) -> Result<Self, SessionTokenError> {
        Ok(Self {
            gate: SessionGate::new(config)?,
            store,
            admin_password_hash: config.admin_password_hash.clone(),
        })
    }
}
