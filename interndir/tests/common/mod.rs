// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};
use interndir::api;
use interndir::app_state::AppState;
use interndir::config::{AppConfig, ValidatedConfig};
use interndir::session::password::hash_password;
use interndir::store::{InternStore, SqliteInternStore};

pub const ADMIN_PASSWORD: &str = "admin-password";

pub struct TestHarness {
    pub config: ValidatedConfig,
    pub app_state: Arc<AppState>,
    pub store: Arc<dyn InternStore>,
}

impl TestHarness {
    pub fn new() -> Self {
        let config = build_config();
        let store: Arc<dyn InternStore> =
            Arc::new(SqliteInternStore::open_in_memory().expect("store"));
        let app_state = Arc::new(AppState::new(&config, store.clone()).expect("app state"));
        Self {
            config,
            app_state,
            store,
        }
    }

    /// A valid admin session cookie, bypassing the login endpoint.
    pub fn admin_cookie(&self) -> Cookie<'static> {
        self.app_state
            .gate
            .issue_session_cookie()
            .expect("session cookie")
    }
}

fn build_config() -> ValidatedConfig {
    AppConfig {
        bind_address: "127.0.0.1:0".to_string(),
        database_path: ":memory:".to_string(),
        session_secret: "integration-test-secret".to_string(),
        admin_password_hash: hash_password(ADMIN_PASSWORD).expect("password hash"),
        session_ttl_hours: String::new(),
        production: "false".to_string(),
        log_level: "warn".to_string(),
    }
    .validate()
    .expect("test config")
}

pub fn build_test_app(
    app_state: Arc<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::from(app_state))
        .app_data(api::json_config())
        .configure(api::configure)
        .default_service(web::route().to(api::not_found))
}

pub fn intern_json(name: &str, role: &str, email: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "role": role,
        "email": email,
    })
}
