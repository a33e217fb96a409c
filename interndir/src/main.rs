// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::io::Write;
use std::sync::Arc;

use actix_web::rt::System;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{info, LevelFilter};

use interndir::api;
use interndir::app_state::AppState;
use interndir::config::{AppConfig, ValidatedConfig};
use interndir::session::password::hash_password;
use interndir::store::{InternStore, SqliteInternStore};

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|arg| arg == "-h" || arg == "--help") {
        print!("{}", help_text());
        return 0;
    }

    // Provisioning mode: print an argon2 hash for ADMIN_PASSWORD_HASH.
    if let Some(position) = args.iter().position(|arg| arg == "--hash-password") {
        let Some(password) = args.get(position + 1) else {
            eprintln!("❌ Missing value for --hash-password");
            return 1;
        };
        return match hash_password(password) {
            Ok(hash) => {
                println!("{}", hash);
                0
            }
            Err(error) => {
                eprintln!("❌ Failed to hash password: {}", error);
                1
            }
        };
    }

    if !args.is_empty() {
        eprintln!("❌ Unknown arguments: {}", args.join(" "));
        eprint!("{}", help_text());
        return 1;
    }

    let config = match AppConfig::from_env().validate() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("❌ {}", error);
            eprintln!("❌ Application cannot start with invalid configuration.");
            return 1;
        }
    };

    init_logging(&config.log_level);

    let store = match SqliteInternStore::open(&config.database_path) {
        Ok(store) => store,
        Err(error) => {
            eprintln!(
                "❌ Failed to open database {}: {}",
                config.database_path.display(),
                error
            );
            return 1;
        }
    };
    let store: Arc<dyn InternStore> = Arc::new(store);

    if let Err(error) = store.seed_if_empty() {
        eprintln!("❌ Failed to seed database: {}", error);
        return 1;
    }

    let state = match AppState::new(&config, store) {
        Ok(state) => Arc::new(state),
        Err(error) => {
            eprintln!("❌ Failed to initialize session gate: {}", error);
            return 1;
        }
    };

    match System::new().block_on(run_server(config, state)) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("❌ Server failed to start: {}", error);
            1
        }
    }
}

async fn run_server(config: ValidatedConfig, state: Arc<AppState>) -> std::io::Result<()> {
    info!("Starting intern directory on {}", config.bind);
    info!("Database: {}", config.database_path.display());
    info!(
        "Session TTL: {} hours, secure cookies: {}",
        config.session.ttl_seconds / 3600,
        config.production
    );
    match state.store.count() {
        Ok(count) => info!("Directory holds {} interns", count),
        Err(error) => log::warn!("Could not count interns at startup: {}", error),
    }

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(state.clone()))
            .app_data(api::json_config())
            .wrap(Logger::new(r#"%a "%r" %s %b %T"#))
            .configure(api::configure)
            .default_service(web::route().to(api::not_found))
    })
    .bind(config.bind)?
    .run()
    .await
}

fn init_logging(level: &str) {
    let filter = match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    };

    // Stable format so log lines stay grep-friendly across environments.
    env_logger::Builder::from_default_env()
        .filter_level(filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

fn help_text() -> String {
    [
        "interndir - intern directory service",
        "",
        "Usage:",
        "  interndir                      start the server",
        "  interndir --hash-password <p>  print an argon2 hash for ADMIN_PASSWORD_HASH",
        "  interndir -h | --help          show this help",
        "",
        "Environment:",
        "  INTERNDIR_BIND                 listen address (default 127.0.0.1:8080)",
        "  INTERNDIR_DB                   SQLite database path (default interns.db)",
        "  SESSION_SECRET                 HMAC secret for session tokens (required)",
        "  ADMIN_PASSWORD_HASH            argon2 hash of the admin password (required)",
        "  INTERNDIR_SESSION_TTL_HOURS    session lifetime (default 8)",
        "  INTERNDIR_PRODUCTION           set to true to mark cookies Secure",
        "  INTERNDIR_LOG                  log level (default info)",
        "",
    ]
    .join("\n")
}
