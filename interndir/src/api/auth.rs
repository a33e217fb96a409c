// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::api::{error_json, OkBody};
use crate::app_state::AppState;
use crate::session::password::verify_password;

#[derive(Deserialize)]
pub struct LoginRequest {
    password: Option<String>,
}

#[derive(Serialize)]
struct SessionStatus {
    ok: bool,
    authed: bool,
}

// Auth responses are never cacheable.
const NO_STORE: (header::HeaderName, &str) = (header::CACHE_CONTROL, "no-store");

pub async fn login(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> HttpResponse {
    let Some(password) = body.password.as_deref().filter(|value| !value.is_empty()) else {
        return HttpResponse::BadRequest()
            .insert_header(NO_STORE)
            .json(error_json("Password required"));
    };
    if !verify_password(password, &state.admin_password_hash) {
        log::warn!(
            "Failed admin login from {}",
            req.peer_addr()
                .map(|addr| addr.ip().to_string())
                .unwrap_or_else(|| "unknown".to_string())
        );
        return HttpResponse::Unauthorized()
            .insert_header(NO_STORE)
            .json(error_json("Invalid password"));
    }

    let cookie = match state.gate.issue_session_cookie() {
        Ok(cookie) => cookie,
        Err(err) => {
            log::error!("Session token creation failed: {}", err);
            return HttpResponse::InternalServerError()
                .insert_header(NO_STORE)
                .json(error_json("Login failed"));
        }
    };

    log::info!("Admin session opened");
    HttpResponse::Ok()
        .cookie(cookie)
        .insert_header(NO_STORE)
        .json(OkBody { ok: true })
}

pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(state.gate.clear_session_cookie())
        .insert_header(NO_STORE)
        .json(OkBody { ok: true })
}

/// Lets the admin page decide what to render without a failing probe call.
pub async fn session(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let authed = state.gate.authenticate(&req).is_some();
    HttpResponse::Ok()
        .insert_header(NO_STORE)
        .json(SessionStatus { ok: true, authed })
}
