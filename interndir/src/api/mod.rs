// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::store::StoreError;

mod auth;
mod interns;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/interns")
            .route(web::get().to(interns::list))
            .route(web::post().to(interns::create))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/interns/bulk")
            .route(web::post().to(interns::bulk_upsert))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/interns/{id}")
            .route(web::put().to(interns::update))
            .route(web::delete().to(interns::delete))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/seed")
            .route(web::post().to(interns::reseed))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/login")
            .route(web::post().to(auth::login))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/logout")
            .route(web::post().to(auth::logout))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/session")
            .route(web::get().to(auth::session))
            .default_service(web::route().to(method_not_allowed)),
    );
}

#[derive(Serialize)]
pub(crate) struct ErrorBody {
    pub ok: bool,
    pub error: String,
}

#[derive(Serialize)]
pub(crate) struct OkBody {
    pub ok: bool,
}

pub(crate) fn error_json(error: &str) -> ErrorBody {
    ErrorBody {
        ok: false,
        error: error.to_string(),
    }
}

/// Body deserialization failures answer in the same `{ok:false,error}` shape
/// as every other failure instead of actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(error_json("Invalid request body"));
        actix_web::error::InternalError::from_response(err, response).into()
    })
}

/// Known path, wrong method.
async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(error_json("Method not allowed"))
}

/// App-level fallback for paths nothing claims.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(error_json("Not found"))
}

/// One place decides the status for every store failure. Backend details go
/// to the log, not the client.
pub(crate) fn store_error_response(operation: &str, err: StoreError) -> HttpResponse {
    match err {
        StoreError::Validation(message) => HttpResponse::BadRequest().json(error_json(&message)),
        StoreError::NotFound => HttpResponse::NotFound().json(error_json("Not found")),
        StoreError::Backend(detail) => {
            log::error!("{} failed: {}", operation, detail);
            HttpResponse::InternalServerError().json(error_json("Storage error"))
        }
    }
}
