// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::api::{error_json, store_error_response, OkBody};
use crate::app_state::AppState;
use crate::directory::coordinator::validate_draft;
use crate::directory::{CoordinatorError, Intern, InternDraft};
use crate::store::PageRequest;

const DEFAULT_PAGE_SIZE: u64 = 100;
const MAX_PAGE_SIZE: u64 = 1000;

#[derive(Deserialize)]
pub struct ListQuery {
    page: Option<u64>,
    limit: Option<u64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    ok: bool,
    interns: Vec<Intern>,
    total: u64,
    total_pages: u64,
    current_page: u64,
}

#[derive(Serialize)]
struct InternResponse {
    ok: bool,
    intern: Intern,
}

#[derive(Deserialize)]
pub struct BulkRequest {
    #[serde(default)]
    interns: Vec<InternDraft>,
}

#[derive(Serialize)]
struct BulkResponse {
    ok: bool,
    interns: Vec<Intern>,
}

fn validation_response(err: CoordinatorError) -> HttpResponse {
    HttpResponse::BadRequest().json(error_json(&err.to_string()))
}

/// Public read. Seeds the sample roster on first contact so a fresh
/// deployment is never an empty page.
pub async fn list(state: web::Data<AppState>, query: web::Query<ListQuery>) -> HttpResponse {
    if let Err(err) = state.store.seed_if_empty() {
        return store_error_response("Seeding directory", err);
    }
    let total = match state.store.count() {
        Ok(total) => total,
        Err(err) => return store_error_response("Listing interns", err),
    };

    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let total_pages = total.div_ceil(limit).max(1);
    let page = query.page.unwrap_or(1).clamp(1, total_pages);

    let window = PageRequest {
        offset: (page - 1) * limit,
        limit,
    };
    match state.store.list(Some(window)) {
        Ok((interns, total)) => HttpResponse::Ok().json(ListResponse {
            ok: true,
            interns,
            total,
            total_pages,
            current_page: page,
        }),
        Err(err) => store_error_response("Listing interns", err),
    }
}

pub async fn create(
    req: HttpRequest,
    state: web::Data<AppState>,
    draft: web::Json<InternDraft>,
) -> HttpResponse {
    if let Err(response) = state.gate.require_session(&req) {
        return response;
    }
    if let Err(err) = validate_draft(&draft) {
        return validation_response(err);
    }
    match state.store.create(&draft) {
        Ok(intern) => {
            log::info!("Created intern {}", intern.id);
            HttpResponse::Created().json(InternResponse { ok: true, intern })
        }
        Err(err) => store_error_response("Creating intern", err),
    }
}

pub async fn update(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    draft: web::Json<InternDraft>,
) -> HttpResponse {
    if let Err(response) = state.gate.require_session(&req) {
        return response;
    }
    if let Err(err) = validate_draft(&draft) {
        return validation_response(err);
    }
    let id = path.into_inner();
    match state.store.update(&id, &draft) {
        Ok(intern) => {
            log::info!("Updated intern {}", intern.id);
            HttpResponse::Ok().json(InternResponse { ok: true, intern })
        }
        Err(err) => store_error_response("Updating intern", err),
    }
}

pub async fn delete(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    if let Err(response) = state.gate.require_session(&req) {
        return response;
    }
    let id = path.into_inner();
    match state.store.delete(&id) {
        Ok(()) => {
            log::info!("Deleted intern {}", id);
            HttpResponse::Ok().json(OkBody { ok: true })
        }
        Err(err) => store_error_response("Deleting intern", err),
    }
}

/// Insert-or-replace a whole batch, as produced by a CSV import. Every row
/// must validate before any row is written.
pub async fn bulk_upsert(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<BulkRequest>,
) -> HttpResponse {
    if let Err(response) = state.gate.require_session(&req) {
        return response;
    }
    let drafts = &body.interns;
    if drafts.is_empty() {
        return HttpResponse::BadRequest().json(error_json("No interns provided"));
    }
    for (index, draft) in drafts.iter().enumerate() {
        if let Err(err) = validate_draft(draft) {
            return HttpResponse::BadRequest()
                .json(error_json(&format!("Row {}: {}", index + 1, err)));
        }
    }
    match state.store.bulk_upsert(drafts) {
        Ok(interns) => {
            log::info!("Bulk-saved {} interns", interns.len());
            HttpResponse::Ok().json(BulkResponse { ok: true, interns })
        }
        Err(err) => store_error_response("Bulk-saving interns", err),
    }
}

/// Drop everything and restore the sample roster.
pub async fn reseed(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    if let Err(response) = state.gate.require_session(&req) {
        return response;
    }
    match state.store.reset_to_seed() {
        Ok(()) => {
            log::info!("Directory reset to seed data");
            HttpResponse::Ok().json(OkBody { ok: true })
        }
        Err(err) => store_error_response("Reseeding directory", err),
    }
}
