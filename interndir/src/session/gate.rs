// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;

use crate::config::ValidatedConfig;
use crate::session::token::{SessionClaims, SessionTokenCodec, SessionTokenError};

#[derive(Serialize)]
struct UnauthorizedBody {
    ok: bool,
    error: String,
}

/// The single authorization choke point for every mutating operation.
///
/// Extracts the session cookie from a request, validates the token, and
/// produces an allow/deny decision. Issues and clears the cookie on
/// login/logout.
pub struct SessionGate {
    codec: SessionTokenCodec,
    cookie_name: String,
    secure: bool,
}

impl SessionGate {
    pub fn new(config: &ValidatedConfig) -> Result<Self, SessionTokenError> {
        let codec =
            SessionTokenCodec::new(&config.session.secret, config.session.ttl_seconds)?;
        Ok(Self {
            codec,
            cookie_name: config.session.cookie_name.clone(),
            // The secure attribute stays off outside production so the admin
            // console works over plain HTTP on localhost.
            secure: config.production,
        })
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Issue a fresh token and wrap it in the session cookie.
    pub fn issue_session_cookie(&self) -> Result<Cookie<'static>, SessionTokenError> {
        let token = self.codec.issue()?;
        Ok(Cookie::build(self.cookie_name.clone(), token)
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .max_age(Duration::seconds(self.codec.ttl_seconds() as i64))
            .finish())
    }

    /// Same cookie name with an immediate expiry, forcing the client to drop
    /// the session.
    pub fn clear_session_cookie(&self) -> Cookie<'static> {
        Cookie::build(self.cookie_name.clone(), "")
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .max_age(Duration::seconds(0))
            .finish()
    }

    /// Pure function of the request's cookies; no side effects.
    pub fn authenticate(&self, req: &HttpRequest) -> Option<SessionClaims> {
        let cookie = req.cookie(&self.cookie_name)?;
        self.codec.verify(cookie.value())
    }

    /// Callers must return the error response without touching the guarded
    /// operation.
    pub fn require_session(&self, req: &HttpRequest) -> Result<SessionClaims, HttpResponse> {
        match self.authenticate(req) {
            Some(claims) => Ok(claims),
            None => {
                log::warn!(
                    "Unauthorized {} {} rejected",
                    req.method(),
                    req.path()
                );
                Err(HttpResponse::Unauthorized().json(UnauthorizedBody {
                    ok: false,
                    error: "Unauthorized".to_string(),
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use chrono::Utc;

    fn gate() -> SessionGate {
        let config = ValidatedConfig::new_for_tests("test-secret", "unused-hash");
        SessionGate::new(&config).expect("gate")
    }

    #[test]
    fn session_cookie_attributes() {
        let gate = gate();
        let cookie = gate.issue_session_cookie().expect("cookie");
        assert_eq!(cookie.name(), gate.cookie_name());
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(8 * 3600)));
        // Non-production config keeps secure off.
        assert_ne!(cookie.secure(), Some(true));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let gate = gate();
        let cookie = gate.clear_session_cookie();
        assert_eq!(cookie.name(), gate.cookie_name());
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::seconds(0)));
    }

    #[test]
    fn authenticate_accepts_valid_cookie() {
        let gate = gate();
        let cookie = gate.issue_session_cookie().expect("cookie");
        let req = TestRequest::get().cookie(cookie).to_http_request();
        let claims = gate.authenticate(&req).expect("claims");
        assert_eq!(claims.sub, "admin");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn authenticate_rejects_missing_and_garbage_cookies() {
        let gate = gate();

        let req = TestRequest::get().to_http_request();
        assert!(gate.authenticate(&req).is_none());

        let req = TestRequest::get()
            .cookie(Cookie::new(gate.cookie_name().to_string(), "garbage"))
            .to_http_request();
        assert!(gate.authenticate(&req).is_none());
    }

    #[test]
    fn require_session_rejects_without_cookie() {
        let gate = gate();
        let req = TestRequest::post().uri("/interns").to_http_request();
        let response = gate.require_session(&req).expect_err("rejected");
        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }
}
