// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Fixed subject carried by every session token. The directory has a single
/// admin identity; there is nothing else a token could name.
pub const SESSION_SUBJECT: &str = "admin";

const TOKEN_SEPARATOR: char = '.';

#[derive(Debug)]
pub enum SessionTokenError {
    ConfigurationError(String),
    TokenCreationError(String),
}

impl std::fmt::Display for SessionTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionTokenError::ConfigurationError(msg) => {
                write!(f, "Session token configuration error: {}", msg)
            }
            SessionTokenError::TokenCreationError(msg) => {
                write!(f, "Session token creation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for SessionTokenError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub exp: i64,
}

impl SessionClaims {
    pub fn admin(expires_at: i64) -> Self {
        Self {
            sub: SESSION_SUBJECT.to_string(),
            exp: expires_at,
        }
    }
}

/// Builds and validates compact signed session tokens.
///
/// Wire format is `base64url(claims json) + "." + base64url(hmac-sha256)`.
/// Validity is entirely a function of the signature and the embedded expiry;
/// the server holds no session state.
pub struct SessionTokenCodec {
    secret: String,
    ttl_seconds: u64,
}

// Manual impl so the HMAC key can never end up in a log line.
impl std::fmt::Debug for SessionTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenCodec")
            .field("secret", &"<redacted>")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl SessionTokenCodec {
    /// A missing secret is a startup-class failure, not a per-request one.
    pub fn new(secret: &str, ttl_seconds: u64) -> Result<Self, SessionTokenError> {
        if secret.is_empty() {
            return Err(SessionTokenError::ConfigurationError(
                "session secret is not set".to_string(),
            ));
        }
        Ok(Self {
            secret: secret.to_string(),
            ttl_seconds,
        })
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Issue a token for the admin subject expiring one TTL from now.
    pub fn issue(&self) -> Result<String, SessionTokenError> {
        let expires_at = Utc::now().timestamp() + self.ttl_seconds as i64;
        self.issue_claims(&SessionClaims::admin(expires_at))
    }

    pub fn issue_claims(&self, claims: &SessionClaims) -> Result<String, SessionTokenError> {
        let payload = serde_json::to_string(claims)
            .map_err(|e| SessionTokenError::TokenCreationError(e.to_string()))?;
        let encoded = URL_SAFE_NO_PAD.encode(payload.as_bytes());
        let signature = self.sign(&encoded)?;
        Ok(format!("{}{}{}", encoded, TOKEN_SEPARATOR, signature))
    }

    /// Verify a token and return its claims, or `None` for anything
    /// malformed, tampered with, or expired.
    pub fn verify(&self, token: &str) -> Option<SessionClaims> {
        let (encoded, signature) = token.split_once(TOKEN_SEPARATOR)?;
        if encoded.is_empty() || signature.is_empty() {
            return None;
        }

        let expected = self.sign(encoded).ok()?;
        // Length is not secret; only the byte comparison must be constant
        // time.
        if signature.len() != expected.len() {
            return None;
        }
        if !bool::from(signature.as_bytes().ct_eq(expected.as_bytes())) {
            return None;
        }

        let payload = URL_SAFE_NO_PAD.decode(encoded).ok()?;
        let claims: SessionClaims = serde_json::from_slice(&payload).ok()?;
        if claims.exp < Utc::now().timestamp() {
            return None;
        }
        Some(claims)
    }

    fn sign(&self, payload: &str) -> Result<String, SessionTokenError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| SessionTokenError::ConfigurationError(e.to_string()))?;
        mac.update(payload.as_bytes());
        Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
    }
}
