// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity token codec.
//!
//! Tokens are HS256 JWTs carrying [`Claims`]. They are stateless: nothing is
//! stored server-side, so a token stays valid until `exp` and cannot be
//! revoked early.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::{Claims, Identity};
use super::AuthError;

/// Default token lifetime (one hour).
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

/// Issues and verifies identity tokens with a shared secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Build a codec from the signing secret.
    ///
    /// # Errors
    /// `AuthError::Signing` if the secret is empty.
    pub fn new(secret: &str, ttl_secs: u64) -> Result<Self, AuthError> {
        if secret.trim().is_empty() {
            return Err(AuthError::Signing("signing secret is empty".to_string()));
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        })
    }

    /// Sign a token for `identity`, valid for the configured TTL from now.
    pub fn issue(&self, identity: &Identity) -> Result<String, AuthError> {
        self.issue_at(identity, Utc::now().timestamp())
    }

    /// Sign a token as if issued at `now` (unix seconds).
    pub fn issue_at(&self, identity: &Identity, now: i64) -> Result<String, AuthError> {
        let claims = Claims::new(identity.clone(), now, self.ttl_secs);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify a token against the current time.
    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token's signature, then its expiry against `now`.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Identity, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against `now` with no leeway.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AuthError::TokenInvalid
        })?;

        if data.claims.is_expired_at(now) {
            return Err(AuthError::TokenExpired);
        }

        Ok(data.claims.user)
    }
}
