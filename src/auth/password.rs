// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing with PBKDF2-HMAC-SHA256.
//!
//! Stored format: `pbkdf2-sha256$<iterations>$<salt b64>$<hash b64>`.

use std::num::NonZeroU32;

use base64ct::{Base64, Encoding};
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};

use super::AuthError;
use crate::error::ApiError;

const SCHEME: &str = "pbkdf2-sha256";
const ITERATIONS: u32 = 100_000;
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

static ALGORITHM: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let iterations = NonZeroU32::new(ITERATIONS)
        .ok_or_else(|| AuthError::Signing("pbkdf2 iterations must be non-zero".to_string()))?;

    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| AuthError::Signing("system randomness unavailable".to_string()))?;

    let mut hash = [0u8; HASH_LEN];
    pbkdf2::derive(ALGORITHM, iterations, &salt, password.as_bytes(), &mut hash);

    Ok(format!(
        "{SCHEME}${ITERATIONS}${}${}",
        Base64::encode_string(&salt),
        Base64::encode_string(&hash)
    ))
}

/// Check `password` against a value produced by [`hash_password`].
///
/// Unparseable stored hashes never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(SCHEME), Some(iterations), Some(salt), Some(hash), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };

    let Some(iterations) = iterations.parse().ok().and_then(NonZeroU32::new) else {
        return false;
    };
    let (Ok(salt), Ok(hash)) = (Base64::decode_vec(salt), Base64::decode_vec(hash)) else {
        return false;
    };

    pbkdf2::verify(ALGORITHM, iterations, &salt, password.as_bytes(), &hash).is_ok()
}

/// [`hash_password`] on the blocking pool, off the async workers.
pub async fn hash_password_blocking(password: String) -> Result<String, ApiError> {
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::unexpected(format!("password hashing task failed: {e}")))??;
    Ok(hash)
}

/// [`verify_password`] on the blocking pool, off the async workers.
pub async fn verify_password_blocking(password: String, stored: String) -> Result<bool, ApiError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .map_err(|e| ApiError::unexpected(format!("password verification task failed: {e}")))
}
