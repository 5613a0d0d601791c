// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

/// Authentication error type.
///
/// `TokenInvalid` and `TokenExpired` are kept apart for logging; clients see
/// the same response for both.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No token header present
    #[error("no token supplied")]
    MissingToken,
    /// Malformed token, bad signature or missing claims
    #[error("token is invalid")]
    TokenInvalid,
    /// Token is past its `exp`
    #[error("token has expired")]
    TokenExpired,
    /// Signing key misconfiguration
    #[error("token signing failed: {0}")]
    Signing(String),
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "missing_token",
            AuthError::TokenInvalid => "token_invalid",
            AuthError::TokenExpired => "token_expired",
            AuthError::Signing(_) => "signing_error",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
