// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated callers.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(identity): Auth) -> impl IntoResponse {
//!     // identity is the verified Identity
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use super::{AuthError, Identity, TokenCodec};
use crate::state::AppState;

/// Header the client resubmits its token in.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Pull the raw token out of the request headers.
///
/// `x-auth-token: <token>` is preferred; `Authorization: Bearer <token>` is
/// accepted as well, with the scheme matched case-insensitively.
pub fn token_from_headers(headers: &HeaderMap) -> Result<&str, AuthError> {
    if let Some(value) = headers.get(AUTH_TOKEN_HEADER) {
        let token = value.to_str().map_err(|_| AuthError::TokenInvalid)?.trim();
        if !token.is_empty() {
            return Ok(token);
        }
    }

    match headers.get(AUTHORIZATION) {
        None => Err(AuthError::MissingToken),
        Some(value) => value
            .to_str()
            .ok()
            .and_then(|v| v.trim_start().split_once(' '))
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Bearer"))
            .map(|(_, token)| token.trim())
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::TokenInvalid),
    }
}

/// Extract and verify the token carried by `headers`.
pub fn authenticate(headers: &HeaderMap, codec: &TokenCodec) -> Result<Identity, AuthError> {
    let token = token_from_headers(headers)?;
    codec.verify(token).inspect_err(|e| {
        tracing::warn!(reason = e.error_code(), "Rejected request token");
    })
}

/// Extractor for the verified caller identity.
///
/// Reads the identity attached by [`super::middleware::require_auth`]; when
/// the handler is mounted without that layer it verifies the header itself.
///
/// # Example
///
/// ```rust,ignore
/// async fn get_my_profile(
///     Auth(identity): Auth,
///     State(state): State<AppState>,
/// ) -> Result<Json<ProfileResponse>, ApiError> {
///     // identity.id is the caller's user id
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Auth(pub Identity);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<Identity>().cloned() {
            return Ok(Auth(identity));
        }

        let identity = authenticate(&parts.headers, state.tokens())?;
        parts.extensions.insert(identity.clone());
        Ok(Auth(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::test_state;
    use axum::http::Request;

    fn parts_with(header: Option<(&str, String)>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some((name, value)) = header {
            builder = builder.header(name, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn auth_extractor_requires_token() {
        let (state, _temp) = test_state();
        let mut parts = parts_with(None);

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingToken)));
    }

    #[tokio::test]
    async fn auth_extractor_accepts_x_auth_token() {
        let (state, _temp) = test_state();
        let token = state.tokens().issue(&Identity::new("user_123", "Ada")).unwrap();
        let mut parts = parts_with(Some((AUTH_TOKEN_HEADER, token)));

        let Auth(identity) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(identity.id, "user_123");
        assert_eq!(parts.extensions.get::<Identity>(), Some(&identity));
    }

    #[tokio::test]
    async fn auth_extractor_accepts_bearer_header() {
        let (state, _temp) = test_state();
        let token = state.tokens().issue(&Identity::new("user_123", "Ada")).unwrap();
        let mut parts = parts_with(Some(("Authorization", format!("Bearer {token}"))));

        let Auth(identity) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(identity.name, "Ada");
    }

    #[tokio::test]
    async fn auth_extractor_rejects_bad_token() {
        let (state, _temp) = test_state();
        let mut parts = parts_with(Some((AUTH_TOKEN_HEADER, "abc.def.ghi".to_string())));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::TokenInvalid)));
    }

    #[tokio::test]
    async fn auth_extractor_prefers_extensions() {
        let (state, _temp) = test_state();
        let mut parts = parts_with(None);
        let identity = Identity::new("user_from_middleware", "Grace");
        parts.extensions.insert(identity.clone());

        let Auth(found) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(found, identity);
    }

    #[test]
    fn bearer_scheme_ignores_case() {
        for value in ["bearer abc.def", "BEARER abc.def", "Bearer   abc.def"] {
            let mut headers = HeaderMap::new();
            headers.insert(AUTHORIZATION, value.parse().unwrap());
            assert_eq!(token_from_headers(&headers), Ok("abc.def"), "{value}");
        }
    }

    #[test]
    fn non_bearer_authorization_is_invalid() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());
        assert_eq!(token_from_headers(&headers), Err(AuthError::TokenInvalid));
    }

    #[test]
    fn blank_x_auth_token_counts_as_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTH_TOKEN_HEADER, "  ".parse().unwrap());
        assert_eq!(token_from_headers(&headers), Err(AuthError::MissingToken));
    }
}
