// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login and current-user endpoints.

use axum::{extract::State, Json};

use crate::{
    auth::{password::verify_password_blocking, Auth, Identity},
    error::ApiError,
    models::{LoginRequest, TokenResponse, UserResponse},
    state::AppState,
    storage::UserRepository,
    validation::ValidatedJson,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Get the account behind the presented token.
#[utoipa::path(
    get,
    path = "/api/auth",
    tag = "Auth",
    security(("x_auth_token" = [])),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User no longer exists"),
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    Auth(identity): Auth,
) -> Result<Json<UserResponse>, ApiError> {
    let store = state.store.read().await;
    let user = UserRepository::new(&store).get(&identity.id)?;
    Ok(Json(user.into()))
}

/// Exchange email and password for a token.
#[utoipa::path(
    post,
    path = "/api/auth",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = TokenResponse),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Invalid credentials"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let email = request.email.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    let user = {
        let store = state.store.read().await;
        UserRepository::new(&store).find_by_email(&email)?
    };

    let Some(user) = user else {
        tracing::warn!("Rejected login attempt for unknown email");
        return Err(ApiError::unauthenticated(INVALID_CREDENTIALS));
    };
    if !verify_password_blocking(password, user.password_hash.clone()).await? {
        tracing::warn!(user_id = %user.id, "Rejected login attempt");
        return Err(ApiError::unauthenticated(INVALID_CREDENTIALS));
    }

    let token = state.tokens().issue(&Identity::from(&user))?;
    Ok(Json(TokenResponse { token }))
}
