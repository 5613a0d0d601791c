// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account registration.

use axum::{extract::State, Json};
use chrono::Utc;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{
    auth::{password::hash_password_blocking, Identity},
    error::ApiError,
    models::{RegisterRequest, TokenResponse, User},
    state::AppState,
    storage::UserRepository,
    validation::ValidatedJson,
};

/// Gravatar URL for `email`: 200px, PG rated, "mystery man" fallback.
pub fn gravatar_url(email: &str) -> String {
    let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
    format!("https://www.gravatar.com/avatar/{digest:x}?s=200&r=pg&d=mm")
}

/// Register a new account and return a token for it.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = TokenResponse),
        (status = 400, description = "Validation failed or email already registered"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let name = request.name.unwrap_or_default().trim().to_string();
    let email = request.email.unwrap_or_default().trim().to_lowercase();
    let password_hash = hash_password_blocking(request.password.unwrap_or_default()).await?;

    let user = User {
        id: Uuid::new_v4().to_string(),
        avatar: gravatar_url(&email),
        name,
        email,
        password_hash,
        date: Utc::now(),
    };

    {
        let store = state.store.write().await;
        let users = UserRepository::new(&store);
        if users.find_by_email(&user.email)?.is_some() {
            return Err(ApiError::conflict("User already exists"));
        }
        users.create(&user)?;
    }

    tracing::info!(user_id = %user.id, "Registered new user");

    let token = state.tokens().issue(&Identity::from(&user))?;
    Ok(Json(TokenResponse { token }))
}
