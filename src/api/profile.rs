// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Developer profile endpoints.
//!
//! Reads are public apart from `/api/profile/me`; every mutation acts on the
//! caller's own profile and runs under the store write lock.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    api::parse_id,
    auth::Auth,
    error::ApiError,
    models::{
        Education, EducationRequest, Experience, ExperienceRequest, MessageResponse, Profile,
        ProfileRequest, ProfileResponse,
    },
    state::AppState,
    storage::{
        DocumentStore, PostRepository, ProfileRepository, StorageError, UserRepository,
    },
    validation::ValidatedJson,
};

const NO_PROFILE: &str = "There is no profile for this user";
const PROFILE_NOT_FOUND: &str = "Profile not found";

/// Attach the owner's public fields to a profile.
fn populate(store: &DocumentStore, profile: Profile) -> Result<ProfileResponse, ApiError> {
    let owner = match UserRepository::new(store).get(&profile.user) {
        Ok(user) => Some(user),
        Err(StorageError::NotFound(_)) => None,
        Err(e) => return Err(e.into()),
    };
    Ok(ProfileResponse::new(profile, owner.as_ref()))
}

fn own_profile(store: &DocumentStore, user_id: &str) -> Result<Profile, ApiError> {
    ProfileRepository::new(store)
        .find_by_user(user_id)?
        .ok_or_else(|| ApiError::not_found(NO_PROFILE))
}

/// Get the caller's profile.
#[utoipa::path(
    get,
    path = "/api/profile/me",
    tag = "Profile",
    security(("x_auth_token" = [])),
    responses(
        (status = 200, description = "Caller's profile", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No profile yet"),
    )
)]
pub async fn get_my_profile(
    State(state): State<AppState>,
    Auth(identity): Auth,
) -> Result<Json<ProfileResponse>, ApiError> {
    let store = state.store.read().await;
    let profile = own_profile(&store, &identity.id)?;
    Ok(Json(populate(&store, profile)?))
}

/// Create the caller's profile, or merge the provided fields into it.
#[utoipa::path(
    post,
    path = "/api/profile",
    tag = "Profile",
    security(("x_auth_token" = [])),
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Stored profile", body = ProfileResponse),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn upsert_profile(
    State(state): State<AppState>,
    Auth(identity): Auth,
    ValidatedJson(request): ValidatedJson<ProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let store = state.store.write().await;
    let profiles = ProfileRepository::new(&store);

    let profile = match profiles.find_by_user(&identity.id)? {
        Some(mut existing) => {
            existing.merge(request);
            existing
        }
        None => {
            tracing::info!(user_id = %identity.id, "Creating profile");
            Profile::create(&identity.id, request)
        }
    };
    profiles.save(&profile)?;

    Ok(Json(populate(&store, profile)?))
}

/// List every profile.
#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "Profile",
    responses((status = 200, description = "All profiles", body = [ProfileResponse]))
)]
pub async fn list_profiles(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfileResponse>>, ApiError> {
    let store = state.store.read().await;
    let profiles = ProfileRepository::new(&store)
        .list_all()?
        .into_iter()
        .map(|profile| populate(&store, profile))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(profiles))
}

/// Get a user's profile.
#[utoipa::path(
    get,
    path = "/api/profile/user/{user_id}",
    tag = "Profile",
    params(("user_id" = String, Path, description = "Owner user id")),
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 404, description = "Profile not found"),
    )
)]
pub async fn get_profile_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user_id = parse_id(&user_id, PROFILE_NOT_FOUND)?;
    let store = state.store.read().await;
    let profile = ProfileRepository::new(&store)
        .find_by_user(&user_id)?
        .ok_or_else(|| ApiError::not_found(PROFILE_NOT_FOUND))?;
    Ok(Json(populate(&store, profile)?))
}

/// Delete the caller's posts, profile and account.
#[utoipa::path(
    delete,
    path = "/api/profile",
    tag = "Profile",
    security(("x_auth_token" = [])),
    responses(
        (status = 200, description = "Account removed", body = MessageResponse),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn delete_profile(
    State(state): State<AppState>,
    Auth(identity): Auth,
) -> Result<Json<MessageResponse>, ApiError> {
    let store = state.store.write().await;

    let posts = PostRepository::new(&store).delete_by_user(&identity.id)?;
    ProfileRepository::new(&store).delete_by_user(&identity.id)?;
    UserRepository::new(&store).delete(&identity.id)?;

    tracing::info!(user_id = %identity.id, posts, "Deleted user");
    Ok(Json(MessageResponse::new("User deleted")))
}

/// Add a work-history entry to the top of the caller's profile.
#[utoipa::path(
    put,
    path = "/api/profile/experience",
    tag = "Profile",
    security(("x_auth_token" = [])),
    request_body = ExperienceRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "No profile yet"),
    )
)]
pub async fn add_experience(
    State(state): State<AppState>,
    Auth(identity): Auth,
    ValidatedJson(request): ValidatedJson<ExperienceRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let experience = Experience::try_from(request)?;

    let store = state.store.write().await;
    let mut profile = own_profile(&store, &identity.id)?;
    profile.experience.insert(0, experience);
    ProfileRepository::new(&store).save(&profile)?;

    Ok(Json(populate(&store, profile)?))
}

/// Remove a work-history entry from the caller's profile.
#[utoipa::path(
    delete,
    path = "/api/profile/experience/{exp_id}",
    tag = "Profile",
    security(("x_auth_token" = [])),
    params(("exp_id" = String, Path, description = "Experience entry id")),
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 404, description = "Profile or entry not found"),
    )
)]
pub async fn delete_experience(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Path(exp_id): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let store = state.store.write().await;
    let mut profile = own_profile(&store, &identity.id)?;

    let index = profile
        .experience
        .iter()
        .position(|entry| entry.id == exp_id)
        .ok_or_else(|| ApiError::not_found("Experience not found"))?;
    profile.experience.remove(index);
    ProfileRepository::new(&store).save(&profile)?;

    Ok(Json(populate(&store, profile)?))
}

/// Add an education entry to the top of the caller's profile.
#[utoipa::path(
    put,
    path = "/api/profile/education",
    tag = "Profile",
    security(("x_auth_token" = [])),
    request_body = EducationRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "No profile yet"),
    )
)]
pub async fn add_education(
    State(state): State<AppState>,
    Auth(identity): Auth,
    ValidatedJson(request): ValidatedJson<EducationRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let education = Education::try_from(request)?;

    let store = state.store.write().await;
    let mut profile = own_profile(&store, &identity.id)?;
    profile.education.insert(0, education);
    ProfileRepository::new(&store).save(&profile)?;

    Ok(Json(populate(&store, profile)?))
}

/// Remove an education entry from the caller's profile.
#[utoipa::path(
    delete,
    path = "/api/profile/education/{edu_id}",
    tag = "Profile",
    security(("x_auth_token" = [])),
    params(("edu_id" = String, Path, description = "Education entry id")),
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 404, description = "Profile or entry not found"),
    )
)]
pub async fn delete_education(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Path(edu_id): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let store = state.store.write().await;
    let mut profile = own_profile(&store, &identity.id)?;

    let index = profile
        .education
        .iter()
        .position(|entry| entry.id == edu_id)
        .ok_or_else(|| ApiError::not_found("Education not found"))?;
    profile.education.remove(index);
    ProfileRepository::new(&store).save(&profile)?;

    Ok(Json(populate(&store, profile)?))
}
