// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Post feed endpoints. All routes require a token.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    api::parse_id,
    auth::Auth,
    error::ApiError,
    models::{CreatePostRequest, Like, MessageResponse, Post},
    state::AppState,
    storage::{OwnershipEnforcer, PostRepository, UserRepository},
    validation::ValidatedJson,
};

const POST_NOT_FOUND: &str = "Post not found";

/// Publish a post as the caller.
#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "Posts",
    security(("x_auth_token" = [])),
    request_body = CreatePostRequest,
    responses(
        (status = 200, description = "Created post", body = Post),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    Auth(identity): Auth,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> Result<Json<Post>, ApiError> {
    let store = state.store.write().await;
    let author = UserRepository::new(&store).get(&identity.id)?;

    let post = Post {
        id: Uuid::new_v4().to_string(),
        user: author.id,
        text: request.text.unwrap_or_default(),
        name: author.name,
        avatar: author.avatar,
        likes: Vec::new(),
        date: Utc::now(),
    };
    PostRepository::new(&store).create(&post)?;

    tracing::info!(post_id = %post.id, user_id = %post.user, "Created post");
    Ok(Json(post))
}

/// List every post, newest first.
#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "Posts",
    security(("x_auth_token" = [])),
    responses(
        (status = 200, description = "All posts", body = [Post]),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Auth(_identity): Auth,
) -> Result<Json<Vec<Post>>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(PostRepository::new(&store).list_all()?))
}

/// Get a single post.
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "Posts",
    security(("x_auth_token" = [])),
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post", body = Post),
        (status = 404, description = "Post not found"),
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Auth(_identity): Auth,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    let id = parse_id(&id, POST_NOT_FOUND)?;
    let store = state.store.read().await;
    Ok(Json(PostRepository::new(&store).get(&id)?))
}

/// Delete one of the caller's posts.
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "Posts",
    security(("x_auth_token" = [])),
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post removed", body = MessageResponse),
        (status = 401, description = "Not the author"),
        (status = 404, description = "Post not found"),
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id, POST_NOT_FOUND)?;
    let store = state.store.write().await;
    let posts = PostRepository::new(&store);

    let post = posts.get(&id)?;
    if let Err(e) = post.verify_ownership(&identity) {
        tracing::warn!(post_id = %id, user_id = %identity.id, "Refused to delete post");
        return Err(e.into());
    }
    posts.delete(&id)?;

    Ok(Json(MessageResponse::new("Post removed")))
}

/// Like a post.
#[utoipa::path(
    put,
    path = "/api/posts/like/{id}",
    tag = "Posts",
    security(("x_auth_token" = [])),
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Likes after the update", body = [Like]),
        (status = 400, description = "Already liked"),
        (status = 404, description = "Post not found"),
    )
)]
pub async fn like_post(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Path(id): Path<String>,
) -> Result<Json<Vec<Like>>, ApiError> {
    let id = parse_id(&id, POST_NOT_FOUND)?;
    let store = state.store.write().await;
    let posts = PostRepository::new(&store);

    let mut post = posts.get(&id)?;
    if post.is_liked_by(&identity.id) {
        return Err(ApiError::conflict("Post already liked"));
    }
    post.likes.insert(0, Like { user: identity.id });
    posts.update(&post)?;

    Ok(Json(post.likes))
}

/// Withdraw the caller's like from a post.
#[utoipa::path(
    put,
    path = "/api/posts/unlike/{id}",
    tag = "Posts",
    security(("x_auth_token" = [])),
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Likes after the update", body = [Like]),
        (status = 400, description = "Not liked yet"),
        (status = 404, description = "Post not found"),
    )
)]
pub async fn unlike_post(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Path(id): Path<String>,
) -> Result<Json<Vec<Like>>, ApiError> {
    let id = parse_id(&id, POST_NOT_FOUND)?;
    let store = state.store.write().await;
    let posts = PostRepository::new(&store);

    let mut post = posts.get(&id)?;
    if !post.is_liked_by(&identity.id) {
        return Err(ApiError::conflict("Post has not yet been liked"));
    }
    post.likes.retain(|like| like.user != identity.id);
    posts.update(&post)?;

    Ok(Json(post.likes))
}
