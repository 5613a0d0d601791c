// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::any::Any;

use axum::{
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use crate::{
    auth::{extractor::AUTH_TOKEN_HEADER, require_auth},
    error::ApiError,
    models::{
        CreatePostRequest, Education, EducationRequest, Experience, ExperienceRequest, Like,
        LoginRequest, MessageResponse, Post, ProfileRequest, ProfileResponse, RegisterRequest,
        Social, TokenResponse, UserResponse, UserSummary,
    },
    state::AppState,
    validation::ValidationError,
};

pub mod auth;
pub mod health;
pub mod posts;
pub mod profile;
pub mod users;

/// Normalize a path identifier, or fail with `not_found` if it is not a UUID.
///
/// Only the normalized form ever reaches the document store.
pub(crate) fn parse_id(raw: &str, not_found: &str) -> Result<String, ApiError> {
    Uuid::parse_str(raw)
        .map(|id| id.to_string())
        .map_err(|_| ApiError::not_found(not_found))
}

fn handle_panic(_panic: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::unexpected("request handler panicked").into_response()
}

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/api/users", post(users::register))
        .route("/api/auth", post(auth::login))
        .route("/api/profile", get(profile::list_profiles))
        .route(
            "/api/profile/user/{user_id}",
            get(profile::get_profile_by_user),
        );

    let protected_routes = Router::new()
        .route("/api/auth", get(auth::get_current_user))
        .route("/api/profile/me", get(profile::get_my_profile))
        .route(
            "/api/profile",
            post(profile::upsert_profile).delete(profile::delete_profile),
        )
        .route("/api/profile/experience", put(profile::add_experience))
        .route(
            "/api/profile/experience/{exp_id}",
            delete(profile::delete_experience),
        )
        .route("/api/profile/education", put(profile::add_education))
        .route(
            "/api/profile/education/{edu_id}",
            delete(profile::delete_education),
        )
        .route("/api/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/api/posts/{id}",
            get(posts::get_post).delete(posts::delete_post),
        )
        .route("/api/posts/like/{id}", put(posts::like_post))
        .route("/api/posts/unlike/{id}", put(posts::unlike_post))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()));

    with_middleware(app)
}

/// Request id, tracing, panic recovery and CORS around `app`.
fn with_middleware(app: Router) -> Router {
    app.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(CatchPanicLayer::custom(handle_panic)),
    )
    .layer(CorsLayer::permissive())
}

/// Registers the `x-auth-token` header scheme referenced by protected paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "x_auth_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(AUTH_TOKEN_HEADER))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        users::register,
        auth::get_current_user,
        auth::login,
        profile::get_my_profile,
        profile::upsert_profile,
        profile::list_profiles,
        profile::get_profile_by_user,
        profile::delete_profile,
        profile::add_experience,
        profile::delete_experience,
        profile::add_education,
        profile::delete_education,
        posts::create_post,
        posts::list_posts,
        posts::get_post,
        posts::delete_post,
        posts::like_post,
        posts::unlike_post
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            TokenResponse,
            UserResponse,
            UserSummary,
            MessageResponse,
            ProfileRequest,
            ProfileResponse,
            Experience,
            ExperienceRequest,
            Education,
            EducationRequest,
            Social,
            Post,
            Like,
            CreatePostRequest,
            ValidationError,
            health::HealthResponse,
            health::HealthChecks
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Users", description = "Account registration"),
        (name = "Auth", description = "Login and current user"),
        (name = "Profile", description = "Developer profiles"),
        (name = "Posts", description = "Post feed and likes")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Identity, TokenCodec};
    use crate::error::SERVER_ERROR_BODY;
    use crate::state::test_support::{test_state, TEST_SECRET};
    use axum::{
        body::{to_bytes, Body},
        http::{self, header::CONTENT_TYPE, Method, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = http::Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTH_TOKEN_HEADER, token);
        }
        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn register(app: &Router, name: &str, email: &str) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/users",
            None,
            Some(json!({"name": name, "email": email, "password": "secret1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    #[test]
    fn parse_id_normalizes_or_rejects() {
        let id = Uuid::new_v4();
        assert_eq!(
            parse_id(&id.to_string().to_uppercase(), "x").unwrap(),
            id.to_string()
        );
        assert!(matches!(parse_id("../etc/passwd", "Gone"), Err(ApiError::NotFound(ref m)) if m == "Gone"));
    }

    #[tokio::test]
    async fn register_then_fetch_current_user() {
        let (state, _temp) = test_state();
        let app = router(state);

        let token = register(&app, "Ada", "ada@example.com").await;
        let (status, body) = send(&app, Method::GET, "/api/auth", Some(&token), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Ada");
        assert_eq!(body["email"], "ada@example.com");
        assert!(body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn duplicate_registration_is_conflict() {
        let (state, _temp) = test_state();
        let app = router(state);

        register(&app, "Ada", "ada@example.com").await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/users",
            None,
            Some(json!({"name": "Ada", "email": "ada@example.com", "password": "secret1"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"errors": [{"msg": "User already exists"}]}));
    }

    #[tokio::test]
    async fn registration_validation_lists_every_failure() {
        let (state, _temp) = test_state();
        let app = router(state);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/users",
            None,
            Some(json!({"email": "not-an-email", "password": "123"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let fields: Vec<&str> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["name", "email", "password"]);
    }

    #[tokio::test]
    async fn malformed_body_is_a_validation_error() {
        let (state, _temp) = test_state();
        let app = router(state);

        let request = http::Request::builder()
            .method(Method::POST)
            .uri("/api/auth")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["errors"][0]["field"], "body");
    }

    #[tokio::test]
    async fn guard_rejects_missing_invalid_and_expired_tokens() {
        let (state, _temp) = test_state();
        let app = router(state);

        let (status, body) = send(&app, Method::GET, "/api/posts", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"msg": "No token, authorization denied"}));

        let (status, body) = send(&app, Method::GET, "/api/posts", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"msg": "Token is not valid"}));

        let expired = TokenCodec::new(TEST_SECRET, 60)
            .unwrap()
            .issue_at(&Identity::new(Uuid::new_v4().to_string(), "Ada"), 0)
            .unwrap();
        let (status, body) = send(&app, Method::GET, "/api/posts", Some(&expired), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"msg": "Token is not valid"}));
    }

    #[tokio::test]
    async fn guard_runs_before_body_validation() {
        let (state, _temp) = test_state();
        let app = router(state);

        let (status, body) = send(&app, Method::POST, "/api/posts", None, Some(json!({}))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["msg"], "No token, authorization denied");
    }

    #[tokio::test]
    async fn login_round_trip() {
        let (state, _temp) = test_state();
        let app = router(state);
        register(&app, "Ada", "ada@example.com").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth",
            None,
            Some(json!({"email": "ada@example.com", "password": "secret1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["token"].is_string());

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth",
            None,
            Some(json!({"email": "ada@example.com", "password": "wrong-one"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"msg": "Invalid credentials"}));
    }

    #[tokio::test]
    async fn profile_flow_over_http() {
        let (state, _temp) = test_state();
        let app = router(state);
        let token = register(&app, "Ada", "ada@example.com").await;

        let (status, _) = send(&app, Method::GET, "/api/profile/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/profile",
            Some(&token),
            Some(json!({"status": "Developer", "skills": "rust, axum", "twitter": "https://x.test/ada"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills"], json!(["rust", "axum"]));
        assert_eq!(body["user"]["name"], "Ada");
        let user_id = body["user"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(&app, Method::GET, "/api/profile", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let uri = format!("/api/profile/user/{user_id}");
        let (status, body) = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["social"]["twitter"], "https://x.test/ada");

        let (status, body) = send(&app, Method::GET, "/api/profile/user/nope", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"msg": "Profile not found"}));

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/profile/experience",
            Some(&token),
            Some(json!({"title": "Engineer", "company": "Acme", "from": "2021-03-01"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["experience"][0]["title"], "Engineer");

        let (status, body) = send(&app, Method::DELETE, "/api/profile", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"msg": "User deleted"}));

        let (status, _) = send(&app, Method::GET, "/api/auth", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn post_flow_over_http() {
        let (state, _temp) = test_state();
        let app = router(state);
        let ada = register(&app, "Ada", "ada@example.com").await;
        let grace = register(&app, "Grace", "grace@example.com").await;

        let (status, body) = send(&app, Method::POST, "/api/posts", Some(&ada), Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["message"], "Text is required");

        let (status, post) = send(
            &app,
            Method::POST,
            "/api/posts",
            Some(&ada),
            Some(json!({"text": "Hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = post["id"].as_str().unwrap().to_string();

        let like_uri = format!("/api/posts/like/{id}");
        let (status, likes) = send(&app, Method::PUT, &like_uri, Some(&grace), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(likes.as_array().unwrap().len(), 1);

        let (status, body) = send(&app, Method::PUT, &like_uri, Some(&grace), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"errors": [{"msg": "Post already liked"}]}));

        let post_uri = format!("/api/posts/{id}");
        let (status, body) = send(&app, Method::DELETE, &post_uri, Some(&grace), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"msg": "User not authorized"}));

        let (status, body) = send(&app, Method::DELETE, &post_uri, Some(&ada), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"msg": "Post removed"}));

        let (status, body) = send(&app, Method::GET, &post_uri, Some(&ada), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"msg": "Post not found"}));
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let (state, _temp) = test_state();
        let app = router(state);

        let request = http::Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    #[allow(unreachable_code)]
    async fn panicking_handler_becomes_server_error() {
        let app = with_middleware(Router::new().route(
            "/boom",
            get(|| async {
                panic!("handler failed");
                ()
            }),
        ));

        let request = http::Request::builder()
            .uri("/boom")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().contains_key("x-request-id"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], SERVER_ERROR_BODY.as_bytes());
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (state, _temp) = test_state();
        let app = router(state);

        let (status, body) = send(&app, Method::GET, "/api-doc/openapi.json", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/posts/{id}"].is_object());
        assert!(body["components"]["securitySchemes"]["x_auth_token"].is_object());
    }
}
