// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! API error type and its fixed mapping onto HTTP responses.
//!
//! | Variant | Status | Body |
//! |---------|--------|------|
//! | `Validation` | 400 | `{"errors":[{"field","message"}]}` |
//! | `NotFound` | 404 | `{"msg"}` |
//! | `Unauthenticated` | 401 | `{"msg"}` |
//! | `Forbidden` | 401 | `{"msg"}` |
//! | `Conflict` | 400 | `{"errors":[{"msg"}]}` |
//! | `Unexpected` | 500 | `Server error` (text) |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::AuthError;
use crate::storage::StorageError;
use crate::validation::ValidationError;

/// Body sent for every unexpected failure.
pub const SERVER_ERROR_BODY: &str = "Server error";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed ({} errors)", .0.len())]
    Validation(Vec<ValidationError>),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("conflict: {0}")]
    Conflict(String),
    /// Internal detail, logged and never sent to the client.
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

/// `{"msg": ...}`
#[derive(Debug, Serialize)]
struct MessageBody {
    msg: String,
}

/// `{"errors": [...]}`
#[derive(Debug, Serialize)]
struct ErrorsBody<T> {
    errors: Vec<T>,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn unexpected(detail: impl Into<String>) -> Self {
        Self::Unexpected(detail.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthenticated(_) | ApiError::Forbidden(_) => StatusCode::UNAUTHORIZED,
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Validation(errors) => (status, Json(ErrorsBody { errors })).into_response(),
            ApiError::Conflict(msg) => (
                status,
                Json(ErrorsBody {
                    errors: vec![MessageBody { msg }],
                }),
            )
                .into_response(),
            ApiError::NotFound(msg) | ApiError::Unauthenticated(msg) | ApiError::Forbidden(msg) => {
                (status, Json(MessageBody { msg })).into_response()
            }
            ApiError::Unexpected(detail) => {
                tracing::error!(error = %detail, "Unexpected failure while handling request");
                (status, SERVER_ERROR_BODY).into_response()
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingToken => ApiError::unauthenticated("No token, authorization denied"),
            AuthError::TokenInvalid | AuthError::TokenExpired => {
                ApiError::unauthenticated("Token is not valid")
            }
            AuthError::Signing(detail) => ApiError::unexpected(format!("token signing: {detail}")),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound(what) => ApiError::not_found(format!("{what} not found")),
            StorageError::AlreadyExists(what) => ApiError::conflict(format!("{what} already exists")),
            StorageError::PermissionDenied { .. } => ApiError::forbidden("User not authorized"),
            other => ApiError::unexpected(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_returns_400_with_field_errors() {
        let response = ApiError::Validation(vec![
            ValidationError::new("name", "Name is required"),
            ValidationError::new("email", "Please include a valid email"),
        ])
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["errors"][0]["field"], "name");
        assert_eq!(body["errors"][0]["message"], "Name is required");
        assert_eq!(body["errors"][1]["field"], "email");
    }

    #[tokio::test]
    async fn conflict_returns_400_with_msg_list() {
        let response = ApiError::conflict("User already exists").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({"errors": [{"msg": "User already exists"}]}));
    }

    #[tokio::test]
    async fn message_variants_use_msg_body() {
        let cases = [
            (ApiError::not_found("Post not found"), StatusCode::NOT_FOUND),
            (ApiError::unauthenticated("No token"), StatusCode::UNAUTHORIZED),
            (ApiError::forbidden("User not authorized"), StatusCode::UNAUTHORIZED),
        ];

        for (error, status) in cases {
            let expected = match &error {
                ApiError::NotFound(m) | ApiError::Unauthenticated(m) | ApiError::Forbidden(m) => {
                    m.clone()
                }
                _ => unreachable!(),
            };
            let response = error.into_response();
            assert_eq!(response.status(), status);
            assert_eq!(body_json(response).await, serde_json::json!({ "msg": expected }));
        }
    }

    #[tokio::test]
    async fn unexpected_hides_detail() {
        let response = ApiError::unexpected("disk on fire at /srv/data").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], SERVER_ERROR_BODY.as_bytes());
    }

    #[test]
    fn auth_errors_collapse_to_unauthenticated() {
        assert!(matches!(
            ApiError::from(AuthError::TokenExpired),
            ApiError::Unauthenticated(ref m) if m == "Token is not valid"
        ));
        assert!(matches!(
            ApiError::from(AuthError::TokenInvalid),
            ApiError::Unauthenticated(ref m) if m == "Token is not valid"
        ));
        assert!(matches!(
            ApiError::from(AuthError::MissingToken),
            ApiError::Unauthenticated(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::Signing("bad key".into())),
            ApiError::Unexpected(_)
        ));
    }

    #[test]
    fn storage_errors_map_to_taxonomy() {
        assert!(matches!(
            ApiError::from(StorageError::NotFound("Post".into())),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(StorageError::AlreadyExists("User".into())),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(StorageError::PermissionDenied {
                user_id: "u2".into(),
                resource: "post".into(),
            }),
            ApiError::Forbidden(ref m) if m == "User not authorized"
        ));
        assert!(matches!(
            ApiError::from(StorageError::NotInitialized),
            ApiError::Unexpected(_)
        ));
    }
}
