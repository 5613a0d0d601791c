// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Applied as a route layer to every protected route, so the request is
//! rejected before the handler's other extractors (and its body) run.
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/api/posts", get(posts::list_posts))
//!     .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_auth));
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::extractor::authenticate;
use crate::state::AppState;

/// Verify the request token and attach the [`super::Identity`] to the
/// request extensions, or reject with `401`.
pub async fn require_auth(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    match authenticate(request.headers(), state.tokens()) {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}
