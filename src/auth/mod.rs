// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless token authentication for the DevConnect API.
//!
//! ## Auth Flow
//!
//! 1. Client registers (`POST /api/users`) or logs in (`POST /api/auth`)
//!    and receives `{ "token": "<jwt>" }`
//! 2. Client sends `x-auth-token: <jwt>` (or `Authorization: Bearer <jwt>`)
//!    on every protected request
//! 3. Server:
//!    - Verifies the HS256 signature with the configured secret
//!    - Rejects the token once `now >= exp`
//!    - Attaches the recovered [`Identity`] to the request
//!
//! ## Security
//!
//! - Invalid and expired tokens produce the same client response
//! - No server-side sessions; tokens cannot be revoked before expiry
//! - Passwords are stored as salted PBKDF2 hashes

pub mod claims;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod password;
pub mod token;

pub use claims::{Claims, Identity};
pub use error::AuthError;
pub use extractor::Auth;
pub use middleware::require_auth;
pub use token::TokenCodec;
