// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! DevConnect - Developer Social Network API
//!
//! REST backend for developer accounts, profiles and a posts feed. Documents
//! are persisted as JSON files; callers authenticate with signed tokens.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token codec, auth guard and password hashing
//! - `storage` - JSON document store and repositories
//! - `validation` - Declarative request validation

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod state;
pub mod storage;
pub mod validation;
