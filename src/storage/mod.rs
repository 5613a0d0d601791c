// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Document Storage Module
//!
//! Persistent storage as one JSON document per record under a data directory.
//!
//! ## Storage Layout
//!
//! ```text
//! {DATA_DIR}/
//!   users/
//!     {user_id}.json      # Account (email, password hash, avatar)
//!   profiles/
//!     {user_id}.json      # At most one profile per user
//!   posts/
//!     {post_id}.json      # Post with its likes embedded
//! ```
//!
//! ## Important Notes
//!
//! - Writes go to a temp file and are renamed into place
//! - The store itself has no locking; `AppState` wraps it in an `RwLock`
//! - Ids reaching this layer must already be validated UUIDs

pub mod document_store;
pub mod ownership;
pub mod paths;
pub mod repository;

pub use document_store::{DocumentStore, StorageError, StorageResult};
pub use ownership::{OwnedResource, OwnershipEnforcer};
pub use paths::StoragePaths;
pub use repository::{PostRepository, ProfileRepository, UserRepository};
