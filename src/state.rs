// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared application state.
//!
//! The token codec is read-only after startup. The document store sits
//! behind an async `RwLock`: handlers that only read take the read lock, and
//! every read-modify-write sequence holds the write lock for its whole
//! duration, so concurrent updates to the same document cannot be lost.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::TokenCodec;
use crate::storage::DocumentStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<DocumentStore>>,
    tokens: Arc<TokenCodec>,
}

impl AppState {
    pub fn new(store: DocumentStore, tokens: TokenCodec) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            tokens: Arc::new(tokens),
        }
    }

    /// Codec used to issue and verify identity tokens.
    pub fn tokens(&self) -> &TokenCodec {
        &self.tokens
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use tempfile::TempDir;

    use super::AppState;
    use crate::auth::TokenCodec;
    use crate::storage::{DocumentStore, StoragePaths};

    pub const TEST_SECRET: &str = "test-signing-secret";

    /// Fresh state over an initialized store in a temp dir.
    ///
    /// Keep the returned `TempDir` alive for the duration of the test.
    pub fn test_state() -> (AppState, TempDir) {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let mut store = DocumentStore::new(StoragePaths::new(temp.path()));
        store.initialize().expect("Failed to initialize storage");
        let tokens = TokenCodec::new(TEST_SECRET, 3600).expect("valid secret");
        (AppState::new(store, tokens), temp)
    }
}
