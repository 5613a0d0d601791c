// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User repository.
//!
//! Each account is stored as `users/{user_id}.json`. Email lookups scan the
//! collection; callers hold the store write lock across the uniqueness check
//! and the insert.

use crate::models::User;

use super::super::{DocumentStore, StorageError, StorageResult};

/// Repository for user accounts.
pub struct UserRepository<'a> {
    storage: &'a DocumentStore,
}

impl<'a> UserRepository<'a> {
    pub fn new(storage: &'a DocumentStore) -> Self {
        Self { storage }
    }

    pub fn exists(&self, user_id: &str) -> bool {
        self.storage.exists(self.storage.paths().user(user_id))
    }

    /// Get a user by ID.
    pub fn get(&self, user_id: &str) -> StorageResult<User> {
        let path = self.storage.paths().user(user_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound("User".to_string()));
        }
        self.storage.read_json(path)
    }

    /// Look a user up by (case-insensitive) email.
    pub fn find_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let email = email.trim().to_lowercase();
        let users: Vec<User> = self.storage.read_all(self.storage.paths().users_dir())?;
        Ok(users.into_iter().find(|user| user.email == email))
    }

    /// Insert a new user.
    pub fn create(&self, user: &User) -> StorageResult<()> {
        if self.exists(&user.id) {
            return Err(StorageError::AlreadyExists("User".to_string()));
        }
        self.storage.write_json(self.storage.paths().user(&user.id), user)
    }

    /// Delete a user. Returns whether a document was removed.
    pub fn delete(&self, user_id: &str) -> StorageResult<bool> {
        if !self.exists(user_id) {
            return Ok(false);
        }
        self.storage.delete(self.storage.paths().user(user_id))?;
        Ok(true)
    }
}
