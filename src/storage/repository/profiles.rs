// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Profile repository.
//!
//! A user has at most one profile, stored as `profiles/{user_id}.json`, so
//! lookups by owner are a direct read.

use crate::models::Profile;

use super::super::{DocumentStore, StorageResult};

/// Repository for developer profiles.
pub struct ProfileRepository<'a> {
    storage: &'a DocumentStore,
}

impl<'a> ProfileRepository<'a> {
    pub fn new(storage: &'a DocumentStore) -> Self {
        Self { storage }
    }

    /// Profile owned by `user_id`, if any.
    pub fn find_by_user(&self, user_id: &str) -> StorageResult<Option<Profile>> {
        let path = self.storage.paths().profile(user_id);
        if !self.storage.exists(&path) {
            return Ok(None);
        }
        self.storage.read_json(path).map(Some)
    }

    /// All profiles, oldest first.
    pub fn list_all(&self) -> StorageResult<Vec<Profile>> {
        let mut profiles: Vec<Profile> = self.storage.read_all(self.storage.paths().profiles_dir())?;
        profiles.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(profiles)
    }

    /// Insert or replace the profile of `profile.user`.
    pub fn save(&self, profile: &Profile) -> StorageResult<()> {
        self.storage
            .write_json(self.storage.paths().profile(&profile.user), profile)
    }

    /// Delete the profile of `user_id`. Returns whether one existed.
    pub fn delete_by_user(&self, user_id: &str) -> StorageResult<bool> {
        let path = self.storage.paths().profile(user_id);
        if !self.storage.exists(&path) {
            return Ok(false);
        }
        self.storage.delete(path)?;
        Ok(true)
    }
}
