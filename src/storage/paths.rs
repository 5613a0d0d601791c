// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path constants and utilities for the document store layout.

use std::path::{Path, PathBuf};

/// Default root directory for persisted documents.
pub const DATA_ROOT: &str = "./data";

/// Storage path utilities for the document store.
///
/// Document ids are always UUIDs validated by the caller; they are joined
/// onto the collection directory verbatim.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DATA_ROOT)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all documents.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== User Paths ==========

    /// Directory containing all user accounts.
    pub fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    /// Path to a specific user document.
    pub fn user(&self, user_id: &str) -> PathBuf {
        self.users_dir().join(format!("{user_id}.json"))
    }

    // ========== Profile Paths ==========

    /// Directory containing all profiles.
    pub fn profiles_dir(&self) -> PathBuf {
        self.root.join("profiles")
    }

    /// Path to the profile of a user. Profiles are keyed by owner.
    pub fn profile(&self, user_id: &str) -> PathBuf {
        self.profiles_dir().join(format!("{user_id}.json"))
    }

    // ========== Post Paths ==========

    /// Directory containing all posts.
    pub fn posts_dir(&self) -> PathBuf {
        self.root.join("posts")
    }

    /// Path to a specific post document.
    pub fn post(&self, post_id: &str) -> PathBuf {
        self.posts_dir().join(format!("{post_id}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_use_data_root() {
        let paths = StoragePaths::default();
        assert_eq!(paths.root(), Path::new("./data"));
    }

    #[test]
    fn custom_root_for_testing() {
        let paths = StoragePaths::new("/tmp/test-data");
        assert_eq!(paths.root(), Path::new("/tmp/test-data"));
        assert_eq!(
            paths.user("u-1"),
            PathBuf::from("/tmp/test-data/users/u-1.json")
        );
    }

    #[test]
    fn collection_paths_are_correct() {
        let paths = StoragePaths::new("/srv");
        assert_eq!(paths.users_dir(), PathBuf::from("/srv/users"));
        assert_eq!(paths.profiles_dir(), PathBuf::from("/srv/profiles"));
        assert_eq!(
            paths.profile("u-1"),
            PathBuf::from("/srv/profiles/u-1.json")
        );
        assert_eq!(paths.posts_dir(), PathBuf::from("/srv/posts"));
        assert_eq!(paths.post("p-9"), PathBuf::from("/srv/posts/p-9.json"));
    }
}
