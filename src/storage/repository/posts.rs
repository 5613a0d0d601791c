// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Post repository.
//!
//! Each post is stored as `posts/{post_id}.json`, likes embedded.

use crate::models::Post;

use super::super::{DocumentStore, StorageError, StorageResult};

/// Repository for feed posts.
pub struct PostRepository<'a> {
    storage: &'a DocumentStore,
}

impl<'a> PostRepository<'a> {
    pub fn new(storage: &'a DocumentStore) -> Self {
        Self { storage }
    }

    pub fn exists(&self, post_id: &str) -> bool {
        self.storage.exists(self.storage.paths().post(post_id))
    }

    /// Get a post by ID.
    pub fn get(&self, post_id: &str) -> StorageResult<Post> {
        let path = self.storage.paths().post(post_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound("Post".to_string()));
        }
        self.storage.read_json(path)
    }

    /// All posts, newest first.
    pub fn list_all(&self) -> StorageResult<Vec<Post>> {
        let mut posts: Vec<Post> = self.storage.read_all(self.storage.paths().posts_dir())?;
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(posts)
    }

    /// Insert a new post.
    pub fn create(&self, post: &Post) -> StorageResult<()> {
        if self.exists(&post.id) {
            return Err(StorageError::AlreadyExists("Post".to_string()));
        }
        self.storage.write_json(self.storage.paths().post(&post.id), post)
    }

    /// Overwrite an existing post.
    pub fn update(&self, post: &Post) -> StorageResult<()> {
        if !self.exists(&post.id) {
            return Err(StorageError::NotFound("Post".to_string()));
        }
        self.storage.write_json(self.storage.paths().post(&post.id), post)
    }

    /// Delete a post.
    pub fn delete(&self, post_id: &str) -> StorageResult<()> {
        if !self.exists(post_id) {
            return Err(StorageError::NotFound("Post".to_string()));
        }
        self.storage.delete(self.storage.paths().post(post_id))
    }

    /// Delete every post authored by `user_id`. Returns how many were removed.
    pub fn delete_by_user(&self, user_id: &str) -> StorageResult<usize> {
        let mut removed = 0;
        for post in self.list_all()? {
            if post.user == user_id {
                self.delete(&post.id)?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}
