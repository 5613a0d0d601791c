// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership enforcement for mutating operations.
//!
//! Posts may only be deleted by their author. Reads stay public.

use crate::auth::Identity;
use crate::models::Post;

use super::{StorageError, StorageResult};

/// Trait for resources that have an owner.
pub trait OwnedResource {
    /// Get the owner's user ID.
    fn owner_user_id(&self) -> &str;

    /// Short name used in permission errors.
    fn resource_name(&self) -> &'static str;
}

/// Trait for enforcing ownership on storage operations.
pub trait OwnershipEnforcer {
    /// Verify that the caller owns this resource.
    ///
    /// # Errors
    /// Returns `StorageError::PermissionDenied` if the caller doesn't own the resource.
    fn verify_ownership(&self, identity: &Identity) -> StorageResult<()>;
}

impl<T: OwnedResource> OwnershipEnforcer for T {
    fn verify_ownership(&self, identity: &Identity) -> StorageResult<()> {
        if self.owner_user_id() == identity.id {
            Ok(())
        } else {
            Err(StorageError::PermissionDenied {
                user_id: identity.id.clone(),
                resource: self.resource_name().to_string(),
            })
        }
    }
}

impl OwnedResource for Post {
    fn owner_user_id(&self) -> &str {
        &self.user
    }

    fn resource_name(&self) -> &'static str {
        "post"
    }
}
