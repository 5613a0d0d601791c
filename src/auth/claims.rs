// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and the identity they carry.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::User;

/// Identity of the caller, recovered from a verified token.
///
/// This is the type handlers receive from the auth guard; it is never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Identity {
    /// User document id
    pub id: String,
    /// Display name at the time the token was issued
    pub name: String,
}

impl Identity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self::new(user.id.clone(), user.name.clone())
    }
}

/// Signed token payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user: Identity,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration (unix seconds)
    pub exp: i64,
}

impl Claims {
    pub fn new(user: Identity, issued_at: i64, ttl_secs: u64) -> Self {
        let ttl = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        Self {
            user,
            iat: issued_at,
            exp: issued_at.saturating_add(ttl),
        }
    }

    /// Expired once `now` reaches `exp`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_expire_after_ttl() {
        let claims = Claims::new(Identity::new("u1", "Ada"), 1_700_000_000, 3600);
        assert_eq!(claims.exp, 1_700_003_600);
        assert!(!claims.is_expired_at(1_700_003_599));
        assert!(claims.is_expired_at(1_700_003_600));
    }

    #[test]
    fn huge_ttl_saturates() {
        let claims = Claims::new(Identity::new("u1", "Ada"), 10, u64::MAX);
        assert_eq!(claims.exp, i64::MAX);
    }

    #[test]
    fn claims_serialize_with_nested_user() {
        let claims = Claims::new(Identity::new("u1", "Ada"), 100, 10);
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["user"]["id"], "u1");
        assert_eq!(json["user"]["name"], "Ada");
        assert_eq!(json["exp"], 110);
    }
}
