// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Request Validation
//!
//! Declarative field rules evaluated against a request payload. Every rule is
//! checked, failures are collected in declaration order, and an empty result
//! means the payload is acceptable.
//!
//! ```rust,ignore
//! impl Validate for CreatePostRequest {
//!     fn rules() -> Vec<FieldRule<Self>> {
//!         vec![FieldRule::new("text", "Text is required", |p: &Self| {
//!             is_present(p.text.as_deref())
//!         })]
//!     }
//! }
//!
//! async fn create_post(ValidatedJson(req): ValidatedJson<CreatePostRequest>) { /* ... */ }
//! ```

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use chrono::{DateTime, NaiveDate};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{ValidateEmail, ValidateLength};

use crate::error::ApiError;

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ValidationError {
    /// Name of the offending field (`body` for an unreadable payload).
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

type Predicate<P> = Box<dyn Fn(&P) -> bool + Send + Sync>;

/// A named constraint on one field of payload `P`.
pub struct FieldRule<P> {
    field: &'static str,
    message: &'static str,
    predicate: Predicate<P>,
}

impl<P> FieldRule<P> {
    /// Build a rule. `predicate` returns `true` when the payload satisfies it.
    pub fn new(
        field: &'static str,
        message: &'static str,
        predicate: impl Fn(&P) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            field,
            message,
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the rule, returning the error it produces on failure.
    pub fn check(&self, payload: &P) -> Option<ValidationError> {
        if (self.predicate)(payload) {
            None
        } else {
            Some(ValidationError::new(self.field, self.message))
        }
    }
}

impl<P> std::fmt::Debug for FieldRule<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRule")
            .field("field", &self.field)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Evaluate every rule against `payload` without short-circuiting.
pub fn validate<P>(payload: &P, rules: &[FieldRule<P>]) -> Vec<ValidationError> {
    rules.iter().filter_map(|rule| rule.check(payload)).collect()
}

/// A request record that declares its own field rules.
pub trait Validate: Sized {
    fn rules() -> Vec<FieldRule<Self>>;

    /// Run [`Self::rules`], mapping any failure to `ApiError::Validation`.
    fn validate(&self) -> Result<(), ApiError> {
        let errors = validate(self, &Self::rules());
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(errors))
        }
    }
}

// =============================================================================
// Predicates
// =============================================================================

/// Present and not blank.
pub fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Present and shaped like `local@domain.tld`.
///
/// The address grammar is checked by `validator`; on top of that the local
/// part must be a dot-atom and the domain must end in an alphabetic top-level
/// label of two or more characters.
pub fn is_email(value: Option<&str>) -> bool {
    let Some(value) = value.map(str::trim) else {
        return false;
    };
    if !value.validate_email() {
        return false;
    }
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    let dot_atom = !local.starts_with('.') && !local.ends_with('.') && !local.contains("..");
    let has_tld = domain
        .rsplit_once('.')
        .is_some_and(|(_, tld)| tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic));
    dot_atom && has_tld
}

/// Present with at least `min` characters.
pub fn has_min_length(value: Option<&str>, min: u64) -> bool {
    value.is_some_and(|v| v.validate_length(Some(min), None, None))
}

/// Present and parseable by [`parse_date`].
pub fn is_date(value: Option<&str>) -> bool {
    value.and_then(parse_date).is_some()
}

/// Absent, blank, or a valid date.
pub fn is_optional_date(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") => true,
        Some(v) => parse_date(v).is_some(),
    }
}

/// Parse `YYYY-MM-DD` or an RFC 3339 timestamp into a calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

// =============================================================================
// Extractor
// =============================================================================

/// JSON body extractor that runs [`Validate`] before the handler sees it.
///
/// A body that cannot be deserialized is rejected as a single `body` error so
/// clients always receive the validation error shape.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            ApiError::Validation(vec![ValidationError::new("body", rejection.body_text())])
        })?;
        payload.validate()?;
        Ok(ValidatedJson(payload))
    }
}
