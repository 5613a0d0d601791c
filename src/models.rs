// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Persisted documents and the request/response records of the REST API.
//! All types derive `Serialize`/`Deserialize` and `ToSchema` for JSON
//! handling and OpenAPI documentation.
//!
//! ## Request records
//!
//! Request bodies are explicit records whose fields are all optional, so a
//! missing field deserializes cleanly and is reported by the [`Validate`]
//! rules instead of a serde error.
//!
//! ## Model Categories
//!
//! - **Users**: accounts and the token returned on register/login
//! - **Profiles**: developer profiles with experience, education and social links
//! - **Posts**: the feed and its likes

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ApiError;
use crate::validation::{
    has_min_length, is_date, is_email, is_optional_date, is_present, parse_date, FieldRule,
    Validate, ValidationError,
};

/// Trim, and drop blank values.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// Common
// =============================================================================

/// `{ "msg": ... }` confirmation body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Token handed to the client on register/login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

// =============================================================================
// User Models
// =============================================================================

/// Stored user account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Lower-cased, unique across users.
    pub email: String,
    pub avatar: String,
    pub password_hash: String,
    pub date: DateTime<Utc>,
}

/// User as returned by the API (no password hash).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar: user.avatar,
            date: user.date,
        }
    }
}

/// Public part of a user embedded in profiles.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

/// Request to register a new account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Validate for RegisterRequest {
    fn rules() -> Vec<FieldRule<Self>> {
        vec![
            FieldRule::new("name", "Name is required", |p: &Self| {
                is_present(p.name.as_deref())
            }),
            FieldRule::new("email", "Please include a valid email", |p: &Self| {
                is_email(p.email.as_deref())
            }),
            FieldRule::new(
                "password",
                "Please enter a password with 6 or more characters",
                |p: &Self| has_min_length(p.password.as_deref(), 6),
            ),
        ]
    }
}

/// Request to log in with email and password.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Validate for LoginRequest {
    fn rules() -> Vec<FieldRule<Self>> {
        vec![
            FieldRule::new("email", "Please include a valid email", |p: &Self| {
                is_email(p.email.as_deref())
            }),
            FieldRule::new("password", "Password is required", |p: &Self| {
                p.password.as_deref().is_some_and(|v| !v.is_empty())
            }),
        ]
    }
}

// =============================================================================
// Profile Models
// =============================================================================

/// A position in a profile's work history.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A school entry in a profile.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Education {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Social network links.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Social {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl Social {
    pub fn is_empty(&self) -> bool {
        self == &Social::default()
    }
}

/// Stored developer profile. At most one per user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    /// Owner user id.
    pub user: String,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    /// Newest first.
    pub experience: Vec<Experience>,
    /// Newest first.
    pub education: Vec<Education>,
    pub social: Social,
    pub date: DateTime<Utc>,
}

impl Profile {
    /// New profile for `user_id` built from a validated request.
    pub fn create(user_id: &str, request: ProfileRequest) -> Self {
        let mut profile = Self {
            id: Uuid::new_v4().to_string(),
            user: user_id.to_string(),
            company: None,
            website: None,
            location: None,
            status: String::new(),
            skills: Vec::new(),
            bio: None,
            githubusername: None,
            experience: Vec::new(),
            education: Vec::new(),
            social: Social::default(),
            date: Utc::now(),
        };
        profile.merge(request);
        profile
    }

    /// Partial update: provided fields overwrite, absent ones are kept.
    ///
    /// Social links are replaced as a unit when any link is provided.
    pub fn merge(&mut self, request: ProfileRequest) {
        let ProfileRequest {
            company,
            website,
            location,
            bio,
            status,
            githubusername,
            skills,
            youtube,
            twitter,
            facebook,
            linkedin,
            instagram,
        } = request;

        if let Some(company) = clean(company) {
            self.company = Some(company);
        }
        if let Some(website) = clean(website) {
            self.website = Some(website);
        }
        if let Some(location) = clean(location) {
            self.location = Some(location);
        }
        if let Some(bio) = clean(bio) {
            self.bio = Some(bio);
        }
        if let Some(status) = clean(status) {
            self.status = status;
        }
        if let Some(githubusername) = clean(githubusername) {
            self.githubusername = Some(githubusername);
        }
        if let Some(skills) = clean(skills) {
            self.skills = split_skills(&skills);
        }

        let social = Social {
            youtube: clean(youtube),
            twitter: clean(twitter),
            facebook: clean(facebook),
            linkedin: clean(linkedin),
            instagram: clean(instagram),
        };
        if !social.is_empty() {
            self.social = social;
        }
    }
}

/// Split a comma-separated skills list, dropping empty entries.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Profile as returned by the API, with the owner populated.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ProfileResponse {
    pub id: String,
    /// Owner; absent if the account no longer exists.
    pub user: Option<UserSummary>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub social: Social,
    pub date: DateTime<Utc>,
}

impl ProfileResponse {
    pub fn new(profile: Profile, owner: Option<&User>) -> Self {
        Self {
            id: profile.id,
            user: owner.map(UserSummary::from),
            company: profile.company,
            website: profile.website,
            location: profile.location,
            status: profile.status,
            skills: profile.skills,
            bio: profile.bio,
            githubusername: profile.githubusername,
            experience: profile.experience,
            education: profile.education,
            social: profile.social,
            date: profile.date,
        }
    }
}

/// Request to create or update the caller's profile.
///
/// `skills` is a comma-separated list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ProfileRequest {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

impl Validate for ProfileRequest {
    fn rules() -> Vec<FieldRule<Self>> {
        vec![
            FieldRule::new("status", "Status is required", |p: &Self| {
                is_present(p.status.as_deref())
            }),
            FieldRule::new("skills", "Skills is required", |p: &Self| {
                p.skills.as_deref().is_some_and(|s| !split_skills(s).is_empty())
            }),
        ]
    }
}

/// Request to add a work-history entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ExperienceRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    /// `YYYY-MM-DD` or RFC 3339
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

impl Validate for ExperienceRequest {
    fn rules() -> Vec<FieldRule<Self>> {
        vec![
            FieldRule::new("title", "Title is required", |p: &Self| {
                is_present(p.title.as_deref())
            }),
            FieldRule::new("company", "Company is required", |p: &Self| {
                is_present(p.company.as_deref())
            }),
            FieldRule::new("from", "From date is required", |p: &Self| {
                is_date(p.from.as_deref())
            }),
            FieldRule::new("to", "To date must be a valid date", |p: &Self| {
                is_optional_date(p.to.as_deref())
            }),
        ]
    }
}

impl TryFrom<ExperienceRequest> for Experience {
    type Error = ApiError;

    fn try_from(request: ExperienceRequest) -> Result<Self, Self::Error> {
        request.validate()?;
        let (Some(title), Some(company), Some(from)) = (
            clean(request.title),
            clean(request.company),
            request.from.as_deref().and_then(parse_date),
        ) else {
            return Err(ApiError::Validation(vec![ValidationError::new(
                "body",
                "Experience is incomplete",
            )]));
        };

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title,
            company,
            location: clean(request.location),
            from,
            to: request.to.as_deref().and_then(parse_date),
            current: request.current.unwrap_or(false),
            description: clean(request.description),
        })
    }
}

/// Request to add an education entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct EducationRequest {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub fieldofstudy: Option<String>,
    /// `YYYY-MM-DD` or RFC 3339
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

impl Validate for EducationRequest {
    fn rules() -> Vec<FieldRule<Self>> {
        vec![
            FieldRule::new("school", "School is required", |p: &Self| {
                is_present(p.school.as_deref())
            }),
            FieldRule::new("degree", "Degree is required", |p: &Self| {
                is_present(p.degree.as_deref())
            }),
            FieldRule::new("fieldofstudy", "Field of study is required", |p: &Self| {
                is_present(p.fieldofstudy.as_deref())
            }),
            FieldRule::new("from", "From date is required", |p: &Self| {
                is_date(p.from.as_deref())
            }),
            FieldRule::new("to", "To date must be a valid date", |p: &Self| {
                is_optional_date(p.to.as_deref())
            }),
        ]
    }
}

impl TryFrom<EducationRequest> for Education {
    type Error = ApiError;

    fn try_from(request: EducationRequest) -> Result<Self, Self::Error> {
        request.validate()?;
        let (Some(school), Some(degree), Some(fieldofstudy), Some(from)) = (
            clean(request.school),
            clean(request.degree),
            clean(request.fieldofstudy),
            request.from.as_deref().and_then(parse_date),
        ) else {
            return Err(ApiError::Validation(vec![ValidationError::new(
                "body",
                "Education is incomplete",
            )]));
        };

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            school,
            degree,
            fieldofstudy,
            from,
            to: request.to.as_deref().and_then(parse_date),
            current: request.current.unwrap_or(false),
            description: clean(request.description),
        })
    }
}

// =============================================================================
// Post Models
// =============================================================================

/// A like on a post.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Like {
    /// User id of the liker.
    pub user: String,
}

/// A post in the feed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    /// Author user id.
    pub user: String,
    pub text: String,
    /// Author name at posting time.
    pub name: String,
    /// Author avatar at posting time.
    pub avatar: String,
    /// Newest first.
    pub likes: Vec<Like>,
    pub date: DateTime<Utc>,
}

impl Post {
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|like| like.user == user_id)
    }
}

/// Request to create a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    pub text: Option<String>,
}

impl Validate for CreatePostRequest {
    fn rules() -> Vec<FieldRule<Self>> {
        vec![FieldRule::new("text", "Text is required", |p: &Self| {
            is_present(p.text.as_deref())
        })]
    }
}
