//! DTOs for dashboard user management.
//!
//! Create and edit requests are sent as multipart forms so an avatar image can
//! travel with the text fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::Resource;

/// Role assigned to a dashboard user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Manager,
    Viewer,
}

/// User record as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub username: String,
    pub email: Option<String>,
    pub role: UserRole,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Text fields for `POST /users`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,

    #[validate(length(min = 3, max = 64))]
    pub username: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub role: UserRole,
}

/// Text fields for `PATCH /users/{id}`. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

/// Image file attached to a user form.
#[derive(Debug, Clone)]
pub struct Avatar {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// The `/users` collection.
pub struct Users;

impl Resource for Users {
    const PATH: &'static str = "users";

    type Entity = User;
    type Payload = NewUser;
    type Patch = UpdateUser;
}
