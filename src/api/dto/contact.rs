//! DTOs for the organization contact directory.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::Resource;

/// Accepts `+998 90 123-45-67`, `(71) 234 56 78` and similar.
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9()\- ]{7,20}$").unwrap());

/// Contact record as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub full_name: String,
    pub position: String,
    pub organization: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for `POST /contacts`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewContact {
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,

    #[validate(length(min = 1, max = 255))]
    pub position: String,

    pub organization: Option<String>,

    #[validate(regex(path = "*PHONE_REGEX", message = "Invalid phone format"))]
    pub phone: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Request body for `PATCH /contacts/{id}`.
///
/// Absent fields are not serialized and stay unchanged on the server.
///
/// # `organization` and `email` semantics
///
/// - **`None`** → leave existing value unchanged
/// - **`Some(None)`** → clear the value
/// - **`Some(Some(v))`** → set new value
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255))]
    pub position: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub organization: Option<Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = "*PHONE_REGEX", message = "Invalid phone format"))]
    pub phone: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<Option<String>>,
}

/// The `/contacts` collection.
pub struct Contacts;

impl Resource for Contacts {
    const PATH: &'static str = "contacts";

    type Entity = Contact;
    type Payload = NewContact;
    type Patch = UpdateContact;
}
