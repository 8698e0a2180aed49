//! Multipart form encoding for user create/edit requests.

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;

use crate::api::dto::Avatar;
use crate::error::{ApiError, ApiResult};

/// Converts a flat DTO into multipart text fields.
///
/// `null` fields are skipped, booleans become `1`/`0`, nested values are sent
/// as JSON text.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] if `fields` does not serialize to an
/// object.
pub fn form_from<T: Serialize>(fields: &T) -> ApiResult<Form> {
    let pairs = text_fields(fields)?;
    Ok(pairs
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value)))
}

/// Appends an avatar image as the `avatar` file part.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] if the MIME type cannot be parsed.
pub fn with_avatar(form: Form, avatar: Avatar) -> ApiResult<Form> {
    let part = Part::bytes(avatar.bytes)
        .file_name(avatar.file_name)
        .mime_str(&avatar.mime)
        .map_err(|e| {
            ApiError::validation(
                "Invalid avatar MIME type",
                serde_json::json!({ "reason": e.to_string() }),
            )
        })?;
    Ok(form.part("avatar", part))
}

fn text_fields<T: Serialize>(fields: &T) -> ApiResult<Vec<(String, String)>> {
    let value = serde_json::to_value(fields).map_err(|e| ApiError::Decode(e.to_string()))?;
    let Value::Object(map) = value else {
        return Err(ApiError::validation(
            "Multipart payload must be an object",
            Value::Null,
        ));
    };

    Ok(map
        .into_iter()
        .filter_map(|(name, value)| {
            let text = match value {
                Value::Null => return None,
                Value::String(s) => s,
                Value::Bool(b) => String::from(if b { "1" } else { "0" }),
                Value::Number(n) => n.to_string(),
                other => other.to_string(),
            };
            Some((name, text))
        })
        .collect())
}
