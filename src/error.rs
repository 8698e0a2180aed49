//! Client error taxonomy.
//!
//! Every resource call resolves to exactly one [`ApiError`] on failure. Nothing
//! here is retried; the caller decides how to surface the failure.

use reqwest::StatusCode;
use serde_json::{Value, json};
use validator::ValidationErrors;

/// Errors returned by the dashboard API client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network failure (`status` is `None`) or a non-2xx status that has no
    /// more specific variant. `body` is the full response text; only the
    /// display form is shortened.
    #[error(
        "transport error ({}): {}",
        status.map_or_else(|| "no status".to_string(), |s| s.to_string()),
        body_preview(body)
    )]
    Transport { status: Option<u16>, body: String },

    /// The server reported that the requested entity does not exist.
    #[error("resource not found: {path}")]
    NotFound { path: String },

    /// Field validation failed, either locally before sending or on the
    /// server (422).
    #[error("validation failed: {message}")]
    Validation { message: String, details: Value },

    /// The server rejected the session token (401).
    #[error("not authenticated")]
    Unauthorized,

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// The shape of request a response answers.
///
/// Decides which statuses earn a dedicated variant. 401 is always
/// [`ApiError::Unauthorized`]; anything the kind does not claim is
/// [`ApiError::Transport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Collection and panel reads, deletes.
    Plain,
    /// Single-entity read: 404 is [`ApiError::NotFound`].
    Lookup,
    /// Create: 422 is [`ApiError::Validation`].
    Create,
    /// Update of existing entities: 404 and 422 are both classified.
    Update,
}

impl RequestKind {
    fn classifies_not_found(self) -> bool {
        matches!(self, Self::Lookup | Self::Update)
    }

    fn classifies_validation(self) -> bool {
        matches!(self, Self::Create | Self::Update)
    }
}

impl ApiError {
    pub fn transport(status: Option<u16>, body: impl Into<String>) -> Self {
        Self::Transport {
            status,
            body: body.into(),
        }
    }

    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            Self::NotFound { .. } => Some(StatusCode::NOT_FOUND.as_u16()),
            Self::Validation { .. } => None,
            Self::Unauthorized => Some(StatusCode::UNAUTHORIZED.as_u16()),
            Self::Decode(_) => None,
        }
    }

    /// Classifies a non-2xx response answering a `kind` request.
    ///
    /// | Status | Variant |
    /// |---|---|
    /// | 401 | [`ApiError::Unauthorized`] |
    /// | 404 on lookup/update | [`ApiError::NotFound`] |
    /// | 422 on create/update | [`ApiError::Validation`] |
    /// | other | [`ApiError::Transport`] |
    pub fn from_status(kind: RequestKind, status: StatusCode, path: &str, body: &[u8]) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::NOT_FOUND if kind.classifies_not_found() => Self::NotFound {
                path: path.to_string(),
            },
            StatusCode::UNPROCESSABLE_ENTITY if kind.classifies_validation() => {
                let details = serde_json::from_slice::<Value>(body)
                    .unwrap_or_else(|_| json!({ "body": String::from_utf8_lossy(body) }));
                let message = details
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("The given data was invalid.")
                    .to_string();
                Self::Validation { message, details }
            }
            _ => Self::Transport {
                status: Some(status.as_u16()),
                body: String::from_utf8_lossy(body).into_owned(),
            },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return Self::Decode(e.to_string());
        }
        Self::Transport {
            status: e.status().map(|s| s.as_u16()),
            body: e.to_string(),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or(Value::Null);
        Self::Validation {
            message: "Payload failed local validation".to_string(),
            details,
        }
    }
}

/// Result type for client operations.
pub type ApiResult<T> = Result<T, ApiError>;

fn body_preview(text: &str) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 512;

    let preview: String = text.chars().take(PREVIEW_CHAR_LIMIT).collect();
    if text.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
