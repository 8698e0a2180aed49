//! DTOs for incident reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Incident record as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: i64,
    pub organization_id: i64,
    pub organization_name: String,
    pub description: String,
    pub incident_time: DateTime<Utc>,
    #[serde(default)]
    pub is_shutdown: bool,
    pub additional_note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /incidents`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewIncident {
    #[validate(range(min = 1))]
    pub organization_id: i64,

    #[validate(length(min = 1, max = 2000))]
    pub description: String,

    pub incident_time: DateTime<Utc>,

    pub is_shutdown: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2000))]
    pub additional_note: Option<String>,
}
