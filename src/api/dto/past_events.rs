//! DTOs for the past-events feed.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a recorded event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Incident,
    Shutdown,
    Discharge,
    Visit,
}

impl EventType {
    pub const ALL: [Self; 4] = [Self::Incident, Self::Shutdown, Self::Discharge, Self::Visit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Incident => "incident",
            Self::Shutdown => "shutdown",
            Self::Discharge => "discharge",
            Self::Visit => "visit",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown event type '{s}'"))
    }
}

/// One event from the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PastEvent {
    pub id: i64,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub organization_name: String,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
}

/// Events for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventsByDate {
    pub date: NaiveDate,
    pub events: Vec<PastEvent>,
}

/// Events of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventsByType {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub events: Vec<PastEvent>,
}
