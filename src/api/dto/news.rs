//! DTOs for the news feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// News article summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: i64,
    pub title: String,
    pub short_description: Option<String>,
    pub image: Option<String>,
    pub published_at: DateTime<Utc>,
}
