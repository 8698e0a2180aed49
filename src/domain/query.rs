//! Query string parameters.
//!
//! Dates are sent as calendar days (`YYYY-MM-DD`). The backend parses them as
//! date-only values, so no time-of-day or offset is ever attached.

use chrono::NaiveDate;

/// Wire format for date-valued query parameters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats a date as `YYYY-MM-DD` with a four-digit year and zero-padded month
/// and day.
///
/// [`NaiveDate`] has no timezone, so the output never depends on the local
/// zone of the process.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Ordered list of query parameters for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn int(mut self, key: &str, value: i64) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn text(mut self, key: &str, value: impl Into<String>) -> Self {
        self.pairs.push((key.to_string(), value.into()));
        self
    }

    pub fn date(mut self, key: &str, value: NaiveDate) -> Self {
        self.pairs.push((key.to_string(), format_date(value)));
        self
    }

    /// Adds `key` only when `value` is set.
    pub fn opt_date(self, key: &str, value: Option<NaiveDate>) -> Self {
        match value {
            Some(date) => self.date(key, date),
            None => self,
        }
    }

    pub fn opt_text(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(text) => self.text(key, text),
            None => self,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}
