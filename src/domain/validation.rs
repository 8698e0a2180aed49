//! Cross-field date-range validation.
//!
//! The rule inspects a `start`/`end` pair and fails only when both are present
//! and `end` precedes `start`. Presence of either bound is enforced by a
//! separate required-field rule, so a missing bound is always valid here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Error code reported when `end` precedes `start`.
pub const END_BEFORE_START: &str = "end_before_start";

/// Checks that `end` does not precede `start`.
///
/// Works for any ordered value (dates, timestamps, numbers).
///
/// # Errors
///
/// Returns a [`ValidationError`] with code [`END_BEFORE_START`] when both bounds
/// are present and `end < start`.
pub fn check_range<T: PartialOrd>(start: Option<&T>, end: Option<&T>) -> Result<(), ValidationError> {
    let (Some(start), Some(end)) = (start, end) else {
        return Ok(());
    };

    if end < start {
        let mut error = ValidationError::new(END_BEFORE_START);
        error.message = Some(Cow::Borrowed("End date must not precede start date"));
        return Err(error);
    }

    Ok(())
}

/// A date filter pair as entered in a form.
///
/// The range rule is attached at struct level, so a failure is reported for
/// the pair (`__all__`) rather than for `start` or `end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_date_range", skip_on_field_errors = false))]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Both bounds absent.
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Inclusive number of days covered, when both bounds are set and ordered.
    pub fn days(&self) -> Option<i64> {
        let (start, end) = (self.start?, self.end?);
        if end < start {
            return None;
        }
        Some((end - start).num_days() + 1)
    }
}

fn validate_date_range(range: &DateRange) -> Result<(), ValidationError> {
    check_range(range.start.as_ref(), range.end.as_ref())
}
