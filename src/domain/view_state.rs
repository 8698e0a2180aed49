//! Per-view display state.
//!
//! A view keeps its last good data until a newer success replaces it. A failed
//! call sets an error indication and leaves the data untouched; the next
//! success clears the indication.

use crate::error::{ApiError, ApiResult};

/// Data, error indication and loading flag for one view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    data: Option<T>,
    error: Option<String>,
    loading: bool,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            loading: false,
        }
    }
}

impl<T> ViewState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a request as in flight.
    pub fn begin(&mut self) {
        self.loading = true;
    }

    /// Applies the outcome of a call.
    pub fn apply(&mut self, result: ApiResult<T>) {
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "View update failed, keeping previous data");
                self.error = Some(user_message(&e));
            }
        }
    }

    /// Ends a call that was cancelled before it produced a result.
    pub fn abort(&mut self) {
        self.loading = false;
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Dismisses the error indication without touching the data.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

fn user_message(error: &ApiError) -> String {
    match error {
        ApiError::NotFound { .. } => "The requested record no longer exists.".to_string(),
        ApiError::Validation { message, .. } => message.clone(),
        ApiError::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
        ApiError::Transport { .. } | ApiError::Decode(_) => {
            "Failed to load data. Please try again later.".to_string()
        }
    }
}
