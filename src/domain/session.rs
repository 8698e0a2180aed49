//! Authentication session.
//!
//! The session is an explicit object handed to the API client at construction.
//! Whether a token is present in its [`TokenStore`] is the only authentication
//! signal the rest of the crate consumes.

use async_trait::async_trait;
use std::sync::Arc;

/// Fixed key under which the authentication token is persisted.
pub const TOKEN_KEY: &str = "auth_token";

/// Errors raised by token storage backends.
#[derive(Debug, thiserror::Error)]
pub enum TokenStoreError {
    #[error("token storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("token storage is corrupted: {0}")]
    Corrupted(String),
}

/// Persistent key/value storage for session credentials.
///
/// # Implementations
///
/// - [`crate::infrastructure::session::MemoryTokenStore`] - process-local storage
/// - [`crate::infrastructure::session::FileTokenStore`] - JSON file on disk
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Reads the value stored under `key`.
    async fn load(&self, key: &str) -> Result<Option<String>, TokenStoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn store(&self, key: &str, value: &str) -> Result<(), TokenStoreError>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn clear(&self, key: &str) -> Result<(), TokenStoreError>;
}

/// Credential holder injected into [`crate::infrastructure::http::ApiClient`].
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Current token, if any.
    ///
    /// A storage failure is logged and treated as "no token" so an unreadable
    /// store degrades to an anonymous session.
    pub async fn token(&self) -> Option<String> {
        match self.store.load(TOKEN_KEY).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session token");
                None
            }
        }
    }

    /// Persists a new token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenStoreError`] if the backing store cannot be written.
    pub async fn login(&self, token: &str) -> Result<(), TokenStoreError> {
        self.store.store(TOKEN_KEY, token).await?;
        tracing::info!("Session token stored");
        Ok(())
    }

    /// Removes the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenStoreError`] if the backing store cannot be written.
    pub async fn logout(&self) -> Result<(), TokenStoreError> {
        self.store.clear(TOKEN_KEY).await?;
        tracing::info!("Session token cleared");
        Ok(())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token().await.is_some()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}
