//! Token storage backends.
//!
//! Provides two [`crate::domain::TokenStore`] implementations:
//! - [`FileTokenStore`] - JSON file on disk
//! - [`MemoryTokenStore`] - process-local storage for tests and one-off runs

mod file_store;
mod memory_store;

pub use file_store::FileTokenStore;
pub use memory_store::MemoryTokenStore;
