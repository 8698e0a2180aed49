//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`http`] - reqwest transport and the generic resource client
//! - [`session`] - token storage backends (file and in-memory)

pub mod http;
pub mod session;
