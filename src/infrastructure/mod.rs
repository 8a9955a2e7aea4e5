//! Infrastructure layer for external integrations.
//!
//! This layer implements the repository traits defined by the domain layer
//! against the external invitation API.
//!
//! # Modules
//!
//! - [`http`] - REST client and repository implementations

pub mod http;
