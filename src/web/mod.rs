//! Browser-facing layer: the guest invitation site and the admin panel.
//!
//! Pages are rendered server-side with Askama templates from view models
//! built in [`views`].
//!
//! # Modules
//!
//! - [`handlers`] - Page, SSE and health handlers
//! - [`middleware`] - Admin session, rate limiting and request tracing
//! - [`routes`] - Route tables
//! - [`views`] - View models and user-facing messages

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod views;
