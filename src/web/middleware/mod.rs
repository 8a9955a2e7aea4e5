//! Middleware for the served site.
//!
//! - [`admin_auth`] - Admin session cookie
//! - [`rate_limit`] - Per-IP limits on code validation and admin login
//! - [`tracing`] - HTTP request/response logging

pub mod admin_auth;
pub mod rate_limit;
pub mod tracing;
