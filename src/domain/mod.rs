//! Domain layer containing the invitation entities and rules.
//!
//! # Architecture
//!
//! - [`entities`] - Guest, event and stats data structures
//! - [`repositories`] - Contracts for the external invitation API
//! - [`rsvp`] - RSVP answers and the request derived from them
//! - [`countdown`] - Time remaining until the wedding
//!
//! The domain layer has no dependencies on the HTTP client or the web layer.

pub mod countdown;
pub mod entities;
pub mod repositories;
pub mod rsvp;
