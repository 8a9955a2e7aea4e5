//! Repository trait definitions for the domain layer.
//!
//! The invitation data lives behind an external REST API; these traits are
//! the contract the application services program against. The HTTP
//! implementations live in `crate::infrastructure::http`.
//!
//! # Available Repositories
//!
//! - [`GuestRepository`] - Public code lookup, invitation data and RSVP
//! - [`AdminRepository`] - Login and guest management
//!
//! Mock implementations are auto-generated via `mockall` for testing.

pub mod admin_repository;
pub mod guest_repository;

pub use admin_repository::{AdminRepository, Credentials};
pub use guest_repository::GuestRepository;

#[cfg(test)]
pub use admin_repository::MockAdminRepository;
#[cfg(test)]
pub use guest_repository::MockGuestRepository;
