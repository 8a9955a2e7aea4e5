//! Core domain entities representing the invitation data model.
//!
//! Entities mirror what the invitation API returns but use English names and
//! strong types; the mapping from the Spanish wire format lives in
//! `crate::infrastructure::http::dto`.
//!
//! # Entity Types
//!
//! - [`Guest`] - An invitation and its RSVP state
//! - [`Invitation`] - Event details plus the guest viewing them
//! - [`GuestStats`] - Dashboard counters
//!
//! Creation and partial-update inputs follow the same split as the entities:
//! [`NewGuest`] and [`GuestPatch`].

pub mod event;
pub mod guest;
pub mod stats;

pub use event::{EventDetails, Invitation, ParentPair, Parents, Venue};
pub use guest::{Capacity, Guest, GuestPatch, GuestStatus, NewGuest};
pub use stats::GuestStats;
