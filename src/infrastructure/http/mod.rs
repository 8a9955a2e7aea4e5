//! REST client for the external invitation API.
//!
//! - [`ApiClient`] - `reqwest` wrapper: URL building, bearer auth, status mapping
//! - [`Endpoint`] - The API's paths
//! - [`HttpGuestRepository`] / [`HttpAdminRepository`] - Repository implementations
//! - `dto` - Spanish wire payloads and their conversions

pub mod admin_repository;
pub mod client;
pub mod dto;
pub mod endpoints;
pub mod guest_repository;

pub use admin_repository::HttpAdminRepository;
pub use client::ApiClient;
pub use endpoints::Endpoint;
pub use guest_repository::HttpGuestRepository;
