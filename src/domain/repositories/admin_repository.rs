//! Repository trait for the authenticated admin side of the invitation API.

use crate::domain::entities::{Guest, GuestPatch, GuestStats, NewGuest};
use crate::error::AppError;
use async_trait::async_trait;

/// Operator credentials for the admin login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub secret_code: String,
}

/// Guest management operations.
///
/// Every method except [`AdminRepository::login`] takes the bearer token
/// obtained at login.
///
/// # Errors
///
/// All methods return [`AppError::Unauthorized`] when the API rejects the
/// token (HTTP 401). Callers must treat that as a forced logout.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Exchanges credentials for a bearer token.
    async fn login(&self, credentials: &Credentials) -> Result<String, AppError>;

    async fn list_guests(&self, token: &str) -> Result<Vec<Guest>, AppError>;

    /// # Errors
    ///
    /// Surfaces the API's duplicate-code error as returned.
    async fn create_guest(&self, token: &str, guest: NewGuest) -> Result<Guest, AppError>;

    async fn update_guest(&self, token: &str, id: i64, patch: GuestPatch) -> Result<Guest, AppError>;

    async fn delete_guest(&self, token: &str, id: i64) -> Result<(), AppError>;

    async fn stats(&self, token: &str) -> Result<GuestStats, AppError>;
}
