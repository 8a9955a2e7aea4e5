//! REST implementation of the admin operations. Every call but login
//! carries `Authorization: Bearer <token>`.

use async_trait::async_trait;
use reqwest::Method;

use super::client::ApiClient;
use super::dto::{CreateGuestDto, GuestDto, LoginDto, TokenDto, UpdateGuestDto};
use super::endpoints::Endpoint;
use crate::domain::entities::{Guest, GuestPatch, GuestStats, NewGuest};
use crate::domain::repositories::{AdminRepository, Credentials};
use crate::error::AppError;

pub struct HttpAdminRepository {
    client: ApiClient,
}

impl HttpAdminRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AdminRepository for HttpAdminRepository {
    async fn login(&self, credentials: &Credentials) -> Result<String, AppError> {
        let body = LoginDto {
            username: &credentials.username,
            password: &credentials.password,
            secret_code: &credentials.secret_code,
        };

        let token: TokenDto = self
            .client
            .send_json(Method::POST, Endpoint::Login, None, &body)
            .await?;

        tracing::debug!(token_type = %token.token_type, "Admin token issued");
        Ok(token.access_token)
    }

    async fn list_guests(&self, token: &str) -> Result<Vec<Guest>, AppError> {
        let guests: Vec<GuestDto> = self.client.get(Endpoint::AdminGuests, Some(token)).await?;
        Ok(guests.into_iter().map(Guest::from).collect())
    }

    async fn create_guest(&self, token: &str, guest: NewGuest) -> Result<Guest, AppError> {
        let body = CreateGuestDto::from(guest);
        let dto: GuestDto = self
            .client
            .send_json(Method::POST, Endpoint::AdminGuests, Some(token), &body)
            .await?;
        Ok(dto.into())
    }

    async fn update_guest(&self, token: &str, id: i64, patch: GuestPatch) -> Result<Guest, AppError> {
        let body = UpdateGuestDto::from(patch);
        let dto: GuestDto = self
            .client
            .send_json(Method::PUT, Endpoint::AdminGuest(id), Some(token), &body)
            .await?;
        Ok(dto.into())
    }

    async fn delete_guest(&self, token: &str, id: i64) -> Result<(), AppError> {
        self.client.delete(Endpoint::AdminGuest(id), Some(token)).await
    }

    async fn stats(&self, token: &str) -> Result<GuestStats, AppError> {
        self.client.get(Endpoint::AdminStats, Some(token)).await
    }
}
