//! REST implementation of the public guest operations.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;

use super::client::ApiClient;
use super::dto::{CompleteDataDto, EventDto, GuestDto, RsvpDto};
use super::endpoints::Endpoint;
use crate::domain::entities::{EventDetails, Guest, Invitation};
use crate::domain::repositories::GuestRepository;
use crate::domain::rsvp::RsvpRequest;
use crate::error::AppError;

pub struct HttpGuestRepository {
    client: ApiClient,
}

impl HttpGuestRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GuestRepository for HttpGuestRepository {
    async fn find_by_code(&self, code: &str) -> Result<Guest, AppError> {
        let dto: GuestDto = self.client.get(Endpoint::GuestByCode(code), None).await?;
        Ok(dto.into())
    }

    async fn load_invitation(&self, uuid: &str) -> Result<Invitation, AppError> {
        let mut data: CompleteDataDto = self.client.get(Endpoint::CompleteData(uuid), None).await?;
        let parents = data.parents();

        let guest = data
            .invitados
            .into_iter()
            .find(|guest| guest.uuid == uuid)
            .ok_or_else(|| {
                AppError::not_found(
                    "Guest missing from invitation data",
                    json!({ "uuid": uuid }),
                )
            })?;

        Ok(Invitation {
            event: data.evento.into(),
            parents,
            guest: guest.into(),
        })
    }

    async fn submit_rsvp(&self, uuid: &str, request: RsvpRequest) -> Result<Guest, AppError> {
        let body = RsvpDto::from(request);
        let dto: GuestDto = self
            .client
            .send_json(Method::POST, Endpoint::Rsvp(uuid), None, &body)
            .await?;
        Ok(dto.into())
    }

    async fn event_details(&self) -> Result<EventDetails, AppError> {
        let dto: EventDto = self.client.get(Endpoint::Event, None).await?;
        Ok(dto.into())
    }
}
