//! Wire representations of the invitation API payloads.
//!
//! The API speaks Spanish field names and has grown a few legacy fields
//! over time; these types absorb that and convert into domain entities.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, serde_as, skip_serializing_none};

use crate::domain::entities::{
    Capacity, EventDetails, Guest, GuestPatch, GuestStatus, NewGuest, ParentPair, Parents, Venue,
};
use crate::domain::rsvp::RsvpRequest;

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct GuestDto {
    pub id: i64,
    pub uuid: String,
    pub codigo: String,
    pub nombres: String,
    /// Legacy single capacity, used when `max_adultos` is missing or zero.
    #[serde(default)]
    pub max_personas: Option<u32>,
    #[serde(default)]
    pub max_adultos: Option<u32>,
    #[serde(default)]
    pub max_ninos: Option<u32>,
    #[serde(default)]
    pub cantidad_adultos: Option<u32>,
    #[serde(default)]
    pub cantidad_ninos: Option<u32>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub estado: GuestStatus,
    #[serde(default)]
    pub confirmacion: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub fecha_confirmacion: Option<NaiveDateTime>,
}

impl GuestDto {
    fn capacity(&self) -> Capacity {
        let adults = match self.max_adultos {
            Some(adults) if adults > 0 => adults,
            _ => self.max_personas.unwrap_or(0),
        };

        Capacity::new(adults, self.max_ninos.unwrap_or(0))
    }
}

impl From<GuestDto> for Guest {
    fn from(dto: GuestDto) -> Self {
        let capacity = dto.capacity();
        let attending = match dto.estado {
            GuestStatus::Confirmed => Capacity::new(
                dto.cantidad_adultos.unwrap_or(0),
                dto.cantidad_ninos.unwrap_or(0),
            ),
            _ => Capacity::default(),
        };

        Guest {
            id: dto.id,
            uuid: dto.uuid,
            code: dto.codigo,
            name: dto.nombres,
            capacity,
            attending,
            status: dto.estado,
            confirmation_text: dto.confirmacion.filter(|text| !text.trim().is_empty()),
            confirmed_at: dto.fecha_confirmacion,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VenueDto {
    pub lugar: String,
    pub hora: String,
    pub nota: Option<String>,
    pub direccion: Option<String>,
    pub google_maps_url: Option<String>,
    pub waze_url: Option<String>,
}

impl From<VenueDto> for Venue {
    fn from(dto: VenueDto) -> Self {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        Venue {
            place: dto.lugar,
            time: dto.hora,
            note: non_empty(dto.nota),
            address: non_empty(dto.direccion),
            maps_url: non_empty(dto.google_maps_url),
            waze_url: non_empty(dto.waze_url),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParentPairDto {
    pub padre: String,
    pub madre: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParentsDto {
    pub novio: ParentPairDto,
    pub novia: ParentPairDto,
}

impl ParentsDto {
    fn is_blank(&self) -> bool {
        [&self.novio.padre, &self.novio.madre, &self.novia.padre, &self.novia.madre]
            .iter()
            .all(|name| name.trim().is_empty())
    }
}

impl From<ParentsDto> for Parents {
    fn from(dto: ParentsDto) -> Self {
        Parents {
            groom: ParentPair {
                father: dto.novio.padre,
                mother: dto.novio.madre,
            },
            bride: ParentPair {
                father: dto.novia.padre,
                mother: dto.novia.madre,
            },
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventDto {
    pub nombres_novios: String,
    pub fecha: String,
    pub dia_semana: String,
    pub fecha_limite_rsvp: String,
    pub dress_code: String,
    pub ceremonia: VenueDto,
    pub recepcion: VenueDto,
    #[serde_as(as = "DefaultOnError")]
    pub padres: Option<ParentsDto>,
}

impl From<EventDto> for EventDetails {
    fn from(dto: EventDto) -> Self {
        EventDetails {
            couple_names: dto.nombres_novios,
            date: dto.fecha,
            weekday: dto.dia_semana,
            rsvp_deadline: dto.fecha_limite_rsvp,
            dress_code: dto.dress_code,
            ceremony: dto.ceremonia.into(),
            reception: dto.recepcion.into(),
        }
    }
}

/// Body of `/api/datos-completos/{uuid}`.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteDataDto {
    #[serde(default)]
    pub evento: EventDto,
    #[serde(default)]
    pub invitados: Vec<GuestDto>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub padres: Option<ParentsDto>,
}

impl CompleteDataDto {
    /// Parents from the top level, falling back to the ones nested in the
    /// event when the top-level entry is missing or blank.
    pub fn parents(&mut self) -> Parents {
        self.padres
            .take()
            .filter(|parents| !parents.is_blank())
            .or_else(|| self.evento.padres.take())
            .unwrap_or_default()
            .into()
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct RsvpDto {
    pub confirmacion: &'static str,
    pub cantidad_adultos: Option<u32>,
    pub cantidad_ninos: Option<u32>,
}

impl From<RsvpRequest> for RsvpDto {
    fn from(request: RsvpRequest) -> Self {
        RsvpDto {
            confirmacion: request.answer.as_wire(),
            cantidad_adultos: request.attending.map(|c| c.adults),
            cantidad_ninos: request.attending.map(|c| c.children),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginDto<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub secret_code: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenDto {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

/// Create payload. `codigo` is always sent, as `null` when absent.
#[derive(Debug, Clone, Serialize)]
pub struct CreateGuestDto {
    pub nombres: String,
    pub max_adultos: u32,
    pub max_ninos: u32,
    pub max_personas: u32,
    pub codigo: Option<String>,
}

impl From<NewGuest> for CreateGuestDto {
    fn from(guest: NewGuest) -> Self {
        CreateGuestDto {
            nombres: guest.name,
            max_adultos: guest.capacity.adults,
            max_ninos: guest.capacity.children,
            max_personas: guest.capacity.total(),
            codigo: guest.code,
        }
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateGuestDto {
    pub nombres: Option<String>,
    pub max_adultos: Option<u32>,
    pub max_ninos: Option<u32>,
    pub max_personas: Option<u32>,
    pub estado: Option<GuestStatus>,
}

impl From<GuestPatch> for UpdateGuestDto {
    fn from(patch: GuestPatch) -> Self {
        let max_personas = match (patch.adults, patch.children) {
            (Some(adults), Some(children)) => Some(adults + children),
            _ => None,
        };

        UpdateGuestDto {
            nombres: patch.name,
            max_adultos: patch.adults,
            max_ninos: patch.children,
            max_personas,
            estado: patch.status,
        }
    }
}
