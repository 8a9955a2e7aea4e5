//! Guest entity: one invitation, possibly covering a whole household.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::rsvp::RsvpAnswer;

/// Number of adults and children covered by an invitation or a confirmation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    pub adults: u32,
    pub children: u32,
}

impl Capacity {
    pub fn new(adults: u32, children: u32) -> Self {
        Self { adults, children }
    }

    pub fn total(&self) -> u32 {
        self.adults + self.children
    }
}

/// RSVP state of a guest.
///
/// A guest starts `Pending` and moves to `Confirmed` or `Declined` exactly
/// once through the public flow. Only an admin override can put it back
/// to `Pending`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuestStatus {
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "confirmado")]
    Confirmed,
    #[serde(rename = "rechazado")]
    Declined,
}

impl GuestStatus {
    /// Wire value used by the invitation API.
    pub fn as_str(&self) -> &'static str {
        match self {
            GuestStatus::Pending => "pendiente",
            GuestStatus::Confirmed => "confirmado",
            GuestStatus::Declined => "rechazado",
        }
    }

    pub fn can_respond(&self) -> bool {
        matches!(self, GuestStatus::Pending)
    }

    /// Applies a guest's own answer.
    ///
    /// Returns `None` when the guest already responded.
    pub fn transition(self, answer: RsvpAnswer) -> Option<GuestStatus> {
        if !self.can_respond() {
            return None;
        }

        Some(match answer {
            RsvpAnswer::Yes => GuestStatus::Confirmed,
            RsvpAnswer::No => GuestStatus::Declined,
        })
    }
}

impl fmt::Display for GuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GuestStatus {
    type Err = String;

    /// Accepts the API's Spanish values as well as their English names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pendiente" | "pending" => Ok(GuestStatus::Pending),
            "confirmado" | "confirmed" => Ok(GuestStatus::Confirmed),
            "rechazado" | "declined" => Ok(GuestStatus::Declined),
            other => Err(format!("unknown guest status '{other}'")),
        }
    }
}

/// A guest as known to the invitation API.
#[derive(Debug, Clone, PartialEq)]
pub struct Guest {
    pub id: i64,
    pub uuid: String,
    pub code: String,
    pub name: String,
    /// Invited capacity.
    pub capacity: Capacity,
    /// Counts confirmed by the guest (zero unless confirmed).
    pub attending: Capacity,
    pub status: GuestStatus,
    pub confirmation_text: Option<String>,
    pub confirmed_at: Option<NaiveDateTime>,
}

impl Guest {
    /// Creates a pending guest with no confirmation data.
    pub fn new(id: i64, uuid: String, code: String, name: String, capacity: Capacity) -> Self {
        Self {
            id,
            uuid,
            code,
            name,
            capacity,
            attending: Capacity::default(),
            status: GuestStatus::Pending,
            confirmation_text: None,
            confirmed_at: None,
        }
    }

    pub fn has_responded(&self) -> bool {
        !self.status.can_respond()
    }
}

/// Input for creating a guest through the admin API.
///
/// `code: None` is never sent: the admin service fills in the next
/// sequential code before the request goes out.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGuest {
    pub name: String,
    pub capacity: Capacity,
    pub code: Option<String>,
}

/// Partial update of a guest. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuestPatch {
    pub name: Option<String>,
    pub adults: Option<u32>,
    pub children: Option<u32>,
    /// Admin override of the RSVP state, including a reset to `Pending`.
    pub status: Option<GuestStatus>,
}

impl GuestPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.adults.is_none() && self.children.is_none() && self.status.is_none()
    }
}
