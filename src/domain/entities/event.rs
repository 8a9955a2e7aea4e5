//! Event details shown on the invitation.

use super::guest::Guest;

/// A place on the wedding day (ceremony or reception).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Venue {
    pub place: String,
    pub time: String,
    pub note: Option<String>,
    pub address: Option<String>,
    pub maps_url: Option<String>,
    pub waze_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDetails {
    pub couple_names: String,
    /// Human-readable date, e.g. "17 de enero de 2026".
    pub date: String,
    pub weekday: String,
    pub rsvp_deadline: String,
    pub dress_code: String,
    pub ceremony: Venue,
    pub reception: Venue,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParentPair {
    pub father: String,
    pub mother: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parents {
    pub groom: ParentPair,
    pub bride: ParentPair,
}

/// Everything the invitation page needs for one guest.
#[derive(Debug, Clone, PartialEq)]
pub struct Invitation {
    pub event: EventDetails,
    pub parents: Parents,
    pub guest: Guest,
}
