//! Aggregated RSVP statistics for the admin dashboard.

use serde::{Deserialize, Serialize};

use super::guest::{Guest, GuestStatus};

/// Guest counts by RSVP state plus confirmed headcount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestStats {
    #[serde(default)]
    pub total: u32,
    #[serde(default, rename = "confirmados")]
    pub confirmed: u32,
    #[serde(default, rename = "pendientes")]
    pub pending: u32,
    #[serde(default, rename = "rechazados")]
    pub declined: u32,
    #[serde(default, rename = "total_adultos_confirmados")]
    pub confirmed_adults: u32,
    #[serde(default, rename = "total_ninos_confirmados")]
    pub confirmed_children: u32,
}

impl GuestStats {
    /// Computes the same figures from a guest list.
    ///
    /// The admin CLI prints this as a summary under the guest list.
    pub fn from_guests(guests: &[Guest]) -> Self {
        guests.iter().fold(Self::default(), |mut acc, guest| {
            acc.total += 1;
            match guest.status {
                GuestStatus::Pending => acc.pending += 1,
                GuestStatus::Declined => acc.declined += 1,
                GuestStatus::Confirmed => {
                    acc.confirmed += 1;
                    acc.confirmed_adults += guest.attending.adults;
                    acc.confirmed_children += guest.attending.children;
                }
            }
            acc
        })
    }

    pub fn confirmed_people(&self) -> u32 {
        self.confirmed_adults + self.confirmed_children
    }
}
