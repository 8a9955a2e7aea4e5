//! A guest's RSVP answer and the request built from it.

use serde_json::json;
use std::str::FromStr;

use crate::domain::entities::{Capacity, Guest};
use crate::error::AppError;

/// Attend or decline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsvpAnswer {
    Yes,
    No,
}

impl RsvpAnswer {
    /// Wire value expected by the RSVP endpoint.
    pub fn as_wire(&self) -> &'static str {
        match self {
            RsvpAnswer::Yes => "si",
            RsvpAnswer::No => "no",
        }
    }
}

impl FromStr for RsvpAnswer {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "si" | "sí" | "yes" => Ok(RsvpAnswer::Yes),
            "no" => Ok(RsvpAnswer::No),
            "" => Err(AppError::bad_request(
                "An RSVP answer is required",
                json!({ "field": "respuesta" }),
            )),
            other => Err(AppError::bad_request(
                "Unknown RSVP answer",
                json!({ "field": "respuesta", "value": other }),
            )),
        }
    }
}

/// What gets submitted for a guest's answer.
///
/// Attendance is all-or-nothing: a `Yes` confirms the full invited capacity
/// and a `No` carries no counts at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsvpRequest {
    pub answer: RsvpAnswer,
    pub attending: Option<Capacity>,
}

impl RsvpRequest {
    pub fn for_guest(answer: RsvpAnswer, guest: &Guest) -> Self {
        let attending = match answer {
            RsvpAnswer::Yes => Some(guest.capacity),
            RsvpAnswer::No => None,
        };

        Self { answer, attending }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Guest;

    fn guest_with(capacity: Capacity) -> Guest {
        Guest::new(
            7,
            "uuid-7".to_string(),
            "FM2026-007".to_string(),
            "Ana y Luis".to_string(),
            capacity,
        )
    }

    #[test]
    fn test_yes_attaches_invited_capacity() {
        let guest = guest_with(Capacity::new(2, 3));
        let request = RsvpRequest::for_guest(RsvpAnswer::Yes, &guest);

        assert_eq!(request.answer, RsvpAnswer::Yes);
        assert_eq!(request.attending, Some(Capacity::new(2, 3)));
    }

    #[test]
    fn test_no_never_attaches_counts() {
        for capacity in [Capacity::new(0, 0), Capacity::new(1, 0), Capacity::new(4, 2)] {
            let request = RsvpRequest::for_guest(RsvpAnswer::No, &guest_with(capacity));
            assert_eq!(request.attending, None);
        }
    }

    #[test]
    fn test_answer_parsing() {
        assert_eq!("si".parse::<RsvpAnswer>().unwrap(), RsvpAnswer::Yes);
        assert_eq!(" Sí ".parse::<RsvpAnswer>().unwrap(), RsvpAnswer::Yes);
        assert_eq!("yes".parse::<RsvpAnswer>().unwrap(), RsvpAnswer::Yes);
        assert_eq!("NO".parse::<RsvpAnswer>().unwrap(), RsvpAnswer::No);
    }

    #[test]
    fn test_answer_required() {
        let err = "".parse::<RsvpAnswer>().unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        let err = "maybe".parse::<RsvpAnswer>().unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn test_wire_values() {
        assert_eq!(RsvpAnswer::Yes.as_wire(), "si");
        assert_eq!(RsvpAnswer::No.as_wire(), "no");
    }
}
