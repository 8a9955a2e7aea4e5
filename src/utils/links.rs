//! Outbound links shown on the invitation: share link, maps and calendar.

use chrono::{DateTime, Utc};
use url::Url;

use crate::domain::entities::{EventDetails, Venue};

const GOOGLE_MAPS_SEARCH: &str = "https://www.google.com/maps/search/";
const WAZE: &str = "https://waze.com/ul";
const GOOGLE_CALENDAR: &str = "https://www.google.com/calendar/render";

pub const CALENDAR_DETAILS: &str = "¡Nos encantaría que nos acompañes en este día especial!";

/// Link that opens the invitation directly, skipping code entry.
pub fn share_link(public_base_url: &str, uuid: &str) -> String {
    let base = format!("{}/", public_base_url.trim_end_matches('/'));
    match Url::parse(&base) {
        Ok(mut url) => {
            url.query_pairs_mut().append_pair("uuid", uuid);
            url.to_string()
        }
        Err(_) => format!("{base}?uuid={uuid}"),
    }
}

/// Google Maps link for a venue: its configured URL, or a search by address.
pub fn maps_link(venue: &Venue) -> String {
    if let Some(url) = &venue.maps_url {
        return url.clone();
    }

    with_query(
        GOOGLE_MAPS_SEARCH,
        &[("api", "1"), ("query", venue.address.as_deref().unwrap_or_default())],
    )
}

/// Waze link for a venue: its configured URL, or a search by address.
pub fn waze_link(venue: &Venue) -> String {
    if let Some(url) = &venue.waze_url {
        return url.clone();
    }

    with_query(WAZE, &[("q", venue.address.as_deref().unwrap_or_default())])
}

/// Google Calendar "add event" link for the wedding.
///
/// Located at the ceremony place and the reception address.
pub fn calendar_link(event: &EventDetails, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> String {
    let title = format!("Boda de {}", event.couple_names);
    let dates = format!("{}/{}", calendar_time(starts_at), calendar_time(ends_at));

    let location = match event.reception.address.as_deref() {
        Some(address) => format!("{}, {}", event.ceremony.place, address),
        None => event.ceremony.place.clone(),
    };

    with_query(
        GOOGLE_CALENDAR,
        &[
            ("action", "TEMPLATE"),
            ("text", &title),
            ("dates", &dates),
            ("details", CALENDAR_DETAILS),
            ("location", &location),
        ],
    )
}

fn calendar_time(at: DateTime<Utc>) -> String {
    at.format("%Y%m%dT%H%M%SZ").to_string()
}

fn with_query(base: &str, pairs: &[(&str, &str)]) -> String {
    match Url::parse(base) {
        Ok(mut url) => {
            url.query_pairs_mut().extend_pairs(pairs);
            url.to_string()
        }
        Err(_) => base.to_string(),
    }
}
