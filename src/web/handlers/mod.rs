//! HTML and SSE handlers for the invitation site and the admin panel.

mod admin;
mod countdown;
mod error_page;
mod health;
mod invitation;

pub use admin::{
    create_guest_handler, dashboard_handler, delete_guest_handler, edit_page, login_handler,
    login_page, logout_handler, update_guest_handler,
};
pub use countdown::countdown_handler;
pub use error_page::ErrorPageTemplate;
pub use health::health_handler;
pub use invitation::{index_handler, invitation_path, rsvp_handler, validate_code_handler};
