//! Utility functions shared by the services, the web layer and the admin CLI.
//!
//! - [`code_generator`] - Guest code normalization and sequential generation
//! - [`links`] - Share, map and calendar link building

pub mod code_generator;
pub mod links;
