//! Data-transfer objects exchanged over the HTTP API.

use std::time::SystemTime;

use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Draw endpoint payloads.
pub mod draw;
/// Health check payloads.
pub mod health;
/// Public event and roster payloads.
pub mod public;
/// Reveal endpoint payloads.
pub mod reveal;

/// Render a [`SystemTime`] as an RFC 3339 timestamp for API payloads.
pub fn format_system_time(value: SystemTime) -> Option<String> {
    OffsetDateTime::from(value).format(&Rfc3339).ok()
}
