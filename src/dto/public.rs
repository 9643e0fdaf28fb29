use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dao::models::{EventEntity, ParticipantEntity},
    dto::format_system_time,
};

/// Event header exposed to every participant.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventSummary {
    /// Event identifier.
    pub id: i64,
    /// Display name of the event.
    pub name: String,
    /// Scheduled draw moment, RFC 3339, when one was set.
    pub draw_at: Option<String>,
    /// Whether the draw has already been executed.
    pub is_drawn: bool,
}

impl From<&EventEntity> for EventSummary {
    fn from(event: &EventEntity) -> Self {
        Self {
            id: event.id,
            name: event.name.clone(),
            draw_at: event.draw_at.and_then(format_system_time),
            is_drawn: event.is_drawn,
        }
    }
}

/// Roster entry exposed to every participant. Emails stay server-side.
#[derive(Debug, Serialize, ToSchema)]
pub struct ParticipantSummary {
    /// Participant identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Avatar URL, when one was uploaded.
    pub photo_url: Option<String>,
    /// Whether this participant has already seen their receiver.
    pub has_revealed: bool,
}

impl From<&ParticipantEntity> for ParticipantSummary {
    fn from(participant: &ParticipantEntity) -> Self {
        Self {
            id: participant.id,
            name: participant.name.clone(),
            photo_url: participant.photo_url.clone(),
            has_revealed: participant.has_revealed,
        }
    }
}

/// The participant a giver was matched with.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReceiverSummary {
    /// Participant identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Avatar URL, when one was uploaded.
    pub photo_url: Option<String>,
}

impl From<&ParticipantEntity> for ReceiverSummary {
    fn from(participant: &ParticipantEntity) -> Self {
        Self {
            id: participant.id,
            name: participant.name.clone(),
            photo_url: participant.photo_url.clone(),
        }
    }
}

/// Event plus sorted roster, as served by `/api/event`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventOverviewResponse {
    /// The event header.
    pub event: EventSummary,
    /// Roster sorted by participant name.
    pub participants: Vec<ParticipantSummary>,
}

/// The calling participant's own view, as served by `/api/me`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    /// The caller's roster entry.
    pub participant: ParticipantSummary,
    /// The caller's receiver; absent until the draw has been executed.
    pub receiver: Option<ReceiverSummary>,
}
