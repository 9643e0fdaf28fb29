use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Gift-exchange event persisted by the storage layer.
///
/// Rosters and events are provisioned by the organizer tooling; this
/// backend only ever flips `is_drawn` (false → true).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventEntity {
    /// Primary key of the event.
    pub id: i64,
    /// Display name shown on the landing page.
    pub name: String,
    /// Scheduled draw time, if the organizer announced one.
    pub draw_at: Option<SystemTime>,
    /// Whether the assignment draw has been executed.
    pub is_drawn: bool,
}

/// Participant registered for an event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParticipantEntity {
    /// Primary key of the participant.
    pub id: i64,
    /// Event this participant belongs to.
    pub event_id: i64,
    /// Display name.
    pub name: String,
    /// Email the session identity is matched against.
    pub email: String,
    /// Optional avatar shown in the reveal carousel.
    pub photo_url: Option<String>,
    /// Whether this participant has completed their one-time reveal.
    pub has_revealed: bool,
}

/// One giver → receiver assignment, unique per `(event_id, giver_id)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssignmentEntity {
    /// Event the assignment belongs to.
    pub event_id: i64,
    /// Participant giving the gift.
    pub giver_id: i64,
    /// Participant receiving the gift.
    pub receiver_id: i64,
}
