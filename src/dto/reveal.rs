use serde::Serialize;
use utoipa::ToSchema;

use crate::{config::RevealTiming, dao::models::ParticipantEntity};

/// Acknowledgement returned once a reveal commit has been persisted.
#[derive(Debug, Serialize, ToSchema)]
pub struct RevealResponse {
    /// Always `true` on success.
    pub ok: bool,
}

impl RevealResponse {
    /// Build the success payload.
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// One card of the reveal carousel.
#[derive(Debug, Serialize, ToSchema)]
pub struct TrackCard {
    /// Participant identifier.
    pub id: i64,
    /// Display name shown on the card.
    pub name: String,
    /// Avatar URL, when one was uploaded.
    pub photo_url: Option<String>,
}

impl From<ParticipantEntity> for TrackCard {
    fn from(participant: ParticipantEntity) -> Self {
        Self {
            id: participant.id,
            name: participant.name,
            photo_url: participant.photo_url,
        }
    }
}

/// Carousel track plus the timing the client animates it with.
///
/// `travel_distance_px` and `spin_duration_ms` together fix the deceleration
/// curve so the carousel comes to rest on the receiver card.
#[derive(Debug, Serialize, ToSchema)]
pub struct TrackResponse {
    /// Card sequence to render, receiver pinned near the end of each segment.
    pub cards: Vec<TrackCard>,
    /// Width of a single card in pixels.
    pub card_width_px: u32,
    /// Total distance the carousel travels during the spin, in pixels.
    pub travel_distance_px: u64,
    /// Spin duration in milliseconds.
    pub spin_duration_ms: u64,
    /// Settle delay after the animation before the commit fires, in milliseconds.
    pub settle_grace_ms: u64,
}

impl TrackResponse {
    /// Assemble the payload from the generated track and the configured timing.
    pub fn new(cards: Vec<ParticipantEntity>, timing: &RevealTiming) -> Self {
        Self {
            cards: cards.into_iter().map(TrackCard::from).collect(),
            card_width_px: timing.card_width_px,
            travel_distance_px: timing.travel_distance_px(),
            spin_duration_ms: timing.spin_duration.as_millis() as u64,
            settle_grace_ms: timing.settle_grace.as_millis() as u64,
        }
    }
}
