//! One-time reveal commit: flips the participant's `has_revealed` flag.

use futures::future::BoxFuture;
use tracing::info;

use crate::{
    dao::models::ParticipantEntity,
    dto::reveal::TrackResponse,
    error::ServiceError,
    services::reveal_flow::{self, CommitSink},
    state::SharedState,
};

/// Mark the participant identified by `email` as having seen their receiver.
///
/// The flag is monotone: committing again for an already-revealed participant
/// rewrites `true` over `true` and succeeds, so retries and double-submits are
/// harmless.
pub async fn commit_reveal(state: &SharedState, email: &str) -> Result<(), ServiceError> {
    let participant = lookup_participant(state, email).await?;
    let store = state.require_store().await?;
    store.set_participant_revealed(participant.id).await?;
    info!(participant_id = participant.id, "reveal committed");
    Ok(())
}

/// Resolve the calling participant from their email within the configured event.
pub async fn lookup_participant(
    state: &SharedState,
    email: &str,
) -> Result<ParticipantEntity, ServiceError> {
    let store = state.require_store().await?;
    store
        .find_participant_by_email(state.config().event_id(), email.to_owned())
        .await?
        .ok_or_else(|| ServiceError::NotFound("participant_not_found".into()))
}

/// Build the carousel track payload for the calling participant.
///
/// Requires a completed draw; before that the client has nothing to animate
/// and gets a conflict instead.
pub async fn viewer_track(state: &SharedState, email: &str) -> Result<TrackResponse, ServiceError> {
    let event_id = state.config().event_id();
    let store = state.require_store().await?;

    let event = store
        .find_event(event_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("event_not_found".into()))?;
    if !event.is_drawn {
        return Err(ServiceError::DrawPending);
    }

    let viewer = lookup_participant(state, email).await?;
    let assignment = store
        .find_assignment(event_id, viewer.id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("match_not_found".into()))?;

    let roster = store.list_participants(event_id).await?;
    let receiver = roster
        .iter()
        .find(|p| p.id == assignment.receiver_id)
        .cloned()
        .ok_or_else(|| ServiceError::NotFound("receiver_not_found".into()))?;

    let cards = reveal_flow::build_track(&mut rand::rng(), viewer.id, &receiver, &roster);
    Ok(TrackResponse::new(cards, state.config().reveal()))
}

/// [`CommitSink`] that persists the reveal through the application store.
///
/// This is what the reveal flow driver holds in production; tests substitute
/// in-memory sinks to observe commit counts.
#[derive(Clone)]
pub struct StoreCommit {
    state: SharedState,
    email: String,
}

impl StoreCommit {
    /// Bind a commit sink to one participant session.
    pub fn new(state: SharedState, email: String) -> Self {
        Self { state, email }
    }
}

impl CommitSink for StoreCommit {
    fn commit(&self) -> BoxFuture<'static, Result<(), ServiceError>> {
        let state = self.state.clone();
        let email = self.email.clone();
        Box::pin(async move { commit_reveal(&state, &email).await })
    }
}
