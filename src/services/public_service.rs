//! Service helpers that expose read-only projections of the event and its roster.

use crate::{
    dto::public::{EventOverviewResponse, MeResponse, ParticipantSummary, ReceiverSummary},
    error::ServiceError,
    services::reveal_service,
    state::SharedState,
};

/// Return the event and its roster, sorted by participant name.
pub async fn get_event_overview(state: &SharedState) -> Result<EventOverviewResponse, ServiceError> {
    let event_id = state.config().event_id();
    let store = state.require_store().await?;

    let event = store
        .find_event(event_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("event_not_found".into()))?;

    let mut participants = store.list_participants(event_id).await?;
    participants.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(EventOverviewResponse {
        event: (&event).into(),
        participants: participants.iter().map(ParticipantSummary::from).collect(),
    })
}

/// Return the calling participant's own view: identity, reveal flag and,
/// once the draw has run, the participant they give to.
pub async fn get_me(state: &SharedState, email: &str) -> Result<MeResponse, ServiceError> {
    let event_id = state.config().event_id();
    let viewer = reveal_service::lookup_participant(state, email).await?;
    let store = state.require_store().await?;

    let event = store
        .find_event(event_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("event_not_found".into()))?;

    let receiver = if event.is_drawn {
        match store.find_assignment(event_id, viewer.id).await? {
            Some(assignment) => {
                let roster = store.list_participants(event_id).await?;
                roster
                    .iter()
                    .find(|p| p.id == assignment.receiver_id)
                    .map(ReceiverSummary::from)
            }
            None => None,
        }
    } else {
        None
    };

    Ok(MeResponse {
        participant: ParticipantSummary::from(&viewer),
        receiver,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::{
            models::{AssignmentEntity, EventEntity, ParticipantEntity},
            santa_store::{SantaStore, memory::MemoryStore},
        },
        state::AppState,
    };

    const EVENT_ID: i64 = 1;

    fn participant(id: i64, name: &str, revealed: bool) -> ParticipantEntity {
        ParticipantEntity {
            id,
            event_id: EVENT_ID,
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            photo_url: None,
            has_revealed: revealed,
        }
    }

    fn seeded_store(is_drawn: bool) -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store.seed_event(EventEntity {
            id: EVENT_ID,
            name: "Family exchange".into(),
            draw_at: None,
            is_drawn,
        });
        store.seed_participant(participant(1, "Carla", false));
        store.seed_participant(participant(2, "Ana", false));
        store.seed_participant(participant(3, "Bruno", true));
        store
    }

    async fn state_with(store: Arc<MemoryStore>) -> SharedState {
        let state = AppState::new(AppConfig::for_tests(EVENT_ID, None));
        state.set_store(store).await;
        state
    }

    #[tokio::test]
    async fn overview_sorts_the_roster_by_name() {
        let state = state_with(seeded_store(false)).await;
        let overview = get_event_overview(&state).await.unwrap();
        assert_eq!(overview.event.name, "Family exchange");
        assert!(!overview.event.is_drawn);
        let names: Vec<&str> = overview
            .participants
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["Ana", "Bruno", "Carla"]);
    }

    #[tokio::test]
    async fn me_hides_the_receiver_before_the_draw() {
        let state = state_with(seeded_store(false)).await;
        let me = get_me(&state, "ana@example.com").await.unwrap();
        assert_eq!(me.participant.name, "Ana");
        assert!(!me.participant.has_revealed);
        assert!(me.receiver.is_none());
    }

    #[tokio::test]
    async fn me_carries_the_receiver_once_drawn() {
        let store = seeded_store(true);
        store
            .replace_assignments(
                EVENT_ID,
                vec![
                    AssignmentEntity {
                        event_id: EVENT_ID,
                        giver_id: 2,
                        receiver_id: 3,
                    },
                    AssignmentEntity {
                        event_id: EVENT_ID,
                        giver_id: 3,
                        receiver_id: 1,
                    },
                    AssignmentEntity {
                        event_id: EVENT_ID,
                        giver_id: 1,
                        receiver_id: 2,
                    },
                ],
            )
            .await
            .unwrap();
        let state = state_with(store).await;

        let me = get_me(&state, "ana@example.com").await.unwrap();
        let receiver = me.receiver.expect("receiver resolved after the draw");
        assert_eq!(receiver.name, "Bruno");
    }

    #[tokio::test]
    async fn me_rejects_unknown_emails() {
        let state = state_with(seeded_store(false)).await;
        let err = get_me(&state, "nobody@example.com").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(reason) if reason == "participant_not_found"));
    }
}
