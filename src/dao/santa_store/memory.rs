//! In-memory [`SantaStore`] backend.
//!
//! Used when no `MONGO_URI` is configured (local development) and by the
//! service test suites. Data does not survive a restart.

use dashmap::DashMap;
use futures::future::BoxFuture;

use crate::dao::{
    models::{AssignmentEntity, EventEntity, ParticipantEntity},
    santa_store::SantaStore,
    storage::StorageResult,
};

/// Volatile store keeping every entity in concurrent maps.
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: DashMap<i64, EventEntity>,
    participants: DashMap<i64, ParticipantEntity>,
    assignments: DashMap<(i64, i64), AssignmentEntity>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an event row.
    pub fn seed_event(&self, event: EventEntity) {
        self.events.insert(event.id, event);
    }

    /// Insert or replace a participant row.
    pub fn seed_participant(&self, participant: ParticipantEntity) {
        self.participants.insert(participant.id, participant);
    }

    /// Number of assignment rows currently stored for the event.
    pub fn assignment_count(&self, event_id: i64) -> usize {
        self.assignments
            .iter()
            .filter(|entry| entry.key().0 == event_id)
            .count()
    }
}

impl SantaStore for MemoryStore {
    fn find_event(&self, id: i64) -> BoxFuture<'static, StorageResult<Option<EventEntity>>> {
        let event = self.events.get(&id).map(|entry| entry.clone());
        Box::pin(async move { Ok(event) })
    }

    fn mark_event_drawn(&self, id: i64) -> BoxFuture<'static, StorageResult<()>> {
        if let Some(mut event) = self.events.get_mut(&id) {
            event.is_drawn = true;
        }
        Box::pin(async move { Ok(()) })
    }

    fn list_participants(
        &self,
        event_id: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<ParticipantEntity>>> {
        let mut participants: Vec<ParticipantEntity> = self
            .participants
            .iter()
            .filter(|entry| entry.event_id == event_id)
            .map(|entry| entry.clone())
            .collect();
        participants.sort_by_key(|participant| participant.id);
        Box::pin(async move { Ok(participants) })
    }

    fn find_participant_by_email(
        &self,
        event_id: i64,
        email: String,
    ) -> BoxFuture<'static, StorageResult<Option<ParticipantEntity>>> {
        let participant = self
            .participants
            .iter()
            .find(|entry| entry.event_id == event_id && entry.email == email)
            .map(|entry| entry.clone());
        Box::pin(async move { Ok(participant) })
    }

    fn set_participant_revealed(&self, id: i64) -> BoxFuture<'static, StorageResult<()>> {
        if let Some(mut participant) = self.participants.get_mut(&id) {
            participant.has_revealed = true;
        }
        Box::pin(async move { Ok(()) })
    }

    fn replace_assignments(
        &self,
        event_id: i64,
        assignments: Vec<AssignmentEntity>,
    ) -> BoxFuture<'static, StorageResult<()>> {
        for assignment in assignments {
            debug_assert_eq!(assignment.event_id, event_id);
            self.assignments
                .insert((event_id, assignment.giver_id), assignment);
        }
        Box::pin(async move { Ok(()) })
    }

    fn find_assignment(
        &self,
        event_id: i64,
        giver_id: i64,
    ) -> BoxFuture<'static, StorageResult<Option<AssignmentEntity>>> {
        let assignment = self
            .assignments
            .get(&(event_id, giver_id))
            .map(|entry| *entry);
        Box::pin(async move { Ok(assignment) })
    }

    fn list_assignments(
        &self,
        event_id: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<AssignmentEntity>>> {
        let mut assignments: Vec<AssignmentEntity> = self
            .assignments
            .iter()
            .filter(|entry| entry.key().0 == event_id)
            .map(|entry| *entry)
            .collect();
        assignments.sort_by_key(|assignment| assignment.giver_id);
        Box::pin(async move { Ok(assignments) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async move { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async move { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(id: i64, event_id: i64, email: &str) -> ParticipantEntity {
        ParticipantEntity {
            id,
            event_id,
            name: format!("participant-{id}"),
            email: email.into(),
            photo_url: None,
            has_revealed: false,
        }
    }

    #[tokio::test]
    async fn replace_assignments_overwrites_by_giver_key() {
        let store = MemoryStore::new();
        let first = vec![
            AssignmentEntity {
                event_id: 1,
                giver_id: 10,
                receiver_id: 11,
            },
            AssignmentEntity {
                event_id: 1,
                giver_id: 11,
                receiver_id: 10,
            },
        ];
        store.replace_assignments(1, first).await.unwrap();

        let second = vec![
            AssignmentEntity {
                event_id: 1,
                giver_id: 10,
                receiver_id: 12,
            },
            AssignmentEntity {
                event_id: 1,
                giver_id: 11,
                receiver_id: 10,
            },
            AssignmentEntity {
                event_id: 1,
                giver_id: 12,
                receiver_id: 11,
            },
        ];
        store.replace_assignments(1, second).await.unwrap();

        let stored = store.list_assignments(1).await.unwrap();
        assert_eq!(stored.len(), 3);
        assert_eq!(
            store
                .find_assignment(1, 10)
                .await
                .unwrap()
                .unwrap()
                .receiver_id,
            12
        );
    }

    #[tokio::test]
    async fn participant_lookup_is_scoped_to_the_event() {
        let store = MemoryStore::new();
        store.seed_participant(participant(1, 1, "ana@example.com"));
        store.seed_participant(participant(2, 2, "ana@example.com"));

        let found = store
            .find_participant_by_email(2, "ana@example.com".into())
            .await
            .unwrap()
            .expect("participant exists");
        assert_eq!(found.id, 2);

        assert!(
            store
                .find_participant_by_email(3, "ana@example.com".into())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn set_revealed_is_idempotent() {
        let store = MemoryStore::new();
        store.seed_participant(participant(5, 1, "bea@example.com"));

        store.set_participant_revealed(5).await.unwrap();
        store.set_participant_revealed(5).await.unwrap();

        let roster = store.list_participants(1).await.unwrap();
        assert!(roster[0].has_revealed);
    }
}
