//! Draw orchestration: authorize the operator, generate the derangement and
//! persist it.
//!
//! The persistence sequence (replace assignments, then flip the event flag)
//! is deliberately not transactional. Concurrent draws are last-write-wins:
//! the keyed upsert means a racing pair of draws can only leave one complete
//! valid assignment set behind, never a mix of partial rows.

use tracing::info;

use crate::{
    dao::models::AssignmentEntity,
    error::ServiceError,
    services::draw_engine,
    state::SharedState,
};

/// Result of a successful draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawOutcome {
    /// Number of assignments written, one per participant.
    pub count: usize,
}

/// Execute the draw for the configured event.
///
/// Safe to re-run: a repeated call overwrites every assignment by its
/// `(event_id, giver_id)` key and re-flips the already-true event flag.
pub async fn run_draw(
    state: &SharedState,
    presented_secret: Option<&str>,
) -> Result<DrawOutcome, ServiceError> {
    authorize(state, presented_secret)?;

    let event_id = state.config().event_id();
    let store = state.require_store().await?;

    let participants = store.list_participants(event_id).await?;
    let giver_ids: Vec<i64> = participants.iter().map(|p| p.id).collect();

    let mapping = draw_engine::draw(&mut rand::rng(), &giver_ids)?;

    let assignments: Vec<AssignmentEntity> = mapping
        .iter()
        .map(|(&giver_id, &receiver_id)| AssignmentEntity {
            event_id,
            giver_id,
            receiver_id,
        })
        .collect();
    let count = assignments.len();

    store.replace_assignments(event_id, assignments).await?;

    // The assignments are durable at this point. A failure here leaves
    // `is_drawn` false with a complete assignment set behind it, which the
    // operator repairs by simply calling the endpoint again.
    store
        .mark_event_drawn(event_id)
        .await
        .map_err(|source| ServiceError::PartialDraw {
            assignments: count,
            source,
        })?;

    info!(event_id, count, "draw executed");
    Ok(DrawOutcome { count })
}

/// Compare the presented secret against the configured one.
///
/// Runs before any storage access so a bad secret never touches the store.
fn authorize(state: &SharedState, presented_secret: Option<&str>) -> Result<(), ServiceError> {
    let configured = state
        .config()
        .draw_secret()
        .ok_or_else(|| ServiceError::Unauthorized("draw secret is not configured".into()))?;

    if presented_secret != Some(configured) {
        return Err(ServiceError::Unauthorized("draw secret mismatch".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{
        collections::BTreeSet,
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
    };

    use futures::future::BoxFuture;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::{
            models::{EventEntity, ParticipantEntity},
            santa_store::{SantaStore, memory::MemoryStore},
            storage::{StorageError, StorageResult},
        },
        state::AppState,
    };

    const EVENT_ID: i64 = 1;

    fn participant(id: i64, name: &str) -> ParticipantEntity {
        ParticipantEntity {
            id,
            event_id: EVENT_ID,
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            photo_url: None,
            has_revealed: false,
        }
    }

    fn seeded_store(names: &[&str]) -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store.seed_event(EventEntity {
            id: EVENT_ID,
            name: "Family exchange".into(),
            draw_at: None,
            is_drawn: false,
        });
        for (index, name) in names.iter().enumerate() {
            store.seed_participant(participant(index as i64 + 1, name));
        }
        store
    }

    async fn state_with(store: Arc<MemoryStore>, secret: Option<&str>) -> SharedState {
        let state = AppState::new(AppConfig::for_tests(EVENT_ID, secret));
        state.set_store(store).await;
        state
    }

    /// Store wrapper that can be told to fail the event-flag write.
    struct FlagFailingStore {
        inner: Arc<MemoryStore>,
        fail_mark: AtomicBool,
    }

    impl FlagFailingStore {
        fn failure() -> StorageError {
            StorageError::unavailable(
                "event flag write refused".into(),
                std::io::Error::other("injected"),
            )
        }
    }

    impl SantaStore for FlagFailingStore {
        fn find_event(
            &self,
            id: i64,
        ) -> BoxFuture<'static, StorageResult<Option<EventEntity>>> {
            self.inner.find_event(id)
        }

        fn mark_event_drawn(&self, id: i64) -> BoxFuture<'static, StorageResult<()>> {
            if self.fail_mark.load(Ordering::SeqCst) {
                return Box::pin(async move { Err(Self::failure()) });
            }
            self.inner.mark_event_drawn(id)
        }

        fn list_participants(
            &self,
            event_id: i64,
        ) -> BoxFuture<'static, StorageResult<Vec<ParticipantEntity>>> {
            self.inner.list_participants(event_id)
        }

        fn find_participant_by_email(
            &self,
            event_id: i64,
            email: String,
        ) -> BoxFuture<'static, StorageResult<Option<ParticipantEntity>>> {
            self.inner.find_participant_by_email(event_id, email)
        }

        fn set_participant_revealed(&self, id: i64) -> BoxFuture<'static, StorageResult<()>> {
            self.inner.set_participant_revealed(id)
        }

        fn replace_assignments(
            &self,
            event_id: i64,
            assignments: Vec<AssignmentEntity>,
        ) -> BoxFuture<'static, StorageResult<()>> {
            self.inner.replace_assignments(event_id, assignments)
        }

        fn find_assignment(
            &self,
            event_id: i64,
            giver_id: i64,
        ) -> BoxFuture<'static, StorageResult<Option<AssignmentEntity>>> {
            self.inner.find_assignment(event_id, giver_id)
        }

        fn list_assignments(
            &self,
            event_id: i64,
        ) -> BoxFuture<'static, StorageResult<Vec<AssignmentEntity>>> {
            self.inner.list_assignments(event_id)
        }

        fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
            self.inner.health_check()
        }

        fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
            self.inner.try_reconnect()
        }
    }

    async fn assert_valid_assignment_table(store: &MemoryStore, expected: usize) {
        let assignments = store.list_assignments(EVENT_ID).await.unwrap();
        assert_eq!(assignments.len(), expected);
        let givers: BTreeSet<i64> = assignments.iter().map(|a| a.giver_id).collect();
        let receivers: BTreeSet<i64> = assignments.iter().map(|a| a.receiver_id).collect();
        assert_eq!(givers.len(), expected, "unique giver per row");
        assert_eq!(givers, receivers, "every giver also receives");
        for assignment in &assignments {
            assert_ne!(assignment.giver_id, assignment.receiver_id);
        }
    }

    #[tokio::test]
    async fn end_to_end_draw_and_redraw() {
        let store = seeded_store(&["Ana", "Bruno", "Carla", "Diego"]);
        let state = state_with(store.clone(), Some("topsecret")).await;

        let outcome = run_draw(&state, Some("topsecret")).await.unwrap();
        assert_eq!(outcome.count, 4);
        assert_valid_assignment_table(&store, 4).await;
        assert!(store.find_event(EVENT_ID).await.unwrap().unwrap().is_drawn);

        // Re-running replaces by key: still exactly 4 rows, still valid.
        let outcome = run_draw(&state, Some("topsecret")).await.unwrap();
        assert_eq!(outcome.count, 4);
        assert_valid_assignment_table(&store, 4).await;
        assert_eq!(store.assignment_count(EVENT_ID), 4);
    }

    #[tokio::test]
    async fn wrong_secret_writes_nothing() {
        let store = seeded_store(&["Ana", "Bruno"]);
        let state = state_with(store.clone(), Some("topsecret")).await;

        let err = run_draw(&state, Some("guess")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
        assert_eq!(store.assignment_count(EVENT_ID), 0);
        assert!(!store.find_event(EVENT_ID).await.unwrap().unwrap().is_drawn);
    }

    #[tokio::test]
    async fn missing_configured_secret_rejects_everyone() {
        let store = seeded_store(&["Ana", "Bruno"]);
        let state = state_with(store, None).await;

        let err = run_draw(&state, Some("anything")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn small_rosters_are_rejected_without_writes() {
        for names in [&[][..], &["Ana"][..]] {
            let store = seeded_store(names);
            let state = state_with(store.clone(), Some("topsecret")).await;

            let err = run_draw(&state, Some("topsecret")).await.unwrap_err();
            assert!(matches!(
                err,
                ServiceError::InsufficientParticipants { found } if found == names.len()
            ));
            assert_eq!(store.assignment_count(EVENT_ID), 0);
            assert!(!store.find_event(EVENT_ID).await.unwrap().unwrap().is_drawn);
        }
    }

    #[tokio::test]
    async fn degraded_mode_fails_before_drawing() {
        let state = AppState::new(AppConfig::for_tests(EVENT_ID, Some("topsecret")));
        let err = run_draw(&state, Some("topsecret")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Degraded));
    }

    #[tokio::test]
    async fn flag_write_failure_is_recoverable_by_retry() {
        let inner = seeded_store(&["Ana", "Bruno", "Carla"]);
        let failing = Arc::new(FlagFailingStore {
            inner: inner.clone(),
            fail_mark: AtomicBool::new(true),
        });
        let state = AppState::new(AppConfig::for_tests(EVENT_ID, Some("topsecret")));
        state.set_store(failing.clone()).await;

        let err = run_draw(&state, Some("topsecret")).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::PartialDraw { assignments: 3, .. }
        ));
        // Assignments landed, the event flag did not.
        assert_valid_assignment_table(&inner, 3).await;
        assert!(!inner.find_event(EVENT_ID).await.unwrap().unwrap().is_drawn);

        // The retry overwrites the table and flips the flag.
        failing.fail_mark.store(false, Ordering::SeqCst);
        run_draw(&state, Some("topsecret")).await.unwrap();
        assert_valid_assignment_table(&inner, 3).await;
        assert!(inner.find_event(EVENT_ID).await.unwrap().unwrap().is_drawn);
    }
}
