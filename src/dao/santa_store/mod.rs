/// Volatile in-memory backend used for development and tests.
pub mod memory;
/// MongoDB-backed persistent store.
pub mod mongodb;

use futures::future::BoxFuture;

use crate::dao::models::{AssignmentEntity, EventEntity, ParticipantEntity};
use crate::dao::storage::StorageResult;

/// Abstraction over the persistence layer for events, participants and assignments.
///
/// Writes are keyed overwrites: repeating any of them with the same input
/// leaves the store in the same final state.
pub trait SantaStore: Send + Sync {
    /// Fetch an event by id.
    fn find_event(&self, id: i64) -> BoxFuture<'static, StorageResult<Option<EventEntity>>>;
    /// Flip the event's `is_drawn` flag to true.
    fn mark_event_drawn(&self, id: i64) -> BoxFuture<'static, StorageResult<()>>;
    /// List every participant registered for the event.
    fn list_participants(
        &self,
        event_id: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<ParticipantEntity>>>;
    /// Resolve a participant by the email their session authenticated as.
    fn find_participant_by_email(
        &self,
        event_id: i64,
        email: String,
    ) -> BoxFuture<'static, StorageResult<Option<ParticipantEntity>>>;
    /// Set the participant's `has_revealed` flag to true.
    fn set_participant_revealed(&self, id: i64) -> BoxFuture<'static, StorageResult<()>>;
    /// Upsert the full assignment set, keyed by `(event_id, giver_id)`.
    fn replace_assignments(
        &self,
        event_id: i64,
        assignments: Vec<AssignmentEntity>,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// Fetch the assignment for a single giver, if the draw has run.
    fn find_assignment(
        &self,
        event_id: i64,
        giver_id: i64,
    ) -> BoxFuture<'static, StorageResult<Option<AssignmentEntity>>>;
    /// List every assignment stored for the event.
    fn list_assignments(
        &self,
        event_id: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<AssignmentEntity>>>;
    /// Verify the backend is reachable.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Re-establish the backend connection after a failed health check.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
