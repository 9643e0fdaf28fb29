use mongodb::error::Error as MongoError;
use thiserror::Error;

pub type MongoResult<T> = std::result::Result<T, MongoDaoError>;

/// Errors raised by the MongoDB backend, tagged with the failing operation.
#[derive(Debug, Error)]
pub enum MongoDaoError {
    #[error("failed to parse MongoDB connection URI `{uri}`")]
    InvalidUri {
        uri: String,
        #[source]
        source: MongoError,
    },
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        #[source]
        source: MongoError,
    },
    #[error("MongoDB ping failed during initial connection after {attempts} attempt(s)")]
    InitialPing {
        attempts: u32,
        #[source]
        source: MongoError,
    },
    #[error("MongoDB ping health check failed")]
    HealthPing {
        #[source]
        source: MongoError,
    },
    #[error("failed to ensure index `{index}` on collection `{collection}`")]
    EnsureIndex {
        collection: &'static str,
        index: &'static str,
        #[source]
        source: MongoError,
    },
    #[error("failed to load event `{id}`")]
    LoadEvent {
        id: i64,
        #[source]
        source: MongoError,
    },
    #[error("failed to mark event `{id}` as drawn")]
    MarkEventDrawn {
        id: i64,
        #[source]
        source: MongoError,
    },
    #[error("failed to list participants of event `{event_id}`")]
    ListParticipants {
        event_id: i64,
        #[source]
        source: MongoError,
    },
    #[error("failed to load participant of event `{event_id}` by email")]
    LoadParticipant {
        event_id: i64,
        #[source]
        source: MongoError,
    },
    #[error("failed to mark participant `{id}` as revealed")]
    MarkParticipantRevealed {
        id: i64,
        #[source]
        source: MongoError,
    },
    #[error("failed to save assignment for giver `{giver_id}` in event `{event_id}`")]
    SaveAssignment {
        event_id: i64,
        giver_id: i64,
        #[source]
        source: MongoError,
    },
    #[error("failed to load assignments of event `{event_id}`")]
    LoadAssignments {
        event_id: i64,
        #[source]
        source: MongoError,
    },
}
