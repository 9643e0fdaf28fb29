use std::sync::Arc;

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{
    Client, Collection, Database,
    bson::doc,
    options::{ClientOptions, IndexOptions},
};
use tokio::sync::RwLock;

use super::{
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{AssignmentDocument, EventDocument, ParticipantDocument},
};
use crate::dao::{
    models::{AssignmentEntity, EventEntity, ParticipantEntity},
    santa_store::SantaStore,
    storage::StorageResult,
};

const EVENT_COLLECTION_NAME: &str = "events";
const PARTICIPANT_COLLECTION_NAME: &str = "participants";
const MATCH_COLLECTION_NAME: &str = "matches";
const DEFAULT_DATABASE_NAME: &str = "secret_santa";

/// MongoDB-backed [`SantaStore`].
#[derive(Clone)]
pub struct MongoSantaStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
    options: ClientOptions,
    database_name: String,
}

struct MongoState {
    // Held so the connection pool stays alive for the database handle.
    _client: Client,
    database: Database,
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = {
            let guard = self.state.read().await;
            guard.database.clone()
        };

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let (client, database) = establish_connection(&self.options, &self.database_name).await?;
        let mut guard = self.state.write().await;
        guard._client = client;
        guard.database = database;
        Ok(())
    }
}

impl MongoSantaStore {
    /// Parse the URI, establish a connection and ensure indexes are present.
    pub async fn connect_uri(uri: &str, db_name: Option<&str>) -> MongoResult<Self> {
        let options = ClientOptions::parse(uri)
            .await
            .map_err(|source| MongoDaoError::InvalidUri {
                uri: uri.to_owned(),
                source,
            })?;
        let database_name = db_name.unwrap_or(DEFAULT_DATABASE_NAME).to_owned();

        let (client, database) = establish_connection(&options, &database_name).await?;

        let inner = Arc::new(MongoInner {
            state: RwLock::new(MongoState {
                _client: client,
                database,
            }),
            options,
            database_name,
        });

        let store = Self { inner };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let database = self.database().await;

        // One receiver per giver per event: the key the draw upserts against.
        let matches = database.collection::<AssignmentDocument>(MATCH_COLLECTION_NAME);
        let match_index = mongodb::IndexModel::builder()
            .keys(doc! {"event_id": 1, "giver_id": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("match_giver_idx".to_owned()))
                    .unique(Some(true))
                    .build(),
            )
            .build();
        matches
            .create_index(match_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: MATCH_COLLECTION_NAME,
                index: "event_id,giver_id",
                source,
            })?;

        let participants = database.collection::<ParticipantDocument>(PARTICIPANT_COLLECTION_NAME);
        let participant_index = mongodb::IndexModel::builder()
            .keys(doc! {"event_id": 1, "email": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("participant_email_idx".to_owned()))
                    .unique(Some(true))
                    .build(),
            )
            .build();
        participants
            .create_index(participant_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: PARTICIPANT_COLLECTION_NAME,
                index: "event_id,email",
                source,
            })?;

        Ok(())
    }

    async fn database(&self) -> Database {
        let guard = self.inner.state.read().await;
        guard.database.clone()
    }

    async fn event_collection(&self) -> Collection<EventDocument> {
        self.database()
            .await
            .collection::<EventDocument>(EVENT_COLLECTION_NAME)
    }

    async fn participant_collection(&self) -> Collection<ParticipantDocument> {
        self.database()
            .await
            .collection::<ParticipantDocument>(PARTICIPANT_COLLECTION_NAME)
    }

    async fn match_collection(&self) -> Collection<AssignmentDocument> {
        self.database()
            .await
            .collection::<AssignmentDocument>(MATCH_COLLECTION_NAME)
    }

    async fn find_event(&self, id: i64) -> MongoResult<Option<EventEntity>> {
        let collection = self.event_collection().await;
        let document = collection
            .find_one(doc! {"_id": id})
            .await
            .map_err(|source| MongoDaoError::LoadEvent { id, source })?;
        Ok(document.map(Into::into))
    }

    async fn mark_event_drawn(&self, id: i64) -> MongoResult<()> {
        let collection = self.event_collection().await;
        collection
            .update_one(doc! {"_id": id}, doc! {"$set": {"is_drawn": true}})
            .await
            .map_err(|source| MongoDaoError::MarkEventDrawn { id, source })?;
        Ok(())
    }

    async fn list_participants(&self, event_id: i64) -> MongoResult<Vec<ParticipantEntity>> {
        let collection = self.participant_collection().await;
        let documents: Vec<ParticipantDocument> = collection
            .find(doc! {"event_id": event_id})
            .await
            .map_err(|source| MongoDaoError::ListParticipants { event_id, source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListParticipants { event_id, source })?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn find_participant_by_email(
        &self,
        event_id: i64,
        email: &str,
    ) -> MongoResult<Option<ParticipantEntity>> {
        let collection = self.participant_collection().await;
        let document = collection
            .find_one(doc! {"event_id": event_id, "email": email})
            .await
            .map_err(|source| MongoDaoError::LoadParticipant { event_id, source })?;
        Ok(document.map(Into::into))
    }

    async fn set_participant_revealed(&self, id: i64) -> MongoResult<()> {
        let collection = self.participant_collection().await;
        collection
            .update_one(doc! {"_id": id}, doc! {"$set": {"has_revealed": true}})
            .await
            .map_err(|source| MongoDaoError::MarkParticipantRevealed { id, source })?;
        Ok(())
    }

    async fn replace_assignments(
        &self,
        event_id: i64,
        assignments: Vec<AssignmentEntity>,
    ) -> MongoResult<()> {
        let collection = self.match_collection().await;
        for assignment in assignments {
            let document: AssignmentDocument = assignment.into();
            collection
                .replace_one(
                    doc! {"event_id": document.event_id, "giver_id": document.giver_id},
                    &document,
                )
                .upsert(true)
                .await
                .map_err(|source| MongoDaoError::SaveAssignment {
                    event_id,
                    giver_id: document.giver_id,
                    source,
                })?;
        }
        Ok(())
    }

    async fn find_assignment(
        &self,
        event_id: i64,
        giver_id: i64,
    ) -> MongoResult<Option<AssignmentEntity>> {
        let collection = self.match_collection().await;
        let document = collection
            .find_one(doc! {"event_id": event_id, "giver_id": giver_id})
            .await
            .map_err(|source| MongoDaoError::LoadAssignments { event_id, source })?;
        Ok(document.map(Into::into))
    }

    async fn list_assignments(&self, event_id: i64) -> MongoResult<Vec<AssignmentEntity>> {
        let collection = self.match_collection().await;
        let documents: Vec<AssignmentDocument> = collection
            .find(doc! {"event_id": event_id})
            .await
            .map_err(|source| MongoDaoError::LoadAssignments { event_id, source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::LoadAssignments { event_id, source })?;

        Ok(documents.into_iter().map(Into::into).collect())
    }
}

impl SantaStore for MongoSantaStore {
    fn find_event(&self, id: i64) -> BoxFuture<'static, StorageResult<Option<EventEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_event(id).await.map_err(Into::into) })
    }

    fn mark_event_drawn(&self, id: i64) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.mark_event_drawn(id).await.map_err(Into::into) })
    }

    fn list_participants(
        &self,
        event_id: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<ParticipantEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_participants(event_id).await.map_err(Into::into) })
    }

    fn find_participant_by_email(
        &self,
        event_id: i64,
        email: String,
    ) -> BoxFuture<'static, StorageResult<Option<ParticipantEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_participant_by_email(event_id, &email)
                .await
                .map_err(Into::into)
        })
    }

    fn set_participant_revealed(&self, id: i64) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.set_participant_revealed(id).await.map_err(Into::into) })
    }

    fn replace_assignments(
        &self,
        event_id: i64,
        assignments: Vec<AssignmentEntity>,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .replace_assignments(event_id, assignments)
                .await
                .map_err(Into::into)
        })
    }

    fn find_assignment(
        &self,
        event_id: i64,
        giver_id: i64,
    ) -> BoxFuture<'static, StorageResult<Option<AssignmentEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_assignment(event_id, giver_id)
                .await
                .map_err(Into::into)
        })
    }

    fn list_assignments(
        &self,
        event_id: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<AssignmentEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_assignments(event_id).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.reconnect().await.map_err(Into::into) })
    }
}
