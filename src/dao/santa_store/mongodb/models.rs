//! Document shapes stored in MongoDB, kept separate from the shared entities
//! so the `_id` mapping stays a backend concern.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use crate::dao::models::{AssignmentEntity, EventEntity, ParticipantEntity};

#[derive(Debug, Serialize, Deserialize)]
pub struct EventDocument {
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
    pub draw_at: Option<SystemTime>,
    pub is_drawn: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParticipantDocument {
    #[serde(rename = "_id")]
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub has_revealed: bool,
}

/// Assignment rows rely on the unique `(event_id, giver_id)` index rather
/// than a synthetic `_id`, mirroring the upsert key.
#[derive(Debug, Serialize, Deserialize)]
pub struct AssignmentDocument {
    pub event_id: i64,
    pub giver_id: i64,
    pub receiver_id: i64,
}

impl From<EventDocument> for EventEntity {
    fn from(doc: EventDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            draw_at: doc.draw_at,
            is_drawn: doc.is_drawn,
        }
    }
}

impl From<ParticipantDocument> for ParticipantEntity {
    fn from(doc: ParticipantDocument) -> Self {
        Self {
            id: doc.id,
            event_id: doc.event_id,
            name: doc.name,
            email: doc.email,
            photo_url: doc.photo_url,
            has_revealed: doc.has_revealed,
        }
    }
}

impl From<AssignmentEntity> for AssignmentDocument {
    fn from(entity: AssignmentEntity) -> Self {
        Self {
            event_id: entity.event_id,
            giver_id: entity.giver_id,
            receiver_id: entity.receiver_id,
        }
    }
}

impl From<AssignmentDocument> for AssignmentEntity {
    fn from(doc: AssignmentDocument) -> Self {
        Self {
            event_id: doc.event_id,
            giver_id: doc.giver_id,
            receiver_id: doc.receiver_id,
        }
    }
}
