use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters accepted by the draw endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct DrawQuery {
    /// Shared secret that authorizes running the draw.
    pub secret: Option<String>,
}

/// Response returned after a successful draw.
#[derive(Debug, Serialize, ToSchema)]
pub struct DrawResponse {
    /// Always `true` on success.
    pub ok: bool,
    /// Number of assignments written, one per participant.
    pub count: usize,
}

impl DrawResponse {
    /// Build the success payload for a draw that wrote `count` assignments.
    pub fn new(count: usize) -> Self {
        Self { ok: true, count }
    }
}
