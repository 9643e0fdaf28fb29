use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the Secret Santa backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::draw::run_draw,
        crate::routes::reveal::commit_reveal,
        crate::routes::reveal::reveal_track,
        crate::routes::public::get_event_overview,
        crate::routes::public::get_me,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::draw::DrawResponse,
            crate::dto::reveal::RevealResponse,
            crate::dto::reveal::TrackResponse,
            crate::dto::reveal::TrackCard,
            crate::dto::public::EventOverviewResponse,
            crate::dto::public::EventSummary,
            crate::dto::public::ParticipantSummary,
            crate::dto::public::ReceiverSummary,
            crate::dto::public::MeResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "draw", description = "Operator draw execution"),
        (name = "reveal", description = "Participant reveal flow"),
        (name = "public", description = "Event and roster projections"),
    )
)]
pub struct ApiDoc;
