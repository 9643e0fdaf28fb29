/// OpenAPI documentation generation.
pub mod documentation;
/// Derangement-producing assignment generator.
pub mod draw_engine;
/// Draw orchestration: authorize, generate, persist.
pub mod draw_service;
/// Health check service.
pub mod health_service;
/// Read-only event/roster projections.
pub mod public_service;
/// Reveal animation track and client-side flow driver.
pub mod reveal_flow;
/// One-time reveal commit handling.
pub mod reveal_service;
/// Storage reconnection supervisor.
pub mod storage_supervisor;
