//! Secret Santa backend entrypoint wiring the REST surface and the storage layer.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod dao;
mod dto;
mod error;
mod routes;
mod services;
mod state;

use config::AppConfig;
use dao::santa_store::{SantaStore, memory::MemoryStore, mongodb::MongoSantaStore};
use dao::storage::StorageError;
use state::{AppState, SharedState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    if config.draw_secret().is_none() {
        warn!("DRAW_SECRET is not set; the draw endpoint will reject every caller");
    }

    let app_state = AppState::new(config);

    match env::var("MONGO_URI").ok().filter(|uri| !uri.is_empty()) {
        Some(uri) => {
            let db_name = env::var("MONGO_DB").ok();
            tokio::spawn(services::storage_supervisor::run(
                app_state.clone(),
                move || connect_mongo(uri.clone(), db_name.clone()),
            ));
        }
        None => {
            // Dev fallback: assignments and reveal flags will not survive a restart.
            warn!("MONGO_URI is not set; using a volatile in-memory store");
            app_state.set_store(Arc::new(MemoryStore::new())).await;
        }
    }

    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Establish a MongoDB-backed store, boxed behind the storage trait.
async fn connect_mongo(
    uri: String,
    db_name: Option<String>,
) -> Result<Arc<dyn SantaStore>, StorageError> {
    let store = MongoSantaStore::connect_uri(&uri, db_name.as_deref()).await?;
    Ok(Arc::new(store))
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
