use std::sync::Arc;

use reinsure_portal::{
    AppState, InMemoryRepository, SessionStore,
    config::{AppConfig, Env},
    create_router,
    repository::RepositoryState,
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// The asynchronous entry point for the application, responsible for initializing
/// all core components: Configuration, Logging, the seeded store, and the HTTP server.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    // Loads .env file settings before configuration can be read.
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // Sets the default log level. It prioritizes the RUST_LOG environment variable,
    // falling back to sensible defaults for local development.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "reinsure_portal=debug,tower_http=info,axum=trace".into());

    // 3. Initialize Logging based on Environment
    // The structured logging format is dynamically selected based on the APP_ENV.
    match config.env {
        Env::Local => {
            // LOCAL: Pretty print output for human readability during local debugging.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // PROD: JSON format output for ingestion by centralized log aggregators.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 4. Store Initialization
    // The portal's data is mock-populated; the seeded in-memory store is the
    // production configuration.
    let repo = Arc::new(InMemoryRepository::seeded()) as RepositoryState;

    // 5. Session State
    // The single authoritative session owner; login/logout are its only writers.
    let sessions = Arc::new(SessionStore::new());

    // 6. Unified State Assembly
    let bind_addr = config.bind_addr.clone();
    let app_state = AppState {
        repo,
        sessions,
        config,
    };

    // 7. Router and Server Startup
    let app = create_router(app_state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .expect("FATAL: failed to bind listener. Check BIND_ADDR.");

    tracing::info!("HTTP server bound successfully.");
    tracing::info!("Listening on {bind_addr}");
    tracing::info!("API Documentation (Swagger UI) available at: /swagger-ui");

    // The long-running Axum server process.
    axum::serve(listener, app).await.unwrap();
}
