use std::sync::Arc;

use axum::{Router, extract::FromRef, http::HeaderName, middleware};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod session;

// Module for routing segregation by portal area (Public, Portal, Reinsurance).
pub mod routes;
use routes::{portal, public, reinsurance};

// --- Public Re-exports ---

// Makes core state types easily accessible to the main application entry point (main.rs).
pub use config::AppConfig;
pub use repository::{InMemoryRepository, RepositoryState};
pub use session::SessionStore;

/// ApiDoc
///
/// This struct auto-generates the OpenAPI documentation (Swagger JSON) for the
/// application. It aggregates all API paths and data schemas that have been
/// decorated with the `#[utoipa::path]` and `#[derive(utoipa::ToSchema)]` macros.
/// The resulting JSON is served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    // List all public handler functions here for documentation generation.
    paths(
        handlers::login, handlers::logout, handlers::session, handlers::get_me,
        handlers::create_risk, handlers::list_risks, handlers::get_risk,
        handlers::create_treaty, handlers::list_treaties, handlers::get_treaty,
        handlers::get_notifications, handlers::mark_notification_read,
        handlers::list_chat, handlers::post_chat,
        handlers::analytics_summary, handlers::deployments
    ),
    // List all models (schemas) used in the request/response bodies.
    components(
        schemas(
            models::Role, models::LoginRequest, models::SessionView, models::UserProfile,
            models::Risk, models::RiskStatus, models::CreateRiskRequest,
            models::RiskWithSubmitter, models::Treaty, models::TreatyType,
            models::TreatyStatus, models::CreateTreatyRequest, models::Notification,
            models::ChatMessage, models::ChatPostRequest, models::AnalyticsSummary,
            models::DeploymentStatus, models::PagePayload
        )
    ),
    tags(
        (name = "reinsure-portal", description = "Reinsurance Business Portal API")
    )
)]
struct ApiDoc;

/// AppState
///
/// Implements the **Unified State Pattern**. This is the single, thread-safe
/// container holding all essential application services and configuration,
/// shared across all incoming requests.
#[derive(Clone)]
pub struct AppState {
    /// Repository Layer: the opaque CRUD store behind the `Repository` trait.
    pub repo: RepositoryState,
    /// Session Layer: the single authoritative owner of session state.
    pub sessions: Arc<SessionStore>,
    /// Configuration: the loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// These implementations allow handlers to selectively pull components from the
// shared AppState.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for Arc<SessionStore> {
    fn from_ref(app_state: &AppState) -> Arc<SessionStore> {
        app_state.sessions.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the application's entire routing structure, applies global and
/// scoped middleware, and registers the application state.
///
/// The edge route filter is layered over every route: it inspects the role
/// cookie and the request path before any handler runs, continuing or issuing
/// a 307. Paths outside its rule set (the API surface, docs, health) fall
/// through its final continue arm untouched.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Documentation: Serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public Routes: landing, login flow, session endpoints.
        .merge(public::public_routes())
        // Portal Routes: signed-in pages, CRUD, and widgets.
        .merge(portal::portal_routes())
        // Reinsurance Routes: the reinsurer-only sub-area.
        .merge(reinsurance::reinsurance_routes())
        // Edge Route Filter: the first of the two gate layers, applied to every
        // request before routing reaches a handler.
        .layer(middleware::from_fn(gate::edge::edge_route_filter))
        // Apply the Unified State to all routes.
        .with_state(state);

    // 3. Observability and Correlation Layers (Applied outermost/first)
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID Generation: Generates a unique UUID for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Request Tracing: Wraps the entire request/response lifecycle in a
                // tracing span, correlated by the generated request ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID Propagation: Ensures the generated x-request-id header
                // is returned to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer
        .layer(cors)
}

/// trace_span_logger
///
/// Helper function used by `TraceLayer` to customize the tracing span creation.
/// It extracts the `x-request-id` header (if present) and includes it in the
/// structured logging metadata alongside the HTTP method and URI, so every log
/// line for a single request is correlated by a unique ID.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
