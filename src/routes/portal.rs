use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, patch, post},
};

/// Portal Router Module
///
/// The signed-in portal: role-scoped page shells plus the JSON API the widgets
/// and CRUD forms call.
///
/// Access Control Strategy:
/// The page routes here sit under the dashboard and non-life prefixes, so the
/// edge filter screens them for cookie presence before they are reached; the
/// guarded handlers then run the client role guard against the session store.
/// The /api/risks and /api/treaties CRUD routes are deliberately opaque to the
/// gate, and /profile and /settings are enforced by neither layer.
pub fn portal_routes() -> Router<AppState> {
    Router::new()
        // --- Page Shells ---
        // GET /dashboard
        // The default role-scoped dashboard; any authenticated role.
        .route("/dashboard", get(handlers::dashboard_page))
        // GET /non-life
        // The restricted placement workspace; any authenticated role.
        .route("/non-life", get(handlers::non_life_page))
        // GET /profile, GET /settings
        // Layout-wrapped but unguarded by both layers.
        .route("/profile", get(handlers::profile_page))
        .route("/settings", get(handlers::settings_page))
        // --- Risk CRUD ---
        // POST /api/risks
        // Submits a new risk; premium arrives as a numeric string and status
        // always defaults to Draft.
        .route(
            "/api/risks",
            post(handlers::create_risk).get(handlers::list_risks),
        )
        // GET /api/risks/{id}
        .route("/api/risks/{id}", get(handlers::get_risk))
        // --- Treaty CRUD ---
        .route(
            "/api/treaties",
            post(handlers::create_treaty).get(handlers::list_treaties),
        )
        // --- Widgets ---
        // GET /api/notifications
        // The bell widget's lines for the signed-in member.
        .route("/api/notifications", get(handlers::get_notifications))
        // PATCH /api/notifications/{id}/read
        .route(
            "/api/notifications/{id}/read",
            patch(handlers::mark_notification_read),
        )
        // GET+POST /api/chat
        .route(
            "/api/chat",
            get(handlers::list_chat).post(handlers::post_chat),
        )
        // GET /api/me
        .route("/api/me", get(handlers::get_me))
        // --- Static Displays ---
        // Fabricated analytics and deployment-status data.
        .route("/api/analytics/summary", get(handlers::analytics_summary))
        .route("/api/deployments", get(handlers::deployments))
}
