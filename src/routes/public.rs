use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Defines endpoints that are accessible to any client, anonymous or signed in.
/// The landing page is the one path the edge filter exempts unconditionally; the
/// session endpoints are the portal's single write path for session state.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // A simple, unauthenticated endpoint used for monitoring and load balancer checks.
        .route("/health", get(|| async { "ok" }))
        // GET /
        // The landing page. Always visible regardless of cookie state.
        .route("/", get(handlers::landing_page))
        // GET /login
        // The login page shell; where the edge filter sends unauthenticated
        // requests for the restricted area.
        .route("/login", get(handlers::login_page))
        // POST /api/login
        // Establishes the session: writes the session store and stamps the
        // userRole/userName cookie pair.
        .route("/api/login", post(handlers::login))
        // POST /api/logout
        // Clears the session store and expires both cookies.
        .route("/api/logout", post(handlers::logout))
        // GET /api/session
        // The session store's current state as the frontend widgets consume it.
        .route("/api/session", get(handlers::session))
}
