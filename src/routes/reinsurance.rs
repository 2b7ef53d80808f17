use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Reinsurance Router Module
///
/// The reinsurer-only sub-area under the non-life prefix.
///
/// Access Control:
/// The edge filter redirects this prefix to the dashboard unless the role
/// cookie parses to reinsurer or insurer; the page handler then runs the same
/// allow-list through the client role guard against the session store. The two
/// checks are independent and can disagree when cookie and store diverge.
pub fn reinsurance_routes() -> Router<AppState> {
    Router::new()
        // GET /non-life/reinsurance
        // The treaty desk page shell.
        .route("/non-life/reinsurance", get(handlers::reinsurance_page))
        // GET /api/treaties/{id}
        // Treaty detail view used by the desk.
        .route("/api/treaties/{id}", get(handlers::get_treaty))
}
