use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::{auth, models::Role, session::ROLE_COOKIE};

// Protected path prefixes. Fixed at build time, not data-driven.
pub const LANDING_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const NON_LIFE_PREFIX: &str = "/non-life";
pub const REINSURANCE_PREFIX: &str = "/non-life/reinsurance";

/// RouteDecision
///
/// The only two outcomes the edge filter can produce. There is no error arm:
/// a disallowed request is silently moved elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Continue,
    Redirect(&'static str),
}

/// decide
///
/// The Edge Route Filter's decision function. Pure and synchronous: given the
/// request path and the raw `userRole` cookie value, produce continue-or-redirect.
///
/// Rules are evaluated in order and the first match governs. They overlap by
/// construction (the reinsurance sub-area sits under the restricted prefix), so
/// the ordering is part of the contract:
///
/// 1. The exact landing path is always visible.
/// 2. Restricted area without any role cookie goes to login.
/// 3. The reinsurer-only sub-area requires a reinsurer or insurer tag; a broker,
///    an absent cookie, or an unparseable tag is sent to the default dashboard.
/// 4. Dashboard area without any role cookie goes back to the landing page.
/// 5. Everything else continues.
///
/// Presence and parseability are distinct: rules 2 and 4 check that the cookie
/// exists at all, rule 3 checks what it parses to.
pub fn decide(path: &str, role_cookie: Option<&str>) -> RouteDecision {
    if path == LANDING_PATH {
        return RouteDecision::Continue;
    }

    if path.starts_with(NON_LIFE_PREFIX) && role_cookie.is_none() {
        return RouteDecision::Redirect(LOGIN_PATH);
    }

    if path.starts_with(REINSURANCE_PREFIX) {
        let role = role_cookie.and_then(Role::parse);
        if !matches!(role, Some(Role::Reinsurer | Role::Insurer)) {
            return RouteDecision::Redirect(DASHBOARD_PATH);
        }
    }

    if path.starts_with(DASHBOARD_PATH) && role_cookie.is_none() {
        return RouteDecision::Redirect(LANDING_PATH);
    }

    RouteDecision::Continue
}

/// edge_route_filter
///
/// Middleware wrapper around `decide`. Intercepts every request before page
/// rendering; stateless per request, never mutates cookies, and its only side
/// effect is the 307 redirect itself.
pub async fn edge_route_filter(request: Request, next: Next) -> Response {
    let role_cookie = auth::cookie_value(request.headers(), ROLE_COOKIE);

    match decide(request.uri().path(), role_cookie.as_deref()) {
        RouteDecision::Continue => next.run(request).await,
        RouteDecision::Redirect(target) => {
            tracing::debug!(path = %request.uri().path(), target, "edge filter redirect");
            Redirect::temporary(target).into_response()
        }
    }
}
