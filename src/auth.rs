use axum::http::{HeaderMap, StatusCode, header, request::Parts};
use axum::extract::FromRequestParts;

use crate::{
    models::Role,
    session::{NAME_COOKIE, ROLE_COOKIE},
};

/// Extracts a single cookie value from the request's `Cookie` header.
/// Returns the raw value even if it is not a recognized role tag; presence and
/// parseability are deliberately separate questions for the edge filter's rules.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|pair| {
            let mut parts = pair.trim().splitn(2, '=');
            let key = parts.next()?;
            let value = parts.next()?;
            if key == name { Some(value.to_string()) } else { None }
        })
}

/// CurrentUser
///
/// The resolved identity of an authenticated request, read from the session
/// cookies. Handlers that need to know who is asking (profile, notifications,
/// chat posting) take this as an argument; the CRUD endpoints for risks and
/// treaties deliberately do not, staying opaque to the gate.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Display name from the `userName` cookie; display-only, may be absent.
    pub name: Option<String>,
    /// The role tag from the `userRole` cookie.
    pub role: Role,
}

/// CurrentUser Extractor Implementation
///
/// Implements Axum's FromRequestParts trait, making CurrentUser usable as a
/// function argument in any identity-aware handler. The entire check is the
/// cookie scheme the portal actually uses: a parseable `userRole` cookie is an
/// authenticated session, anything else is rejected.
///
/// Rejection: Returns StatusCode::UNAUTHORIZED (401) when the role cookie is
/// missing or carries an unknown tag.
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let role = cookie_value(&parts.headers, ROLE_COOKIE)
            .as_deref()
            .and_then(Role::parse)
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let name = cookie_value(&parts.headers, NAME_COOKIE);

        Ok(CurrentUser { name, role })
    }
}
