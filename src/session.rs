use tokio::sync::watch;

use crate::models::Role;

/// Cookie carrying the role tag. This is the authorization input read by the
/// edge route filter on every request.
pub const ROLE_COOKIE: &str = "userRole";

/// Companion cookie carrying the display name. Same lifetime as the role cookie,
/// never consulted for authorization decisions.
pub const NAME_COOKIE: &str = "userName";

/// SessionState
///
/// The client-held session as the role guard sees it. `Unknown` is the
/// pre-hydration state: the guard must not render protected content or navigate
/// until the state resolves to one of the other two variants.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Unknown,
    SignedOut,
    SignedIn { name: String, role: Role },
}

impl SessionState {
    pub fn role(&self) -> Option<Role> {
        match self {
            SessionState::SignedIn { role, .. } => Some(*role),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            SessionState::SignedIn { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, SessionState::SignedIn { .. })
    }
}

/// SessionStore
///
/// The single authoritative owner of session state. `sign_in` and `sign_out` are
/// the only write paths; everything else observes through derived read-only views:
/// the guard subscribes to a watch channel, the login handler renders cookie
/// headers from the same value it just wrote. The edge filter still reads the
/// request cookie rather than this store, and nothing reconciles the two sources
/// after login (see DESIGN.md).
pub struct SessionStore {
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::Unknown);
        Self { state }
    }

    /// The one write path for establishing a session.
    pub fn sign_in(&self, name: String, role: Role) {
        self.state.send_replace(SessionState::SignedIn { name, role });
    }

    /// The one write path for tearing a session down.
    pub fn sign_out(&self) {
        self.state.send_replace(SessionState::SignedOut);
    }

    /// Point-in-time read used by page handlers.
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Reactive read-only view consumed by the role guard's driver.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders a session cookie header value with the portal's fixed attributes.
pub fn set_cookie(name: &str, value: &str, max_age_secs: i64) -> String {
    format!("{name}={value}; Path=/; Max-Age={max_age_secs}; SameSite=Lax")
}

/// Renders an expiring header value that clears a session cookie.
pub fn clear_cookie(name: &str) -> String {
    format!("{name}=; Path=/; Max-Age=0; SameSite=Lax")
}
