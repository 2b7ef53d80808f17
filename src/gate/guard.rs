use std::time::Duration;

use tokio::sync::watch;

use crate::{
    gate::edge::{DASHBOARD_PATH, LANDING_PATH},
    models::Role,
    session::SessionState,
};

/// Delay between deciding to redirect and actually navigating. Session state can
/// flicker briefly while it hydrates; navigating immediately would cause redirect
/// loops, so the guard waits this long and cancels if the state settles first.
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(300);

/// Navigator
///
/// The seam between the guard and the surrounding navigation machinery. The guard
/// fires it at most once per pass and does not await or observe the outcome.
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: &str);
}

/// GuardState
///
/// The guard's three states for a render pass:
///
/// - `Checking`: session state has not resolved yet; nothing renders and no
///   navigation is scheduled.
/// - `Redirecting`: the session disallows this page; navigation to `target` will
///   fire once the redirect delay elapses.
/// - `Allowed`: children render. Terminal for the pass, but a later session
///   change re-enters the evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    Checking,
    Redirecting { target: String },
    Allowed,
}

/// RoleGuard
///
/// The Client Role Guard: wraps a page with a role allow-list. A signed-out
/// session is sent to the public landing page regardless of the allow-list; a
/// signed-in session with a role outside the list is sent to the fallback
/// (default: the dashboard). No error is raised for disallowed access and no
/// denial code is returned; navigation is the only externally visible effect.
pub struct RoleGuard {
    allow: Vec<Role>,
    fallback: String,
    delay: Duration,
}

impl RoleGuard {
    pub fn new(allow: impl Into<Vec<Role>>) -> Self {
        Self {
            allow: allow.into(),
            fallback: DASHBOARD_PATH.to_string(),
            delay: DEFAULT_REDIRECT_DELAY,
        }
    }

    pub fn with_fallback(mut self, path: impl Into<String>) -> Self {
        self.fallback = path.into();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// evaluate
    ///
    /// The synchronous core of the state machine: one session state in, one guard
    /// state out. Page handlers call this against a store snapshot.
    pub fn evaluate(&self, session: &SessionState) -> GuardState {
        match session {
            SessionState::Unknown => GuardState::Checking,
            SessionState::SignedOut => GuardState::Redirecting {
                target: LANDING_PATH.to_string(),
            },
            SessionState::SignedIn { role, .. } => {
                if self.allow.contains(role) {
                    GuardState::Allowed
                } else {
                    GuardState::Redirecting {
                        target: self.fallback.clone(),
                    }
                }
            }
        }
    }

    /// drive
    ///
    /// The reactive form of the guard: watches session state and re-runs the
    /// evaluation on every change. When the evaluation lands on Redirecting, the
    /// pending navigation only fires after the redirect delay; a state change
    /// before the timer elapses cancels it and restarts the evaluation from the
    /// new state. Returns after navigating, or when the session channel closes
    /// (the unmount case), whichever comes first.
    pub async fn drive<N>(&self, mut session: watch::Receiver<SessionState>, nav: &N)
    where
        N: Navigator + ?Sized,
    {
        loop {
            let state = session.borrow().clone();
            match self.evaluate(&state) {
                GuardState::Checking | GuardState::Allowed => {
                    if session.changed().await.is_err() {
                        return;
                    }
                }
                GuardState::Redirecting { target } => {
                    tokio::select! {
                        _ = tokio::time::sleep(self.delay) => {
                            nav.navigate(&target);
                            return;
                        }
                        changed = session.changed() => {
                            if changed.is_err() {
                                return;
                            }
                        }
                    }
                }
            }
        }
    }
}
