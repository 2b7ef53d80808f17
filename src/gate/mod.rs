//! Access-Control Gate
//!
//! The two cooperating checks that guard the portal's protected areas:
//!
//! - `edge`: the Edge Route Filter, a cookie/path middleware that runs before
//!   any page handler and either continues or redirects.
//! - `guard`: the Client Role Guard, a state machine over in-memory session
//!   state that wraps page composition and redirects after a short,
//!   cancellable delay.
//!
//! The two layers are independent by design: the filter reads the request
//! cookie, the guard reads the session store, and nothing forces them to
//! agree on a given request.

pub mod edge;
pub mod guard;

pub use edge::{RouteDecision, decide, edge_route_filter};
pub use guard::{GuardState, Navigator, RoleGuard};
