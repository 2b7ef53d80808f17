//! Router Module Index
//!
//! Organizes the application's routing logic by portal area. Access control is
//! applied in two independent layers: the edge route filter wraps all of these
//! routers at once (cookie + path prefix rules), and the guarded page handlers
//! run the client role guard themselves. The split below mirrors the portal's
//! areas rather than duplicating either enforcement layer.

/// Landing page, login flow, and the session endpoints. No protection.
pub mod public;

/// The signed-in portal: dashboard and non-life pages, risk/treaty CRUD, and
/// the notification/chat/analytics widgets.
pub mod portal;

/// The reinsurer-only sub-area under the non-life prefix.
pub mod reinsurance;
