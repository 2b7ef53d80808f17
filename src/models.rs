use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Session & Identity Schemas ---

/// Role
///
/// The closed set of business functions a portal user can hold. Every authorization
/// decision in the gate (edge filter and client guard) is an exhaustive match over
/// this enum; the role tags themselves are what travels in the `userRole` cookie.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default,
)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    #[default]
    Broker,
    Insurer,
    Reinsurer,
}

impl Role {
    /// The cookie/wire representation of the role tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Broker => "broker",
            Role::Insurer => "insurer",
            Role::Reinsurer => "reinsurer",
        }
    }

    /// Parses a role tag as found in the `userRole` cookie. Anything outside the
    /// closed set is treated as no role at all.
    pub fn parse(tag: &str) -> Option<Role> {
        match tag {
            "broker" => Some(Role::Broker),
            "insurer" => Some(Role::Insurer),
            "reinsurer" => Some(Role::Reinsurer),
            _ => None,
        }
    }
}

/// User
///
/// A portal member record held by the repository. Seeded with mock data; the
/// submitter join on risk listings resolves against these records.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    // Display-only affiliation shown on profile widgets.
    pub company: String,
}

/// LoginRequest
///
/// Input payload for POST /api/login. There is no credential check in this portal;
/// the login action exists to stamp the session cookies and seed client state.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginRequest {
    pub name: String,
    pub role: Role,
}

/// SessionView
///
/// Output schema for GET /api/session: the session store's current state as the
/// frontend widgets consume it.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SessionView {
    pub authenticated: bool,
    pub name: Option<String>,
    pub role: Option<Role>,
}

/// UserProfile
///
/// Output schema for GET /api/me. The email and avatar URL are fabricated from the
/// session identity, simulating data that would come from a directory service.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UserProfile {
    pub name: String,
    pub role: Role,
    pub email: String,
    pub avatar_url: Option<String>,
}

// --- Risk Schemas ---

/// RiskStatus
///
/// Lifecycle of a ceded risk. New submissions always start in Draft.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default,
)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum RiskStatus {
    #[default]
    Draft,
    Submitted,
    Bound,
    Declined,
}

/// Risk
///
/// A risk submitted for placement. The premium is carried as the numeric string the
/// form posted; it is validated to parse but stored verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Risk {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub premium: String,
    pub coverage: String,
    pub status: RiskStatus,
    pub submitter_id: Uuid,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// CreateRiskRequest
///
/// Input payload for POST /api/risks. Status is not accepted from the client;
/// every new risk defaults to Draft.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateRiskRequest {
    pub title: String,
    pub description: String,
    /// Premium as a numeric string, exactly as the form field posts it.
    #[schema(example = "125000.50")]
    pub premium: String,
    pub coverage: String,
    pub submitter_id: Uuid,
}

/// RiskWithSubmitter
///
/// Listing view of a risk with the submitter's name and email joined in.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct RiskWithSubmitter {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub premium: String,
    pub coverage: String,
    pub status: RiskStatus,
    pub submitter_id: Uuid,
    pub submitter_name: String,
    pub submitter_email: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

// --- Treaty Schemas ---

/// TreatyType
///
/// The contract forms the treaty desk works with.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TreatyType {
    #[default]
    QuotaShare,
    Surplus,
    ExcessOfLoss,
}

/// TreatyStatus
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default,
)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum TreatyStatus {
    #[default]
    Draft,
    Active,
    Expired,
}

/// Treaty
///
/// A reinsurance treaty record. Share is the reinsurer's participation in percent.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Treaty {
    pub id: Uuid,
    pub name: String,
    pub treaty_type: TreatyType,
    pub cedent: String,
    pub reinsurer_share_pct: f64,
    pub status: TreatyStatus,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// CreateTreatyRequest
///
/// Input payload for POST /api/treaties. New treaties default to Draft.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateTreatyRequest {
    pub name: String,
    pub treaty_type: TreatyType,
    pub cedent: String,
    pub reinsurer_share_pct: f64,
}

// --- Widget Schemas (Notifications & Chat) ---

/// Notification
///
/// A notification line for the bell widget. Recipients are keyed by display name
/// because the session cookies carry no user id.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Notification {
    pub id: Uuid,
    pub recipient: String,
    pub message: String,
    pub is_read: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// ChatMessage
///
/// A line in the portal-wide chat widget.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: String,
    pub body: String,
    #[ts(type = "string")]
    pub sent_at: DateTime<Utc>,
}

/// ChatPostRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ChatPostRequest {
    pub body: String,
}

// --- Static Display Schemas (Fabricated Data) ---

/// AnalyticsSummary
///
/// Output schema for the analytics dashboard cards. The figures are hard-coded
/// display data; no aggregation runs behind this endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct AnalyticsSummary {
    pub total_risks: i64,
    pub total_treaties: i64,
    pub premium_volume: String,
    pub loss_ratio_pct: f64,
    pub open_claims: i64,
}

/// DeploymentStatus
///
/// One row of the mock deployment/status board. Entirely fabricated; the endpoint
/// performs no orchestration.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct DeploymentStatus {
    pub service: String,
    pub status: String,
    pub uptime: String,
    #[ts(type = "string")]
    pub last_deployed: DateTime<Utc>,
}

// --- Page Payloads ---

/// PagePayload
///
/// The JSON shell a page route returns. For guarded areas `content` is only
/// populated once the role guard allows the render pass; a pass still in its
/// checking phase returns the shell with no content.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct PagePayload {
    pub area: String,
    pub content: Option<String>,
}
