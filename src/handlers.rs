use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::{
    AppState,
    auth::CurrentUser,
    error::ApiError,
    gate::{GuardState, RoleGuard},
    models::{
        AnalyticsSummary, ChatMessage, ChatPostRequest, CreateRiskRequest, CreateTreatyRequest,
        DeploymentStatus, LoginRequest, Notification, PagePayload, Risk, RiskWithSubmitter, Role,
        SessionView, Treaty, UserProfile,
    },
    session::{self, NAME_COOKIE, ROLE_COOKIE, SessionState},
};

/// Every authenticated role; the allow-list for areas that only require a session.
const ANY_ROLE: [Role; 3] = [Role::Broker, Role::Insurer, Role::Reinsurer];

// --- Session Handlers ---

/// login
///
/// [Public Route] Establishes a session. This is the single write path for session
/// state: it updates the authoritative store and stamps both cookies (`userRole`
/// for authorization, `userName` for display) with the configured max-age.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses((status = 200, description = "Signed in", body = SessionView))
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    state.sessions.sign_in(payload.name.clone(), payload.role);

    let max_age = state.config.cookie_max_age_secs;
    let headers = AppendHeaders([
        (
            header::SET_COOKIE,
            session::set_cookie(ROLE_COOKIE, payload.role.as_str(), max_age),
        ),
        (
            header::SET_COOKIE,
            session::set_cookie(NAME_COOKIE, &payload.name, max_age),
        ),
    ]);

    tracing::info!(role = payload.role.as_str(), "session established");

    let view = SessionView {
        authenticated: true,
        name: Some(payload.name),
        role: Some(payload.role),
    };
    (headers, Json(view))
}

/// logout
///
/// [Public Route] Tears the session down through the same single write path and
/// expires both cookies.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses((status = 200, description = "Signed out", body = SessionView))
)]
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    state.sessions.sign_out();

    let headers = AppendHeaders([
        (header::SET_COOKIE, session::clear_cookie(ROLE_COOKIE)),
        (header::SET_COOKIE, session::clear_cookie(NAME_COOKIE)),
    ]);

    (headers, Json(SessionView::default()))
}

/// session
///
/// [Public Route] Reports the session store's current state. Note this reads the
/// store, not the request cookies; the two can diverge by design.
#[utoipa::path(
    get,
    path = "/api/session",
    responses((status = 200, description = "Current session", body = SessionView))
)]
pub async fn session(State(state): State<AppState>) -> Json<SessionView> {
    let snapshot = state.sessions.snapshot();
    Json(SessionView {
        authenticated: snapshot.is_signed_in(),
        name: snapshot.name().map(str::to_string),
        role: snapshot.role(),
    })
}

/// get_me
///
/// [Authenticated Route] Profile view resolved from the session cookies.
///
/// *Note*: This handler fabricates the email and avatar URL from the display name,
/// simulating data that would typically come from a directory service.
#[utoipa::path(
    get,
    path = "/api/me",
    responses((status = 200, description = "Profile", body = UserProfile))
)]
pub async fn get_me(user: CurrentUser) -> Json<UserProfile> {
    let name = user.name.unwrap_or_else(|| user.role.as_str().to_string());
    let slug = name.to_lowercase().replace(' ', ".");
    Json(UserProfile {
        email: format!("{slug}@portal.example"),
        avatar_url: Some(format!(
            "https://api.dicebear.com/7.x/avataaars/svg?seed={slug}"
        )),
        name,
        role: user.role,
    })
}

// --- Risk Handlers ---

/// create_risk
///
/// [CRUD Route] Submits a new risk. The premium must be a numeric string; status
/// always defaults to Draft. The submitter id travels in the payload and is only
/// checked for existence, not against the session (the CRUD store is opaque to
/// the access gate).
#[utoipa::path(
    post,
    path = "/api/risks",
    request_body = CreateRiskRequest,
    responses(
        (status = 201, description = "Created", body = Risk),
        (status = 422, description = "Invalid premium or unknown submitter")
    )
)]
pub async fn create_risk(
    State(state): State<AppState>,
    Json(payload): Json<CreateRiskRequest>,
) -> Result<(StatusCode, Json<Risk>), ApiError> {
    if payload.premium.trim().parse::<f64>().is_err() {
        return Err(ApiError::InvalidPremium);
    }

    let risk = state.repo.create_risk(payload).await.map_err(|e| {
        tracing::error!("create_risk error: {e}");
        ApiError::from(e)
    })?;
    Ok((StatusCode::CREATED, Json(risk)))
}

/// list_risks
///
/// [CRUD Route] Lists all risks with the submitter's name and email joined in.
#[utoipa::path(
    get,
    path = "/api/risks",
    responses((status = 200, description = "All risks", body = [RiskWithSubmitter]))
)]
pub async fn list_risks(
    State(state): State<AppState>,
) -> Result<Json<Vec<RiskWithSubmitter>>, ApiError> {
    let risks = state.repo.list_risks().await.map_err(|e| {
        tracing::error!("list_risks error: {e}");
        ApiError::Internal
    })?;
    Ok(Json(risks))
}

/// get_risk
#[utoipa::path(
    get,
    path = "/api/risks/{id}",
    params(("id" = Uuid, Path, description = "Risk ID")),
    responses(
        (status = 200, description = "Found", body = RiskWithSubmitter),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_risk(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RiskWithSubmitter>, ApiError> {
    match state.repo.get_risk(id).await {
        Some(risk) => Ok(Json(risk)),
        None => Err(ApiError::NotFound),
    }
}

// --- Treaty Handlers ---

/// create_treaty
///
/// [CRUD Route] Records a new treaty in Draft status.
#[utoipa::path(
    post,
    path = "/api/treaties",
    request_body = CreateTreatyRequest,
    responses((status = 201, description = "Created", body = Treaty))
)]
pub async fn create_treaty(
    State(state): State<AppState>,
    Json(payload): Json<CreateTreatyRequest>,
) -> Result<(StatusCode, Json<Treaty>), ApiError> {
    let treaty = state.repo.create_treaty(payload).await.map_err(|e| {
        tracing::error!("create_treaty error: {e}");
        ApiError::Internal
    })?;
    Ok((StatusCode::CREATED, Json(treaty)))
}

/// list_treaties
#[utoipa::path(
    get,
    path = "/api/treaties",
    responses((status = 200, description = "All treaties", body = [Treaty]))
)]
pub async fn list_treaties(State(state): State<AppState>) -> Result<Json<Vec<Treaty>>, ApiError> {
    let treaties = state.repo.list_treaties().await.map_err(|e| {
        tracing::error!("list_treaties error: {e}");
        ApiError::Internal
    })?;
    Ok(Json(treaties))
}

/// get_treaty
#[utoipa::path(
    get,
    path = "/api/treaties/{id}",
    params(("id" = Uuid, Path, description = "Treaty ID")),
    responses(
        (status = 200, description = "Found", body = Treaty),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_treaty(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Treaty>, ApiError> {
    match state.repo.get_treaty(id).await {
        Some(treaty) => Ok(Json(treaty)),
        None => Err(ApiError::NotFound),
    }
}

// --- Widget Handlers ---

/// get_notifications
///
/// [Authenticated Route] Retrieves the signed-in member's notification lines for
/// the bell widget. Recipients are matched by display name.
#[utoipa::path(
    get,
    path = "/api/notifications",
    responses((status = 200, description = "My notifications", body = [Notification]))
)]
pub async fn get_notifications(
    user: CurrentUser,
    State(state): State<AppState>,
) -> Json<Vec<Notification>> {
    let recipient = user.name.unwrap_or_default();
    Json(state.repo.notifications_for(&recipient).await)
}

/// mark_notification_read
///
/// [Authenticated Route] Marks a notification as read, enforced by a recipient
/// check against the session's display name.
#[utoipa::path(
    patch,
    path = "/api/notifications/{id}/read",
    params(("id" = Uuid, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Marked as read"),
        (status = 404, description = "Not Found or Not Yours")
    )
)]
pub async fn mark_notification_read(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    let recipient = user.name.unwrap_or_default();
    if state.repo.mark_notification_read(id, &recipient).await {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

/// list_chat
///
/// [Authenticated Route] All lines in the portal-wide chat widget.
#[utoipa::path(
    get,
    path = "/api/chat",
    responses((status = 200, description = "Chat history", body = [ChatMessage]))
)]
pub async fn list_chat(
    _user: CurrentUser,
    State(state): State<AppState>,
) -> Json<Vec<ChatMessage>> {
    Json(state.repo.list_chat_messages().await)
}

/// post_chat
///
/// [Authenticated Route] Posts a chat line under the session's display name.
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatPostRequest,
    responses((status = 201, description = "Posted", body = ChatMessage))
)]
pub async fn post_chat(
    user: CurrentUser,
    State(state): State<AppState>,
    Json(payload): Json<ChatPostRequest>,
) -> (StatusCode, Json<ChatMessage>) {
    let sender = user.name.unwrap_or_else(|| user.role.as_str().to_string());
    let message = state.repo.post_chat_message(sender, payload.body).await;
    (StatusCode::CREATED, Json(message))
}

// --- Static Display Handlers (Fabricated Data) ---

/// analytics_summary
///
/// [Display Route] Hard-coded figures for the analytics cards. No aggregation
/// runs behind this endpoint.
#[utoipa::path(
    get,
    path = "/api/analytics/summary",
    responses((status = 200, description = "Summary", body = AnalyticsSummary))
)]
pub async fn analytics_summary() -> Json<AnalyticsSummary> {
    Json(AnalyticsSummary {
        total_risks: 128,
        total_treaties: 17,
        premium_volume: "48200000.00".to_string(),
        loss_ratio_pct: 62.4,
        open_claims: 9,
    })
}

/// deployments
///
/// [Display Route] The mock deployment/status board. Every row is fabricated and
/// no orchestration is performed.
#[utoipa::path(
    get,
    path = "/api/deployments",
    responses((status = 200, description = "Service statuses", body = [DeploymentStatus]))
)]
pub async fn deployments() -> Json<Vec<DeploymentStatus>> {
    let now = Utc::now();
    Json(vec![
        DeploymentStatus {
            service: "portal-web".to_string(),
            status: "healthy".to_string(),
            uptime: "99.98%".to_string(),
            last_deployed: now - Duration::hours(6),
        },
        DeploymentStatus {
            service: "portal-api".to_string(),
            status: "healthy".to_string(),
            uptime: "99.95%".to_string(),
            last_deployed: now - Duration::hours(30),
        },
        DeploymentStatus {
            service: "analytics-batch".to_string(),
            status: "degraded".to_string(),
            uptime: "97.10%".to_string(),
            last_deployed: now - Duration::days(4),
        },
    ])
}

// --- Page Handlers ---

// Page routes return a JSON shell standing in for the rendered page tree. The
// guarded ones run the Client Role Guard against a session store snapshot:
// Allowed renders content, Checking renders the empty shell, Redirecting
// becomes the navigation the guard would otherwise fire.

fn render_guarded(guard: &RoleGuard, session: &SessionState, area: &str, content: &str) -> Response {
    match guard.evaluate(session) {
        GuardState::Allowed => Json(PagePayload {
            area: area.to_string(),
            content: Some(content.to_string()),
        })
        .into_response(),
        GuardState::Checking => Json(PagePayload {
            area: area.to_string(),
            content: None,
        })
        .into_response(),
        GuardState::Redirecting { target } => Redirect::temporary(&target).into_response(),
    }
}

/// The landing page is always visible regardless of cookie or session state.
pub async fn landing_page() -> Json<PagePayload> {
    Json(PagePayload {
        area: "landing".to_string(),
        content: Some("Reinsurance portal".to_string()),
    })
}

pub async fn login_page() -> Json<PagePayload> {
    Json(PagePayload {
        area: "login".to_string(),
        content: Some("Sign in".to_string()),
    })
}

/// dashboard_page
///
/// Requires any authenticated role; signed-out sessions are sent to the landing page.
pub async fn dashboard_page(State(state): State<AppState>) -> Response {
    let guard = RoleGuard::new(ANY_ROLE);
    render_guarded(
        &guard,
        &state.sessions.snapshot(),
        "dashboard",
        "Role-scoped dashboard",
    )
}

/// non_life_page
///
/// The restricted area root. Any authenticated role may view it.
pub async fn non_life_page(State(state): State<AppState>) -> Response {
    let guard = RoleGuard::new(ANY_ROLE);
    render_guarded(
        &guard,
        &state.sessions.snapshot(),
        "non-life",
        "Non-life placement workspace",
    )
}

/// reinsurance_page
///
/// The reinsurer-only sub-area. Insurers are also admitted, mirroring the edge
/// filter's rule for this prefix; everyone else falls back to the dashboard.
pub async fn reinsurance_page(State(state): State<AppState>) -> Response {
    let guard = RoleGuard::new([Role::Reinsurer, Role::Insurer]);
    render_guarded(
        &guard,
        &state.sessions.snapshot(),
        "non-life/reinsurance",
        "Treaty desk",
    )
}

/// Profile and settings are layout-wrapped but enforced by neither gate layer.
pub async fn profile_page() -> Json<PagePayload> {
    Json(PagePayload {
        area: "profile".to_string(),
        content: Some("Member profile".to_string()),
    })
}

pub async fn settings_page() -> Json<PagePayload> {
    Json(PagePayload {
        area: "settings".to_string(),
        content: Some("Portal settings".to_string()),
    })
}
