use std::sync::Arc;

use reinsure_portal::{
    AppConfig, AppState, InMemoryRepository, SessionStore, create_router,
    gate::{RouteDecision, decide},
    repository::RepositoryState,
};
use tokio::net::TcpListener;

// --- Decision Function Tests ---
// The edge filter's core is a pure function over (path, cookie), so the rule
// matrix is exercised directly before touching HTTP at all.

#[test]
fn landing_page_always_continues() {
    assert_eq!(decide("/", None), RouteDecision::Continue);
    assert_eq!(decide("/", Some("broker")), RouteDecision::Continue);
    assert_eq!(decide("/", Some("not-a-role")), RouteDecision::Continue);
}

#[test]
fn restricted_area_without_cookie_goes_to_login() {
    assert_eq!(decide("/non-life", None), RouteDecision::Redirect("/login"));
    assert_eq!(
        decide("/non-life/placements/42", None),
        RouteDecision::Redirect("/login")
    );
}

#[test]
fn restricted_area_with_any_cookie_continues() {
    assert_eq!(decide("/non-life", Some("broker")), RouteDecision::Continue);
    assert_eq!(
        decide("/non-life", Some("insurer")),
        RouteDecision::Continue
    );
}

#[test]
fn reinsurer_sub_area_rejects_broker_and_unknown_tags() {
    // Presence passes the restricted-area rule, but the sub-area rule still
    // sends anything that is not reinsurer/insurer to the dashboard.
    assert_eq!(
        decide("/non-life/reinsurance", Some("broker")),
        RouteDecision::Redirect("/dashboard")
    );
    assert_eq!(
        decide("/non-life/reinsurance", Some("unset")),
        RouteDecision::Redirect("/dashboard")
    );
    // Absent cookie hits the earlier restricted-area rule first.
    assert_eq!(
        decide("/non-life/reinsurance", None),
        RouteDecision::Redirect("/login")
    );
}

#[test]
fn reinsurer_sub_area_admits_reinsurer_and_insurer() {
    assert_eq!(
        decide("/non-life/reinsurance", Some("reinsurer")),
        RouteDecision::Continue
    );
    assert_eq!(
        decide("/non-life/reinsurance/treaties", Some("insurer")),
        RouteDecision::Continue
    );
}

#[test]
fn dashboard_without_cookie_goes_to_landing() {
    assert_eq!(decide("/dashboard", None), RouteDecision::Redirect("/"));
    assert_eq!(
        decide("/dashboard", Some("broker")),
        RouteDecision::Continue
    );
}

#[test]
fn unlisted_paths_continue() {
    assert_eq!(decide("/profile", None), RouteDecision::Continue);
    assert_eq!(decide("/settings", None), RouteDecision::Continue);
    assert_eq!(decide("/api/risks", None), RouteDecision::Continue);
}

#[test]
fn decision_is_idempotent() {
    // Evaluating twice with identical request state yields the identical decision.
    let first = decide("/non-life/reinsurance", Some("broker"));
    let second = decide("/non-life/reinsurance", Some("broker"));
    assert_eq!(first, second);
}

// --- Middleware Tests (live server) ---

async fn spawn_app() -> String {
    let repo = Arc::new(InMemoryRepository::seeded()) as RepositoryState;
    let state = AppState {
        repo,
        sessions: Arc::new(SessionStore::new()),
        config: AppConfig::default(),
    };
    let router = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://127.0.0.1:{}", port)
}

// Redirects must stay observable, so the client never follows them.
fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

#[tokio::test]
async fn filter_redirects_restricted_area_to_login() {
    let address = spawn_app().await;

    let response = client()
        .get(format!("{address}/non-life"))
        .send()
        .await
        .expect("req fail");

    assert_eq!(response.status(), 307);
    assert_eq!(response.headers()["location"], "/login");
}

#[tokio::test]
async fn filter_redirects_broker_away_from_reinsurance() {
    let address = spawn_app().await;

    let response = client()
        .get(format!("{address}/non-life/reinsurance"))
        .header("Cookie", "userRole=broker")
        .send()
        .await
        .expect("req fail");

    assert_eq!(response.status(), 307);
    assert_eq!(response.headers()["location"], "/dashboard");
}

#[tokio::test]
async fn filter_admits_insurer_to_reinsurance() {
    let address = spawn_app().await;

    let response = client()
        .get(format!("{address}/non-life/reinsurance"))
        .header("Cookie", "userRole=insurer")
        .send()
        .await
        .expect("req fail");

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn filter_redirects_dashboard_to_landing_without_cookie() {
    let address = spawn_app().await;

    let response = client()
        .get(format!("{address}/dashboard"))
        .send()
        .await
        .expect("req fail");

    assert_eq!(response.status(), 307);
    assert_eq!(response.headers()["location"], "/");
}

#[tokio::test]
async fn filter_never_sets_cookies() {
    let address = spawn_app().await;

    let response = client()
        .get(format!("{address}/non-life"))
        .send()
        .await
        .expect("req fail");

    assert_eq!(response.status(), 307);
    assert!(response.headers().get("set-cookie").is_none());
}

#[tokio::test]
async fn landing_page_continues_regardless_of_cookie_state() {
    let address = spawn_app().await;
    let client = client();

    let anonymous = client
        .get(format!("{address}/"))
        .send()
        .await
        .expect("req fail");
    assert_eq!(anonymous.status(), 200);

    let with_cookie = client
        .get(format!("{address}/"))
        .header("Cookie", "userRole=reinsurer")
        .send()
        .await
        .expect("req fail");
    assert_eq!(with_cookie.status(), 200);
}
