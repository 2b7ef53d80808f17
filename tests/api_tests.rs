use std::sync::Arc;

use reinsure_portal::{
    AppConfig, AppState, InMemoryRepository, SessionStore, create_router,
    models::{
        AnalyticsSummary, DeploymentStatus, Notification, Risk, RiskStatus, RiskWithSubmitter,
        SessionView,
    },
    repository::{RepositoryState, SEED_BROKER_ID, SEED_BROKER_NAME},
};
use tokio::net::TcpListener;

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
}

async fn spawn_app() -> TestApp {
    dotenv::dotenv().ok();

    let repo = Arc::new(InMemoryRepository::seeded()) as RepositoryState;
    let sessions = Arc::new(SessionStore::new());
    let config = AppConfig::default();

    let state = AppState {
        repo,
        sessions,
        config,
    };
    let router = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp { address }
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("req fail");
    assert!(response.status().is_success());
}

#[tokio::test]
async fn test_session_lifecycle() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // Sign in as the seeded broker.
    let response = client
        .post(format!("{}/api/login", app.address))
        .json(&serde_json::json!({ "name": SEED_BROKER_NAME, "role": "broker" }))
        .send()
        .await
        .expect("login fail");
    assert_eq!(response.status(), 200);

    let cookies: Vec<String> = response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert!(cookies.iter().any(|c| c.starts_with("userRole=broker")));
    assert!(cookies.iter().any(|c| c.starts_with("userName=")));

    // The session store now reflects the login.
    let view: SessionView = client
        .get(format!("{}/api/session", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(view.authenticated);
    assert_eq!(view.name.as_deref(), Some(SEED_BROKER_NAME));

    // Logout clears both.
    let response = client
        .post(format!("{}/api/logout", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let view: SessionView = client
        .get(format!("{}/api/session", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!view.authenticated);
}

#[tokio::test]
async fn test_risk_lifecycle() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // Create
    let response = client
        .post(format!("{}/api/risks", app.address))
        .json(&serde_json::json!({
            "title": "Warehouse fire portfolio",
            "description": "Twelve warehouses, sprinklered",
            "premium": "125000.50",
            "coverage": "Property / Fire",
            "submitter_id": SEED_BROKER_ID,
        }))
        .send()
        .await
        .expect("post fail");
    assert_eq!(response.status(), 201);
    let risk: Risk = response.json().await.unwrap();
    assert_eq!(risk.status, RiskStatus::Draft);

    // List joins the seeded submitter's name and email.
    let rows: Vec<RiskWithSubmitter> = client
        .get(format!("{}/api/risks", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let row = rows.iter().find(|r| r.id == risk.id).expect("row missing");
    assert_eq!(row.submitter_name, SEED_BROKER_NAME);
    assert_eq!(row.submitter_email, "aoife.brennan@harborlight.example");

    // Detail
    let response = client
        .get(format!("{}/api/risks/{}", app.address, risk.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_create_risk_with_bad_premium_is_rejected() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/risks", app.address))
        .json(&serde_json::json!({
            "title": "Bad premium",
            "description": "",
            "premium": "twelve grand",
            "coverage": "Property",
            "submitter_id": SEED_BROKER_ID,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 422);

    // Generic error payload shape.
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn test_notifications_for_signed_in_member() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let notifications: Vec<Notification> = client
        .get(format!("{}/api/notifications", app.address))
        .header(
            "Cookie",
            format!("userRole=broker; userName={SEED_BROKER_NAME}"),
        )
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(!notifications.is_empty());
    assert!(notifications.iter().all(|n| n.recipient == SEED_BROKER_NAME));
}

#[tokio::test]
async fn test_notifications_require_session_cookie() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/notifications", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_fabricated_display_endpoints() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let summary: AnalyticsSummary = client
        .get(format!("{}/api/analytics/summary", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(summary.total_risks > 0);

    let board: Vec<DeploymentStatus> = client
        .get(format!("{}/api/deployments", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!board.is_empty());
    assert!(board.iter().any(|d| d.service == "portal-web"));
}

#[tokio::test]
async fn test_treaty_listing_is_seeded() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let treaties: Vec<serde_json::Value> = client
        .get(format!("{}/api/treaties", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(treaties.len() >= 2);
}
