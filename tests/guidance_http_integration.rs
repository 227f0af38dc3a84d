//! Integration tests for the guidance REST surface.
//!
//! Each test spins up an Axum server on a random port backed by an in-memory
//! store and drives it over HTTP.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use tokio::net::TcpListener;

use guidance_engine::catalog::builtin_catalog;
use guidance_engine::guidance::{GuidanceFacade, GuidanceRouteState, guidance_routes};
use guidance_engine::store::{KeyValueStore, MemoryStore, keys};

/// Short enough to keep tests quick, long enough to observe the gap.
const SETTLE_DELAY: Duration = Duration::from_millis(100);

struct TestServer {
    base: String,
    client: reqwest::Client,
    facade: Arc<GuidanceFacade>,
    store: Arc<MemoryStore>,
}

impl TestServer {
    async fn get(&self, path: &str) -> Value {
        let resp = self
            .client
            .get(format!("{}{}", self.base, path))
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_success(), "GET {path}: {}", resp.status());
        resp.json().await.unwrap()
    }

    async fn post(&self, path: &str) -> Value {
        let resp = self
            .client
            .post(format!("{}{}", self.base, path))
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_success(), "POST {path}: {}", resp.status());
        resp.json().await.unwrap()
    }

    async fn post_json(&self, path: &str, body: Value) -> Value {
        let resp = self
            .client
            .post(format!("{}{}", self.base, path))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_success(), "POST {path}: {}", resp.status());
        resp.json().await.unwrap()
    }
}

/// Start an Axum server on a random port.
async fn start_server() -> TestServer {
    let store = Arc::new(MemoryStore::new());
    let catalog = Arc::new(builtin_catalog().unwrap());
    let facade = Arc::new(GuidanceFacade::new(catalog, store.clone(), SETTLE_DELAY).await);
    let app = guidance_routes(GuidanceRouteState {
        facade: Arc::clone(&facade),
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        base: format!("http://127.0.0.1:{port}"),
        client: reqwest::Client::new(),
        facade,
        store,
    }
}

// ── Health / state ──────────────────────────────────────────────────

#[tokio::test]
async fn health_endpoint() {
    let server = start_server().await;
    let body = server.get("/health").await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "guidance-engine");
}

#[tokio::test]
async fn fresh_state() {
    let server = start_server().await;
    let state = server.get("/api/guidance/state").await;

    assert!(state["activeHint"].is_null());
    assert_eq!(state["dismissedHintIds"], json!([]));
    assert!(state["activeTutorial"].is_null());
    assert_eq!(state["onboardingStepIndex"], 0);
    assert_eq!(state["onboardingStep"], "welcome");
    assert_eq!(state["onboardingCompleted"], false);
}

// ── Hints ───────────────────────────────────────────────────────────

#[tokio::test]
async fn route_hints_and_dismissal() {
    let server = start_server().await;

    let hints = server.get("/api/guidance/hints?route=/dashboard").await;
    assert_eq!(hints["selected"]["id"], "dashboard-welcome");
    assert_eq!(hints["eligible"].as_array().unwrap().len(), 3);

    let resp = server.post("/api/guidance/hints/dashboard-welcome/dismiss").await;
    assert_eq!(resp["applied"], true);
    assert_eq!(resp["state"]["dismissedHintIds"], json!(["dashboard-welcome"]));

    let hints = server.get("/api/guidance/hints?route=/dashboard").await;
    assert_eq!(hints["selected"]["id"], "dashboard-growth-phase");

    server.facade.flush().await;
    assert_eq!(
        server
            .store
            .get(keys::HINTS_DISMISSED_IDS)
            .await
            .unwrap()
            .as_deref(),
        Some(r#"["dashboard-welcome"]"#)
    );
}

#[tokio::test]
async fn unknown_hint_is_not_applied() {
    let server = start_server().await;
    let resp = server.post("/api/guidance/hints/ghost/show").await;
    assert_eq!(resp["applied"], false);
    assert!(resp["state"]["activeHint"].is_null());

    let resp = server.post("/api/guidance/hints/ghost/dismiss").await;
    assert_eq!(resp["applied"], false);
    assert_eq!(resp["state"]["dismissedHintIds"], json!([]));
}

#[tokio::test]
async fn repeat_dismiss_is_not_applied() {
    let server = start_server().await;
    let resp = server.post("/api/guidance/hints/chat-first-message/dismiss").await;
    assert_eq!(resp["applied"], true);

    let resp = server.post("/api/guidance/hints/chat-first-message/dismiss").await;
    assert_eq!(resp["applied"], false);
    assert_eq!(resp["state"]["dismissedHintIds"], json!(["chat-first-message"]));

    let resp = server.post("/api/guidance/hints/hide").await;
    assert_eq!(resp["applied"], false);
}

#[tokio::test]
async fn reset_restores_dismissed_hints() {
    let server = start_server().await;
    server.post("/api/guidance/hints/dashboard-welcome/dismiss").await;
    server.post("/api/guidance/hints/dashboard-streak/dismiss").await;

    let resp = server.post("/api/guidance/hints/reset").await;
    assert_eq!(resp["applied"], true);
    assert_eq!(resp["state"]["dismissedHintIds"], json!([]));

    let hints = server.get("/api/guidance/hints?route=/dashboard").await;
    assert_eq!(hints["selected"]["id"], "dashboard-welcome");
    assert_eq!(hints["eligible"].as_array().unwrap().len(), 3);

    server.facade.flush().await;
    assert_eq!(
        server
            .store
            .get(keys::HINTS_DISMISSED_IDS)
            .await
            .unwrap()
            .as_deref(),
        Some("[]")
    );
}

#[tokio::test]
async fn navigate_surfaces_hint_after_settle_delay() {
    let server = start_server().await;

    let resp = server
        .post_json("/api/guidance/navigate", json!({ "route": "/chat" }))
        .await;
    assert!(resp["state"]["activeHint"].is_null());
    assert_eq!(resp["state"]["currentRoute"], "/chat");

    tokio::time::sleep(SETTLE_DELAY * 3).await;
    let state = server.get("/api/guidance/state").await;
    assert_eq!(state["activeHint"]["id"], "chat-first-message");

    let resp = server.post("/api/guidance/hints/hide").await;
    assert_eq!(resp["applied"], true);
    assert!(resp["state"]["activeHint"].is_null());
    assert_eq!(resp["state"]["dismissedHintIds"], json!([]));
}

// ── Tutorials ───────────────────────────────────────────────────────

#[tokio::test]
async fn tutorial_flow() {
    let server = start_server().await;

    let overview = server.get("/api/guidance/tutorials").await;
    let chat_basics = overview
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["id"] == "chat-basics")
        .unwrap();
    assert_eq!(chat_basics["status"]["state"], "locked");

    let resp = server.post("/api/guidance/tutorials/chat-basics/start").await;
    assert_eq!(resp["applied"], false);

    let resp = server.post("/api/guidance/tutorials/getting-started/start").await;
    assert_eq!(resp["applied"], true);
    assert_eq!(resp["state"]["activeTutorial"]["id"], "getting-started");

    let resp = server.post("/api/guidance/tutorials/next").await;
    assert_eq!(resp["state"]["activeStepIndex"], 1);
    let resp = server.post("/api/guidance/tutorials/previous").await;
    assert_eq!(resp["state"]["activeStepIndex"], 0);

    let resp = server
        .post("/api/guidance/tutorials/getting-started/complete")
        .await;
    assert!(resp["state"]["activeTutorial"].is_null());
    assert_eq!(resp["state"]["completedTutorialIds"], json!(["getting-started"]));

    let resp = server.post("/api/guidance/tutorials/chat-basics/start").await;
    assert_eq!(resp["applied"], true);

    let resp = server.post("/api/guidance/tutorials/abandon").await;
    assert_eq!(resp["applied"], true);
    assert!(resp["state"]["activeTutorial"].is_null());
    assert_eq!(resp["state"]["completedTutorialIds"], json!(["getting-started"]));

    let resp = server.post("/api/guidance/tutorials/abandon").await;
    assert_eq!(resp["applied"], false);
}

// ── Onboarding ──────────────────────────────────────────────────────

#[tokio::test]
async fn onboarding_view_lists_steps_and_palette() {
    let server = start_server().await;
    let view = server.get("/api/guidance/onboarding").await;
    assert_eq!(view["steps"].as_array().unwrap().len(), 5);
    assert_eq!(view["steps"][2]["step"], "values");
    assert!(view["palette"].as_array().unwrap().contains(&json!("growth")));
    assert_eq!(view["state"]["onboardingStepIndex"], 0);
}

#[tokio::test]
async fn onboarding_gate_over_http() {
    let server = start_server().await;
    server.post("/api/guidance/onboarding/next").await;
    let resp = server.post("/api/guidance/onboarding/next").await;
    assert_eq!(resp["state"]["onboardingStep"], "values");

    for tag in ["growth", "balance"] {
        let resp = server
            .post(&format!("/api/guidance/onboarding/values/{tag}"))
            .await;
        assert_eq!(resp["applied"], true);
    }
    let resp = server.post("/api/guidance/onboarding/next").await;
    assert_eq!(resp["applied"], false);
    assert_eq!(resp["state"]["onboardingStepIndex"], 2);
    assert_eq!(resp["state"]["onboardingCanAdvance"], false);

    let resp = server.post("/api/guidance/onboarding/values/purpose").await;
    assert_eq!(resp["state"]["onboardingCanAdvance"], true);
    let resp = server.post("/api/guidance/onboarding/values/courage").await;
    assert_eq!(resp["applied"], false);

    let resp = server.post("/api/guidance/onboarding/next").await;
    assert_eq!(resp["applied"], true);
    assert_eq!(resp["state"]["onboardingStep"], "rhythm");

    let resp = server.post("/api/guidance/onboarding/previous").await;
    assert_eq!(resp["state"]["onboardingStep"], "values");
    assert_eq!(
        resp["state"]["onboardingSelectedValues"],
        json!(["growth", "balance", "purpose"])
    );
}

#[tokio::test]
async fn onboarding_skip_and_restart() {
    let server = start_server().await;
    server.post("/api/guidance/onboarding/next").await;

    let resp = server.post("/api/guidance/onboarding/skip").await;
    assert_eq!(resp["applied"], true);
    assert_eq!(resp["state"]["onboardingCompleted"], true);

    server.facade.flush().await;
    assert!(
        server
            .store
            .get(keys::ONBOARDING_STEP_INDEX)
            .await
            .unwrap()
            .is_none()
    );

    let resp = server.post("/api/guidance/onboarding/restart").await;
    assert_eq!(resp["state"]["onboardingCompleted"], false);
    assert_eq!(resp["state"]["onboardingStepIndex"], 0);
}
