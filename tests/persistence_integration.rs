//! Guidance state surviving a restart on a libsql database file.

use std::sync::Arc;
use std::time::Duration;

use guidance_engine::catalog::builtin_catalog;
use guidance_engine::guidance::GuidanceFacade;
use guidance_engine::onboarding::{Advance, OnboardingStep};
use guidance_engine::store::{KeyValueStore, LibSqlStore};

const DELAY: Duration = Duration::from_millis(800);

async fn open(path: &std::path::Path, profile: &str) -> GuidanceFacade {
    let store: Arc<dyn KeyValueStore> =
        Arc::new(LibSqlStore::new_local(path, profile).await.unwrap());
    let catalog = Arc::new(builtin_catalog().unwrap());
    GuidanceFacade::new(catalog, store, DELAY).await
}

#[tokio::test]
async fn resumes_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guidance.db");

    {
        let facade = open(&path, "alice").await;
        facade.dismiss_hint("dashboard-welcome").await;
        facade.complete_tutorial("getting-started").await;
        facade.onboarding_next().await;
        facade.onboarding_next().await;
        facade.toggle_value("growth").await;
        facade.toggle_value("courage").await;
        facade.flush().await;
        assert_eq!(facade.failed_writes(), 0);
    }

    let facade = open(&path, "alice").await;
    assert_eq!(facade.dismissed_hint_ids().await, vec!["dashboard-welcome"]);
    assert_eq!(facade.completed_tutorial_ids().await, vec!["getting-started"]);
    assert!(facade.active_tutorial().await.is_none());

    let onboarding = facade.onboarding().await;
    assert_eq!(onboarding.step, OnboardingStep::Values);
    assert_eq!(onboarding.selected_values, vec!["growth", "courage"]);
    assert_eq!(facade.onboarding_next().await, Advance::Blocked);
}

#[tokio::test]
async fn completion_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guidance.db");

    {
        let facade = open(&path, "alice").await;
        facade.skip_onboarding().await;
        facade.flush().await;
    }

    let facade = open(&path, "alice").await;
    assert!(facade.onboarding().await.completed);
    assert_eq!(facade.onboarding_next().await, Advance::Inactive);
}

#[tokio::test]
async fn profiles_do_not_share_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guidance.db");

    {
        let alice = open(&path, "alice").await;
        alice.dismiss_hint("chat-first-message").await;
        alice.flush().await;
    }

    let bob = open(&path, "bob").await;
    assert!(bob.dismissed_hint_ids().await.is_empty());
    assert_eq!(
        bob.select_hint_for_route("/chat").await.map(|h| h.id),
        Some("chat-first-message".to_string())
    );
}
