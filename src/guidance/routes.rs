//! REST endpoints exposing the guidance facade to the host UI.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::facade::GuidanceFacade;
use super::state::GuidanceSnapshot;
use crate::catalog::Hint;
use crate::onboarding::{Advance, OnboardingStep, StepInfo, VALUE_PALETTE};

/// Shared state for guidance routes.
#[derive(Clone)]
pub struct GuidanceRouteState {
    pub facade: Arc<GuidanceFacade>,
}

/// Result of a mutating call: whether it took effect, and the state after.
#[derive(Debug, Serialize)]
struct ActionResponse {
    applied: bool,
    state: GuidanceSnapshot,
}

async fn respond(facade: &GuidanceFacade, applied: bool) -> Json<ActionResponse> {
    Json(ActionResponse {
        applied,
        state: facade.snapshot().await,
    })
}

/// Build the guidance REST routes.
pub fn guidance_routes(state: GuidanceRouteState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/guidance/state", get(get_state))
        .route("/api/guidance/navigate", post(navigate))
        .route("/api/guidance/hints", get(list_hints))
        .route("/api/guidance/hints/hide", post(hide_hint))
        .route("/api/guidance/hints/reset", post(reset_hints))
        .route("/api/guidance/hints/{id}/show", post(show_hint))
        .route("/api/guidance/hints/{id}/dismiss", post(dismiss_hint))
        .route("/api/guidance/tutorials", get(list_tutorials))
        .route("/api/guidance/tutorials/next", post(next_step))
        .route("/api/guidance/tutorials/previous", post(previous_step))
        .route("/api/guidance/tutorials/abandon", post(abandon_tutorial))
        .route("/api/guidance/tutorials/{id}/start", post(start_tutorial))
        .route("/api/guidance/tutorials/{id}/complete", post(complete_tutorial))
        .route("/api/guidance/onboarding", get(get_onboarding))
        .route("/api/guidance/onboarding/next", post(onboarding_next))
        .route("/api/guidance/onboarding/previous", post(onboarding_previous))
        .route("/api/guidance/onboarding/skip", post(onboarding_skip))
        .route("/api/guidance/onboarding/restart", post(onboarding_restart))
        .route("/api/guidance/onboarding/values/{tag}", post(toggle_value))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "guidance-engine"
    }))
}

// ── State ───────────────────────────────────────────────────────────────

/// GET /api/guidance/state
async fn get_state(State(state): State<GuidanceRouteState>) -> impl IntoResponse {
    Json(state.facade.snapshot().await)
}

#[derive(Debug, Deserialize)]
struct NavigateBody {
    route: String,
}

/// POST /api/guidance/navigate
async fn navigate(
    State(state): State<GuidanceRouteState>,
    Json(body): Json<NavigateBody>,
) -> impl IntoResponse {
    state.facade.navigate(&body.route).await;
    respond(&state.facade, true).await
}

// ── Hints ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RouteQuery {
    route: String,
}

#[derive(Debug, Serialize)]
struct RouteHints {
    route: String,
    selected: Option<Hint>,
    eligible: Vec<Hint>,
}

/// GET /api/guidance/hints?route=/dashboard
async fn list_hints(
    State(state): State<GuidanceRouteState>,
    Query(query): Query<RouteQuery>,
) -> impl IntoResponse {
    let selected = state.facade.select_hint_for_route(&query.route).await;
    let eligible = state.facade.hints_for_route(&query.route).await;
    Json(RouteHints {
        route: query.route,
        selected,
        eligible,
    })
}

async fn show_hint(
    State(state): State<GuidanceRouteState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let applied = state.facade.show_hint(&id).await;
    respond(&state.facade, applied).await
}

async fn hide_hint(State(state): State<GuidanceRouteState>) -> impl IntoResponse {
    let applied = state.facade.hide_hint().await;
    respond(&state.facade, applied).await
}

async fn dismiss_hint(
    State(state): State<GuidanceRouteState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let applied = state.facade.dismiss_hint(&id).await;
    respond(&state.facade, applied).await
}

async fn reset_hints(State(state): State<GuidanceRouteState>) -> impl IntoResponse {
    state.facade.reset_hints().await;
    respond(&state.facade, true).await
}

// ── Tutorials ───────────────────────────────────────────────────────────

/// GET /api/guidance/tutorials
async fn list_tutorials(State(state): State<GuidanceRouteState>) -> impl IntoResponse {
    Json(state.facade.tutorials_overview().await)
}

async fn start_tutorial(
    State(state): State<GuidanceRouteState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let applied = state.facade.start_tutorial(&id).await;
    respond(&state.facade, applied).await
}

async fn complete_tutorial(
    State(state): State<GuidanceRouteState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let applied = state.facade.catalog().tutorial(&id).is_some();
    state.facade.complete_tutorial(&id).await;
    respond(&state.facade, applied).await
}

async fn next_step(State(state): State<GuidanceRouteState>) -> impl IntoResponse {
    let applied = state.facade.next_step().await;
    respond(&state.facade, applied).await
}

async fn previous_step(State(state): State<GuidanceRouteState>) -> impl IntoResponse {
    let applied = state.facade.previous_step().await;
    respond(&state.facade, applied).await
}

async fn abandon_tutorial(State(state): State<GuidanceRouteState>) -> impl IntoResponse {
    let applied = state.facade.abandon_tutorial().await;
    respond(&state.facade, applied).await
}

// ── Onboarding ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct OnboardingView {
    steps: Vec<StepInfo>,
    palette: &'static [&'static str],
    state: GuidanceSnapshot,
}

/// GET /api/guidance/onboarding
///
/// Step copy, the value palette, and the current state.
async fn get_onboarding(State(state): State<GuidanceRouteState>) -> impl IntoResponse {
    Json(OnboardingView {
        steps: OnboardingStep::ALL.iter().map(|s| s.info()).collect(),
        palette: VALUE_PALETTE,
        state: state.facade.snapshot().await,
    })
}

async fn onboarding_next(State(state): State<GuidanceRouteState>) -> impl IntoResponse {
    let applied = matches!(
        state.facade.onboarding_next().await,
        Advance::Moved(_) | Advance::Finished
    );
    respond(&state.facade, applied).await
}

async fn onboarding_previous(State(state): State<GuidanceRouteState>) -> impl IntoResponse {
    let applied = state.facade.onboarding_previous().await;
    respond(&state.facade, applied).await
}

async fn onboarding_skip(State(state): State<GuidanceRouteState>) -> impl IntoResponse {
    let applied = state.facade.skip_onboarding().await;
    respond(&state.facade, applied).await
}

async fn onboarding_restart(State(state): State<GuidanceRouteState>) -> impl IntoResponse {
    state.facade.restart_onboarding().await;
    respond(&state.facade, true).await
}

async fn toggle_value(
    State(state): State<GuidanceRouteState>,
    Path(tag): Path<String>,
) -> impl IntoResponse {
    let applied = state.facade.toggle_value(&tag).await;
    respond(&state.facade, applied).await
}
