//! GuidanceFacade — the single entry point UI surfaces call.
//!
//! Composes the hint, tutorial and onboarding engines over one store. Every
//! operation applies to in-memory state immediately and queues the affected
//! keys on the write-behind store without waiting for them. Nothing here
//! returns an error: unknown ids, failed gates and storage trouble are logged
//! and absorbed.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::{RwLock, broadcast};
use tracing::{debug, info};

use super::events::{GuidanceEvent, TimedEvent};
use super::state::{GuidanceSnapshot, GuidanceState};
use super::trigger::TriggerId;
use crate::catalog::{Catalog, Hint, Tutorial};
use crate::onboarding::{Advance, OnboardingState};
use crate::store::codec::encode_string_list;
use crate::store::{KeyValueStore, WriteBehind, keys};
use crate::tutorials::TutorialStatus;

/// Default broadcast channel capacity.
const EVENT_CAPACITY: usize = 256;

/// A tutorial with where it stands for this profile.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TutorialOverview {
    #[serde(flatten)]
    pub tutorial: Tutorial,
    pub status: TutorialStatus,
}

struct FacadeInner {
    catalog: Arc<Catalog>,
    writer: WriteBehind,
    state: RwLock<GuidanceState>,
    events: broadcast::Sender<TimedEvent>,
    settle_delay: Duration,
}

/// Guidance entry point. One instance per session.
pub struct GuidanceFacade {
    inner: Arc<FacadeInner>,
}

impl GuidanceFacade {
    /// Hydrate guidance state from `store`. Must be called inside a tokio
    /// runtime.
    pub async fn new(
        catalog: Arc<Catalog>,
        store: Arc<dyn KeyValueStore>,
        settle_delay: Duration,
    ) -> Self {
        let writer = WriteBehind::spawn(store);
        let state = GuidanceState::hydrate(&writer).await;
        let (events, _rx) = broadcast::channel(EVENT_CAPACITY);

        info!(
            hints = catalog.hints().len(),
            tutorials = catalog.tutorials().len(),
            dismissed = state.hints.dismissed().len(),
            completed = state.tutorials.completed().len(),
            onboarding_step = %state.onboarding.step(),
            "Guidance state hydrated"
        );

        Self {
            inner: Arc::new(FacadeInner {
                catalog,
                writer,
                state: RwLock::new(state),
                events,
                settle_delay,
            }),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Subscribe to guidance events.
    pub fn subscribe(&self) -> broadcast::Receiver<TimedEvent> {
        self.inner.events.subscribe()
    }

    /// Wait until every queued write has reached the store.
    pub async fn flush(&self) {
        self.inner.writer.flush().await;
    }

    /// Writes that failed since startup.
    pub fn failed_writes(&self) -> u64 {
        self.inner.writer.failed_writes()
    }

    // ── Read-only accessors ─────────────────────────────────────────

    pub async fn snapshot(&self) -> GuidanceSnapshot {
        self.inner.state.read().await.snapshot()
    }

    pub async fn active_hint(&self) -> Option<Hint> {
        self.inner.state.read().await.hints.active().cloned()
    }

    pub async fn active_tutorial(&self) -> Option<Tutorial> {
        self.inner
            .state
            .read()
            .await
            .tutorials
            .active()
            .map(|a| a.tutorial.clone())
    }

    pub async fn active_step_index(&self) -> usize {
        self.inner.state.read().await.tutorials.active_step_index()
    }

    pub async fn dismissed_hint_ids(&self) -> Vec<String> {
        let state = self.inner.state.read().await;
        state.hints.dismissed().iter().cloned().collect()
    }

    pub async fn completed_tutorial_ids(&self) -> Vec<String> {
        let state = self.inner.state.read().await;
        state.tutorials.completed().iter().cloned().collect()
    }

    pub async fn onboarding(&self) -> OnboardingState {
        self.inner.state.read().await.onboarding.state().clone()
    }

    // ── Hints ───────────────────────────────────────────────────────

    /// Show a hint by id. Refused for unknown or dismissed ids and while a
    /// tutorial is running.
    pub async fn show_hint(&self, id: &str) -> bool {
        let mut state = self.inner.state.write().await;
        self.inner.show_hint_locked(&mut state, id)
    }

    /// Hide the active hint without dismissing it. Returns false if no hint
    /// was showing.
    pub async fn hide_hint(&self) -> bool {
        let mut state = self.inner.state.write().await;
        match state.hints.hide() {
            Some(hint) => {
                self.inner.emit(GuidanceEvent::HintHidden { hint_id: hint.id });
                true
            }
            None => false,
        }
    }

    /// Permanently dismiss a hint for this profile. Returns true only for a
    /// known hint that was not already dismissed.
    pub async fn dismiss_hint(&self, id: &str) -> bool {
        let mut state = self.inner.state.write().await;
        if !state.hints.dismiss(&self.inner.catalog, id) {
            return false;
        }
        info!(hint_id = %id, "Hint dismissed");
        self.inner.persist_dismissed(&state);
        self.inner.emit(GuidanceEvent::HintDismissed {
            hint_id: id.to_string(),
        });
        true
    }

    /// The hint `route` would surface right now.
    pub async fn select_hint_for_route(&self, route: &str) -> Option<Hint> {
        let state = self.inner.state.read().await;
        state
            .hints
            .select_for_route(&self.inner.catalog, route)
            .cloned()
    }

    /// Every hint `route` can still surface, in catalog order.
    pub async fn hints_for_route(&self, route: &str) -> Vec<Hint> {
        let state = self.inner.state.read().await;
        state
            .hints
            .eligible_for_route(&self.inner.catalog, route)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Clear all dismissals so every hint can show again.
    pub async fn reset_hints(&self) {
        let mut state = self.inner.state.write().await;
        if state.hints.reset_dismissed() {
            info!("Hint dismissals reset");
            self.inner.persist_dismissed(&state);
            self.inner.emit(GuidanceEvent::HintsReset);
        }
    }

    /// Report a navigation from the host router.
    ///
    /// Hides a hint that belongs to another route, cancels any pending
    /// trigger, and arms a new one that surfaces the route's hint once the
    /// settle delay passes with `route` still current.
    pub async fn navigate(&self, route: &str) {
        let mut state = self.inner.state.write().await;
        state.current_route = Some(route.to_string());

        if state.hints.active().is_some_and(|h| h.route != route) {
            if let Some(hint) = state.hints.hide() {
                self.inner.emit(GuidanceEvent::HintHidden { hint_id: hint.id });
            }
        }

        let weak = Arc::downgrade(&self.inner);
        let delay = self.inner.settle_delay;
        let id = state
            .trigger
            .arm(route, |id| tokio::spawn(fire_after(weak, id, delay)));
        debug!(route = %route, trigger = ?id, "Armed route trigger");
    }

    // ── Tutorials ───────────────────────────────────────────────────

    /// Start a tutorial at its first step. Refused for unknown ids and
    /// unmet prerequisites. Hides the active hint.
    pub async fn start_tutorial(&self, id: &str) -> bool {
        let mut state = self.inner.state.write().await;
        if !state.tutorials.start(&self.inner.catalog, id) {
            return false;
        }
        if let Some(hint) = state.hints.hide() {
            self.inner.emit(GuidanceEvent::HintHidden { hint_id: hint.id });
        }
        info!(tutorial_id = %id, "Tutorial started");
        self.inner.emit(GuidanceEvent::TutorialStarted {
            tutorial_id: id.to_string(),
        });
        true
    }

    pub async fn next_step(&self) -> bool {
        let mut state = self.inner.state.write().await;
        let moved = state.tutorials.next_step();
        if moved {
            self.inner.emit_step_changed(&state);
        }
        moved
    }

    pub async fn previous_step(&self) -> bool {
        let mut state = self.inner.state.write().await;
        let moved = state.tutorials.previous_step();
        if moved {
            self.inner.emit_step_changed(&state);
        }
        moved
    }

    /// Mark a tutorial completed and close the active run.
    ///
    /// `id` need not be the active tutorial.
    pub async fn complete_tutorial(&self, id: &str) {
        let mut state = self.inner.state.write().await;
        let was_active = state.tutorials.active().is_some();
        let newly_completed = state.tutorials.complete(&self.inner.catalog, id);
        if newly_completed {
            info!(tutorial_id = %id, "Tutorial completed");
            self.inner.persist_completed(&state);
        }
        if newly_completed || (was_active && state.tutorials.active().is_none()) {
            self.inner.emit(GuidanceEvent::TutorialCompleted {
                tutorial_id: id.to_string(),
            });
        }
    }

    /// Close the active tutorial without completing it. Returns false if
    /// none was running.
    pub async fn abandon_tutorial(&self) -> bool {
        let mut state = self.inner.state.write().await;
        let Some(run) = state.tutorials.abandon() else {
            return false;
        };
        debug!(tutorial_id = %run.tutorial.id, step = run.step, "Tutorial abandoned");
        self.inner.emit(GuidanceEvent::TutorialAbandoned {
            tutorial_id: run.tutorial.id,
            step: run.step,
        });
        true
    }

    pub async fn tutorial_status(&self, id: &str) -> Option<TutorialStatus> {
        let state = self.inner.state.read().await;
        state.tutorials.status(&self.inner.catalog, id)
    }

    /// Every catalog tutorial with its status, in catalog order.
    pub async fn tutorials_overview(&self) -> Vec<TutorialOverview> {
        let state = self.inner.state.read().await;
        self.inner
            .catalog
            .tutorials()
            .iter()
            .filter_map(|t| {
                let status = state.tutorials.status(&self.inner.catalog, &t.id)?;
                Some(TutorialOverview {
                    tutorial: t.clone(),
                    status,
                })
            })
            .collect()
    }

    /// Clear all completions so tutorials can be earned again.
    pub async fn reset_tutorials(&self) {
        let mut state = self.inner.state.write().await;
        if state.tutorials.reset_completed() {
            info!("Tutorial completions reset");
            self.inner.persist_completed(&state);
        }
    }

    // ── Onboarding ──────────────────────────────────────────────────

    pub async fn onboarding_next(&self) -> Advance {
        let mut state = self.inner.state.write().await;
        let result = state.onboarding.next();
        match result {
            Advance::Moved(step) => {
                self.inner.persist_onboarding_progress(&state);
                self.inner.emit(GuidanceEvent::OnboardingStepChanged { step });
            }
            Advance::Blocked => self.inner.persist_onboarding_progress(&state),
            Advance::Finished => self.inner.onboarding_finished(false),
            Advance::Inactive => {}
        }
        result
    }

    pub async fn onboarding_previous(&self) -> bool {
        let mut state = self.inner.state.write().await;
        if state.onboarding.is_completed() {
            return false;
        }
        let moved = state.onboarding.previous();
        self.inner.persist_onboarding_progress(&state);
        if moved {
            self.inner.emit(GuidanceEvent::OnboardingStepChanged {
                step: state.onboarding.step(),
            });
        }
        moved
    }

    /// Select or deselect a value tag on the values step.
    pub async fn toggle_value(&self, tag: &str) -> bool {
        let mut state = self.inner.state.write().await;
        if state.onboarding.is_completed() {
            return false;
        }
        let changed = state.onboarding.toggle_value(tag);
        self.inner.persist_onboarding_progress(&state);
        changed
    }

    /// Finish the wizard from its last step.
    pub async fn finish_onboarding(&self) -> bool {
        let mut state = self.inner.state.write().await;
        let finished = state.onboarding.finish();
        if finished {
            self.inner.onboarding_finished(false);
        }
        finished
    }

    /// Leave the wizard from any step. The UI confirms first.
    pub async fn skip_onboarding(&self) -> bool {
        let mut state = self.inner.state.write().await;
        let skipped = state.onboarding.skip();
        if skipped {
            self.inner.onboarding_finished(true);
        }
        skipped
    }

    /// Run the wizard again from the first step.
    pub async fn restart_onboarding(&self) {
        let mut state = self.inner.state.write().await;
        state.onboarding.restart();
        self.inner.writer.remove(keys::ONBOARDING_COMPLETED);
        self.inner.persist_onboarding_progress(&state);
        info!("Onboarding restarted");
        self.inner.emit(GuidanceEvent::OnboardingRestarted);
    }
}

/// Body of a route trigger task.
async fn fire_after(inner: Weak<FacadeInner>, id: TriggerId, delay: Duration) {
    tokio::time::sleep(delay).await;
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let mut state = inner.state.write().await;
    inner.fire_route_trigger(&mut state, id);
}

impl FacadeInner {
    fn emit(&self, event: GuidanceEvent) {
        // No subscribers is fine
        let _ = self.events.send(TimedEvent::now(event));
    }

    fn emit_step_changed(&self, state: &GuidanceState) {
        if let Some(active) = state.tutorials.active() {
            self.emit(GuidanceEvent::TutorialStepChanged {
                tutorial_id: active.tutorial.id.clone(),
                step: active.step,
            });
        }
    }

    fn show_hint_locked(&self, state: &mut GuidanceState, id: &str) -> bool {
        if let Some(active) = state.tutorials.active() {
            debug!(
                hint_id = %id,
                tutorial_id = %active.tutorial.id,
                "Tutorial in progress, not stacking a hint on it"
            );
            return false;
        }
        if !state.hints.show(&self.catalog, id) {
            return false;
        }
        if let Some(hint) = state.hints.active() {
            info!(hint_id = %hint.id, route = %hint.route, "Hint shown");
            self.emit(GuidanceEvent::HintShown {
                hint_id: hint.id.clone(),
                route: hint.route.clone(),
            });
        }
        true
    }

    fn fire_route_trigger(&self, state: &mut GuidanceState, id: TriggerId) {
        let Some(route) = state.trigger.claim(id) else {
            debug!(trigger = ?id, "Stale route trigger, ignoring");
            return;
        };
        if state.current_route.as_deref() != Some(route.as_str()) {
            debug!(route = %route, "Route no longer current, ignoring trigger");
            return;
        }
        let Some(hint_id) = state
            .hints
            .select_for_route(&self.catalog, &route)
            .map(|h| h.id.clone())
        else {
            debug!(route = %route, "No eligible hint for route");
            return;
        };
        if state.hints.active().is_some_and(|h| h.id == hint_id) {
            return;
        }
        self.show_hint_locked(state, &hint_id);
    }

    fn persist_dismissed(&self, state: &GuidanceState) {
        self.writer.set(
            keys::HINTS_DISMISSED_IDS,
            encode_string_list(state.hints.dismissed()),
        );
    }

    fn persist_completed(&self, state: &GuidanceState) {
        self.writer.set(
            keys::TUTORIALS_COMPLETED_IDS,
            encode_string_list(state.tutorials.completed()),
        );
    }

    fn persist_onboarding_progress(&self, state: &GuidanceState) {
        self.writer.set(
            keys::ONBOARDING_STEP_INDEX,
            state.onboarding.step_index().to_string(),
        );
        self.writer.set(
            keys::ONBOARDING_SELECTED_VALUES,
            encode_string_list(state.onboarding.selected_values()),
        );
    }

    fn onboarding_finished(&self, skipped: bool) {
        self.writer.remove(keys::ONBOARDING_STEP_INDEX);
        self.writer.remove(keys::ONBOARDING_SELECTED_VALUES);
        self.writer.set(keys::ONBOARDING_COMPLETED, "true".to_string());
        info!(skipped, "Onboarding completed");
        self.emit(GuidanceEvent::OnboardingCompleted { skipped });
    }
}
