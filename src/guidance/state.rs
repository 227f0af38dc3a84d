//! Composed guidance state and its read-only snapshot.

use serde::Serialize;

use super::trigger::RouteTrigger;
use crate::catalog::{Hint, Tutorial};
use crate::hints::HintEngine;
use crate::onboarding::{OnboardingStep, OnboardingWizard};
use crate::store::WriteBehind;
use crate::store::codec::{decode_flag, decode_index, decode_string_list};
use crate::store::keys;
use crate::tutorials::TutorialEngine;

/// Everything the facade mutates, held behind one lock.
#[derive(Debug, Default)]
pub struct GuidanceState {
    pub hints: HintEngine,
    pub tutorials: TutorialEngine,
    pub onboarding: OnboardingWizard,
    /// Route most recently reported by the host navigation.
    pub current_route: Option<String>,
    pub(crate) trigger: RouteTrigger,
}

impl GuidanceState {
    /// Load persisted fields. Transient fields start empty.
    pub async fn hydrate(writer: &WriteBehind) -> Self {
        let dismissed = writer.get(keys::HINTS_DISMISSED_IDS).await;
        let completed = writer.get(keys::TUTORIALS_COMPLETED_IDS).await;
        let step = writer.get(keys::ONBOARDING_STEP_INDEX).await;
        let values = writer.get(keys::ONBOARDING_SELECTED_VALUES).await;
        let finished = writer.get(keys::ONBOARDING_COMPLETED).await;

        Self {
            hints: HintEngine::hydrate(decode_string_list(
                keys::HINTS_DISMISSED_IDS,
                dismissed.as_deref(),
            )),
            tutorials: TutorialEngine::hydrate(decode_string_list(
                keys::TUTORIALS_COMPLETED_IDS,
                completed.as_deref(),
            )),
            onboarding: OnboardingWizard::hydrate(
                decode_index(
                    keys::ONBOARDING_STEP_INDEX,
                    step.as_deref(),
                    OnboardingStep::LAST_INDEX,
                ),
                decode_string_list(keys::ONBOARDING_SELECTED_VALUES, values.as_deref()),
                decode_flag(finished.as_deref()),
            ),
            current_route: None,
            trigger: RouteTrigger::new(),
        }
    }

    pub fn snapshot(&self) -> GuidanceSnapshot {
        let active = self.tutorials.active();
        GuidanceSnapshot {
            active_hint: self.hints.active().cloned(),
            dismissed_hint_ids: self.hints.dismissed().iter().cloned().collect(),
            active_tutorial: active.map(|a| a.tutorial.clone()),
            active_step_index: self.tutorials.active_step_index(),
            active_step_is_last: active.map(|a| a.is_last_step()).unwrap_or(false),
            completed_tutorial_ids: self.tutorials.completed().iter().cloned().collect(),
            onboarding_step_index: self.onboarding.step_index(),
            onboarding_step: self.onboarding.step(),
            onboarding_selected_values: self.onboarding.selected_values().to_vec(),
            onboarding_completed: self.onboarding.is_completed(),
            onboarding_can_advance: self.onboarding.can_advance(),
            current_route: self.current_route.clone(),
        }
    }
}

/// Read-only view of guidance state for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceSnapshot {
    pub active_hint: Option<Hint>,
    pub dismissed_hint_ids: Vec<String>,
    pub active_tutorial: Option<Tutorial>,
    pub active_step_index: usize,
    pub active_step_is_last: bool,
    pub completed_tutorial_ids: Vec<String>,
    pub onboarding_step_index: usize,
    pub onboarding_step: OnboardingStep,
    pub onboarding_selected_values: Vec<String>,
    pub onboarding_completed: bool,
    pub onboarding_can_advance: bool,
    pub current_route: Option<String>,
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn hydrates_fresh_profile_to_defaults() {
        let writer = WriteBehind::spawn(Arc::new(MemoryStore::new()));
        let state = GuidanceState::hydrate(&writer).await;
        let snapshot = state.snapshot();

        assert!(snapshot.active_hint.is_none());
        assert!(snapshot.dismissed_hint_ids.is_empty());
        assert!(snapshot.active_tutorial.is_none());
        assert_eq!(snapshot.active_step_index, 0);
        assert_eq!(snapshot.onboarding_step_index, 0);
        assert!(!snapshot.onboarding_completed);
    }

    #[tokio::test]
    async fn hydrates_persisted_fields() {
        let store = MemoryStore::with_entries([
            (keys::HINTS_DISMISSED_IDS, r#"["dashboard-welcome"]"#),
            (keys::TUTORIALS_COMPLETED_IDS, r#"["getting-started"]"#),
            (keys::ONBOARDING_STEP_INDEX, "2"),
            (keys::ONBOARDING_SELECTED_VALUES, r#"["growth","balance"]"#),
        ]);
        let writer = WriteBehind::spawn(Arc::new(store));
        let snapshot = GuidanceState::hydrate(&writer).await.snapshot();

        assert_eq!(snapshot.dismissed_hint_ids, vec!["dashboard-welcome"]);
        assert_eq!(snapshot.completed_tutorial_ids, vec!["getting-started"]);
        assert_eq!(snapshot.onboarding_step_index, 2);
        assert_eq!(snapshot.onboarding_step, OnboardingStep::Values);
        assert_eq!(snapshot.onboarding_selected_values, vec!["growth", "balance"]);
        assert!(!snapshot.onboarding_can_advance);
    }

    #[tokio::test]
    async fn corrupt_values_degrade_to_defaults() {
        let store = MemoryStore::with_entries([
            (keys::HINTS_DISMISSED_IDS, "not json"),
            (keys::ONBOARDING_STEP_INDEX, "9"),
            (keys::ONBOARDING_SELECTED_VALUES, "{}"),
        ]);
        let writer = WriteBehind::spawn(Arc::new(store));
        let snapshot = GuidanceState::hydrate(&writer).await.snapshot();

        assert!(snapshot.dismissed_hint_ids.is_empty());
        assert_eq!(snapshot.onboarding_step_index, 0);
        assert!(snapshot.onboarding_selected_values.is_empty());
    }

    #[test]
    fn snapshot_uses_camel_case() {
        let json = serde_json::to_value(GuidanceState::default().snapshot()).unwrap();
        assert!(json.get("activeHint").is_some());
        assert!(json.get("dismissedHintIds").is_some());
        assert_eq!(json["onboardingStep"], "welcome");
    }
}
