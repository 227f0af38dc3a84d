//! Events the guidance core emits to the rest of the app.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::onboarding::OnboardingStep;

/// Something observable changed in guidance state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GuidanceEvent {
    HintShown { hint_id: String, route: String },
    HintHidden { hint_id: String },
    HintDismissed { hint_id: String },
    /// All dismissals were cleared.
    HintsReset,
    TutorialStarted { tutorial_id: String },
    TutorialStepChanged { tutorial_id: String, step: usize },
    TutorialCompleted { tutorial_id: String },
    TutorialAbandoned { tutorial_id: String, step: usize },
    OnboardingStepChanged { step: OnboardingStep },
    /// The wizard finished. The host decides what happens next.
    OnboardingCompleted { skipped: bool },
    OnboardingRestarted,
}

/// An event with the time it happened.
#[derive(Debug, Clone, Serialize)]
pub struct TimedEvent {
    #[serde(flatten)]
    pub event: GuidanceEvent,
    pub at: DateTime<Utc>,
}

impl TimedEvent {
    pub fn now(event: GuidanceEvent) -> Self {
        Self {
            event,
            at: Utc::now(),
        }
    }
}
