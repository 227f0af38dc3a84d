//! Onboarding state machine — tracks which wizard step the user is on.

use serde::{Deserialize, Serialize};

/// Number of values that must be chosen on the values step.
pub const REQUIRED_VALUE_COUNT: usize = 3;

/// The five steps of the first-run wizard.
///
/// Progresses linearly: Welcome → Intentions → Values → Rhythm → Complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    #[default]
    Welcome,
    Intentions,
    /// Gated: exactly `REQUIRED_VALUE_COUNT` values must be selected.
    Values,
    Rhythm,
    Complete,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 5] = [
        Self::Welcome,
        Self::Intentions,
        Self::Values,
        Self::Rhythm,
        Self::Complete,
    ];

    /// Highest step index.
    pub const LAST_INDEX: usize = 4;

    pub fn index(&self) -> usize {
        match self {
            Self::Welcome => 0,
            Self::Intentions => 1,
            Self::Values => 2,
            Self::Rhythm => 3,
            Self::Complete => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Whether this is the final step.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Whether advancing from this step depends on the value selection.
    pub fn is_gated(&self) -> bool {
        matches!(self, Self::Values)
    }

    pub fn next(&self) -> Option<OnboardingStep> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(&self) -> Option<OnboardingStep> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }
}

impl std::fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Welcome => "welcome",
            Self::Intentions => "intentions",
            Self::Values => "values",
            Self::Rhythm => "rhythm",
            Self::Complete => "complete",
        };
        write!(f, "{s}")
    }
}

/// Persisted onboarding progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingState {
    pub step: OnboardingStep,
    /// Selected value tags in selection order, at most `REQUIRED_VALUE_COUNT`.
    pub selected_values: Vec<String>,
    /// Set once the wizard is finished or skipped.
    pub completed: bool,
}

impl OnboardingState {
    /// Whether `next()` would move forward from the current step.
    pub fn gate_satisfied(&self) -> bool {
        !self.step.is_gated() || self.selected_values.len() == REQUIRED_VALUE_COUNT
    }
}
