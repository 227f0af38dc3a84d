//! Onboarding content: the value palette and per-step copy.

use serde::Serialize;

use super::state::OnboardingStep;

/// Tags a user can pick from on the values step.
pub const VALUE_PALETTE: &[&str] = &[
    "growth",
    "balance",
    "connection",
    "creativity",
    "purpose",
    "resilience",
    "mindfulness",
    "authenticity",
    "courage",
    "gratitude",
];

pub fn is_palette_value(tag: &str) -> bool {
    VALUE_PALETTE.contains(&tag)
}

/// Display copy for a wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepInfo {
    pub step: OnboardingStep,
    pub index: usize,
    pub title: &'static str,
    pub description: &'static str,
}

impl OnboardingStep {
    pub fn info(&self) -> StepInfo {
        let (title, description) = match self {
            Self::Welcome => (
                "Welcome",
                "A few quick questions so your guide can meet you where you are.",
            ),
            Self::Intentions => (
                "Your intentions",
                "What brought you here? There are no wrong answers.",
            ),
            Self::Values => (
                "Your values",
                "Pick the three values that matter most to you right now.",
            ),
            Self::Rhythm => (
                "Your rhythm",
                "Choose when you'd like to check in each day.",
            ),
            Self::Complete => (
                "You're all set",
                "Your dashboard is ready. Your guide will take it from here.",
            ),
        };
        StepInfo {
            step: *self,
            index: self.index(),
            title,
            description,
        }
    }
}
