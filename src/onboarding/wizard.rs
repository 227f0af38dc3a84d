//! OnboardingWizard — drives the five-step first-run flow.
//!
//! The only conditional transition is the values gate: `next()` on the values
//! step moves forward only with exactly three tags selected. `next()` on the
//! last step finishes the wizard. Once finished (or skipped) the wizard stays
//! done for the profile until it is explicitly restarted.

use tracing::debug;

use super::model::is_palette_value;
use super::state::{OnboardingState, OnboardingStep, REQUIRED_VALUE_COUNT};
use crate::error::GuidanceError;

/// Result of calling `next()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to this step.
    Moved(OnboardingStep),
    /// The values gate is not satisfied.
    Blocked,
    /// `next()` on the last step finished the wizard.
    Finished,
    /// The wizard was already completed.
    Inactive,
}

/// First-run wizard over an `OnboardingState`.
#[derive(Debug, Clone, Default)]
pub struct OnboardingWizard {
    state: OnboardingState,
}

impl OnboardingWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted progress.
    ///
    /// Persisted values are restored in order with duplicates dropped and at
    /// most three kept. They are not re-checked against the palette. A
    /// completed wizard starts from a clean slate.
    pub fn hydrate(step_index: Option<usize>, selected_values: Vec<String>, completed: bool) -> Self {
        if completed {
            return Self {
                state: OnboardingState {
                    completed: true,
                    ..Default::default()
                },
            };
        }

        let step = step_index
            .and_then(OnboardingStep::from_index)
            .unwrap_or_default();

        let mut values: Vec<String> = Vec::with_capacity(REQUIRED_VALUE_COUNT);
        for tag in selected_values {
            if values.len() == REQUIRED_VALUE_COUNT {
                break;
            }
            if !values.contains(&tag) {
                values.push(tag);
            }
        }

        Self {
            state: OnboardingState {
                step,
                selected_values: values,
                completed: false,
            },
        }
    }

    pub fn state(&self) -> &OnboardingState {
        &self.state
    }

    pub fn step(&self) -> OnboardingStep {
        self.state.step
    }

    pub fn step_index(&self) -> usize {
        self.state.step.index()
    }

    pub fn selected_values(&self) -> &[String] {
        &self.state.selected_values
    }

    pub fn is_completed(&self) -> bool {
        self.state.completed
    }

    /// Whether the Next control should be enabled.
    pub fn can_advance(&self) -> bool {
        !self.state.completed && self.state.gate_satisfied()
    }

    /// Advance one step, respecting the values gate.
    pub fn next(&mut self) -> Advance {
        if self.state.completed {
            return Advance::Inactive;
        }
        if !self.state.gate_satisfied() {
            let err = GuidanceError::gate(
                self.state.step.to_string(),
                format!(
                    "{} of {} values selected",
                    self.state.selected_values.len(),
                    REQUIRED_VALUE_COUNT
                ),
            );
            debug!(error = %err, "Refusing to advance onboarding");
            return Advance::Blocked;
        }
        if self.state.step.is_terminal() {
            self.finish();
            return Advance::Finished;
        }
        if let Some(next) = self.state.step.next() {
            self.state.step = next;
        }
        Advance::Moved(self.state.step)
    }

    /// Go back one step, floored at the first. Returns true if it moved.
    pub fn previous(&mut self) -> bool {
        if self.state.completed {
            return false;
        }
        match self.state.step.previous() {
            Some(previous) => {
                self.state.step = previous;
                true
            }
            None => false,
        }
    }

    /// Select or deselect a value tag.
    ///
    /// Selected tags are removed. New tags are added only while fewer than
    /// three are selected and only if they belong to the palette. Returns true
    /// if the selection changed.
    pub fn toggle_value(&mut self, tag: &str) -> bool {
        if self.state.completed {
            return false;
        }
        let values = &mut self.state.selected_values;
        if let Some(pos) = values.iter().position(|v| v == tag) {
            values.remove(pos);
            return true;
        }
        if !is_palette_value(tag) {
            debug!(tag = %tag, "Ignoring tag outside the value palette");
            return false;
        }
        if values.len() >= REQUIRED_VALUE_COUNT {
            debug!(tag = %tag, "Already {REQUIRED_VALUE_COUNT} values selected");
            return false;
        }
        values.push(tag.to_string());
        true
    }

    /// Mark the wizard done and clear progress. Returns false if it was
    /// already done.
    pub fn finish(&mut self) -> bool {
        if self.state.completed {
            return false;
        }
        self.state = OnboardingState {
            completed: true,
            ..Default::default()
        };
        true
    }

    /// Finish from any step. Confirmation is the caller's job.
    pub fn skip(&mut self) -> bool {
        self.finish()
    }

    /// Start over from the first step with nothing selected.
    pub fn restart(&mut self) {
        self.state = OnboardingState::default();
    }
}
