//! Tutorial engine — linear step player with completion tracking.
//!
//! A run moves NotStarted → InProgress(step) → Completed. Closing a run
//! before completing it (abandon) returns to NotStarted and leaves the
//! completion set untouched. A tutorial only starts once every prerequisite
//! is completed.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Catalog, Tutorial, TutorialStep};
use crate::error::GuidanceError;

/// The tutorial currently being played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTutorial {
    pub tutorial: Tutorial,
    /// Always `< tutorial.steps.len()`.
    pub step: usize,
}

impl ActiveTutorial {
    pub fn current_step(&self) -> &TutorialStep {
        &self.tutorial.steps[self.step]
    }

    pub fn is_last_step(&self) -> bool {
        self.step == self.tutorial.last_step_index()
    }
}

/// Where a tutorial stands for this profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TutorialStatus {
    /// Prerequisites are not all completed yet.
    Locked { missing: Vec<String> },
    Available,
    InProgress { step: usize },
    Completed,
}

/// Active run slot plus the persisted completion set.
#[derive(Debug, Clone, Default)]
pub struct TutorialEngine {
    active: Option<ActiveTutorial>,
    completed: BTreeSet<String>,
}

impl TutorialEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted completions. No tutorial is active.
    pub fn hydrate<I>(completed: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            active: None,
            completed: completed.into_iter().collect(),
        }
    }

    pub fn active(&self) -> Option<&ActiveTutorial> {
        self.active.as_ref()
    }

    /// Current step index, 0 when nothing is active.
    pub fn active_step_index(&self) -> usize {
        self.active.as_ref().map(|a| a.step).unwrap_or(0)
    }

    pub fn completed(&self) -> &BTreeSet<String> {
        &self.completed
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.completed.contains(id)
    }

    /// Prerequisites of `tutorial` that are not completed yet.
    pub fn missing_prerequisites(&self, tutorial: &Tutorial) -> Vec<String> {
        tutorial
            .prerequisites
            .iter()
            .filter(|p| !self.is_completed(p))
            .cloned()
            .collect()
    }

    /// Status of `id`, or `None` if the catalog doesn't know it.
    pub fn status(&self, catalog: &Catalog, id: &str) -> Option<TutorialStatus> {
        let tutorial = catalog.tutorial(id)?;
        if let Some(active) = self.active.as_ref().filter(|a| a.tutorial.id == id) {
            return Some(TutorialStatus::InProgress { step: active.step });
        }
        if self.is_completed(id) {
            return Some(TutorialStatus::Completed);
        }
        let missing = self.missing_prerequisites(tutorial);
        if missing.is_empty() {
            Some(TutorialStatus::Available)
        } else {
            Some(TutorialStatus::Locked { missing })
        }
    }

    /// Start `id` at step 0, replacing any active run.
    ///
    /// Refuses unknown ids and tutorials whose prerequisites are incomplete.
    /// Completed tutorials may be replayed.
    pub fn start(&mut self, catalog: &Catalog, id: &str) -> bool {
        let Some(tutorial) = catalog.tutorial(id) else {
            debug!(error = %GuidanceError::unknown_tutorial(id), "Ignoring start");
            return false;
        };

        let missing = self.missing_prerequisites(tutorial);
        if !missing.is_empty() {
            let err = GuidanceError::gate(
                format!("tutorial {id}"),
                format!("missing prerequisites: {}", missing.join(", ")),
            );
            debug!(error = %err, "Refusing to start tutorial");
            return false;
        }

        self.active = Some(ActiveTutorial {
            tutorial: tutorial.clone(),
            step: 0,
        });
        true
    }

    /// Advance one step. No-op on the last step; completing is a separate
    /// action.
    pub fn next_step(&mut self) -> bool {
        match self.active.as_mut() {
            Some(active) if !active.is_last_step() => {
                active.step += 1;
                true
            }
            _ => false,
        }
    }

    /// Go back one step, floored at 0.
    pub fn previous_step(&mut self) -> bool {
        match self.active.as_mut() {
            Some(active) if active.step > 0 => {
                active.step -= 1;
                true
            }
            _ => false,
        }
    }

    /// Mark `id` completed and close the active run.
    ///
    /// `id` does not have to be the active tutorial: completing another id
    /// marks it done out of band and still closes whatever run is open.
    /// Unknown ids are ignored. Returns true if `id` was newly completed.
    pub fn complete(&mut self, catalog: &Catalog, id: &str) -> bool {
        if catalog.tutorial(id).is_none() {
            debug!(error = %GuidanceError::unknown_tutorial(id), "Ignoring complete");
            return false;
        }
        if let Some(active) = self.active.take() {
            if active.tutorial.id != id {
                debug!(
                    active = %active.tutorial.id,
                    completed = %id,
                    "Completing a tutorial other than the active one"
                );
            }
        }
        self.completed.insert(id.to_string())
    }

    /// Close the active run without completing it.
    pub fn abandon(&mut self) -> Option<ActiveTutorial> {
        self.active.take()
    }

    /// Forget every completion and close any run.
    pub fn reset_completed(&mut self) -> bool {
        self.active = None;
        let changed = !self.completed.is_empty();
        self.completed.clear();
        changed
    }
}
