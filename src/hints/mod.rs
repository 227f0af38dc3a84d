//! Hint engine — picks which hint a route surfaces and tracks dismissals.
//!
//! Dismissal is permanent for the profile: a dismissed id never becomes the
//! active hint again, whatever route or caller asks for it.

use std::collections::BTreeSet;

use tracing::debug;

use crate::catalog::{Catalog, Hint, HintPriority};
use crate::error::GuidanceError;

/// Active hint slot plus the persisted dismissal set.
#[derive(Debug, Clone, Default)]
pub struct HintEngine {
    active: Option<Hint>,
    dismissed: BTreeSet<String>,
}

impl HintEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted dismissals. The active slot starts empty.
    pub fn hydrate<I>(dismissed: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            active: None,
            dismissed: dismissed.into_iter().collect(),
        }
    }

    pub fn active(&self) -> Option<&Hint> {
        self.active.as_ref()
    }

    pub fn dismissed(&self) -> &BTreeSet<String> {
        &self.dismissed
    }

    pub fn is_dismissed(&self, id: &str) -> bool {
        self.dismissed.contains(id)
    }

    /// Make `id` the active hint. Returns false for unknown or dismissed ids.
    pub fn show(&mut self, catalog: &Catalog, id: &str) -> bool {
        let Some(hint) = catalog.hint(id) else {
            debug!(error = %GuidanceError::unknown_hint(id), "Ignoring show");
            return false;
        };
        if self.is_dismissed(id) {
            debug!(hint_id = %id, "Hint was dismissed, not showing");
            return false;
        }
        self.active = Some(hint.clone());
        true
    }

    /// Clear the active hint without dismissing it.
    pub fn hide(&mut self) -> Option<Hint> {
        self.active.take()
    }

    /// Permanently suppress `id`. Returns true if the dismissal set changed.
    ///
    /// Clears the active slot when it holds `id`. Unknown ids are ignored.
    pub fn dismiss(&mut self, catalog: &Catalog, id: &str) -> bool {
        if catalog.hint(id).is_none() {
            debug!(error = %GuidanceError::unknown_hint(id), "Ignoring dismiss");
            return false;
        }
        if self.active.as_ref().is_some_and(|h| h.id == id) {
            self.active = None;
        }
        self.dismissed.insert(id.to_string())
    }

    /// Forget every dismissal. Returns true if anything was dismissed.
    pub fn reset_dismissed(&mut self) -> bool {
        let changed = !self.dismissed.is_empty();
        self.dismissed.clear();
        changed
    }

    /// Hints for `route` that are not dismissed, in catalog order.
    pub fn eligible_for_route<'a>(&'a self, catalog: &'a Catalog, route: &'a str) -> Vec<&'a Hint> {
        catalog
            .hints_for_route(route)
            .filter(|h| !self.is_dismissed(&h.id))
            .collect()
    }

    /// The hint a route should surface: the first eligible high-priority
    /// hint, otherwise the first eligible hint, in catalog order.
    pub fn select_for_route<'a>(&'a self, catalog: &'a Catalog, route: &'a str) -> Option<&'a Hint> {
        let eligible = self.eligible_for_route(catalog, route);
        eligible
            .iter()
            .find(|h| h.priority == HintPriority::High)
            .or_else(|| eligible.first())
            .copied()
    }
}
