//! Hint catalog — the fixed set of hints and tutorials the engine can show.
//!
//! Catalog data is immutable once built. Insertion order is significant: it is
//! the tie-break when several hints compete for the same route.

pub mod builtin;
pub mod model;

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::CatalogError;

pub use builtin::builtin_catalog;
pub use model::{Hint, HintCategory, HintPosition, HintPriority, Tutorial, TutorialStep};

/// On-disk catalog layout.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    hints: Vec<Hint>,
    #[serde(default)]
    tutorials: Vec<Tutorial>,
}

/// Validated, indexed set of hints and tutorials.
#[derive(Debug, Clone)]
pub struct Catalog {
    hints: Vec<Hint>,
    tutorials: Vec<Tutorial>,
    hint_index: HashMap<String, usize>,
    tutorial_index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids, empty tutorials and
    /// prerequisites that name unknown tutorials.
    pub fn new(hints: Vec<Hint>, tutorials: Vec<Tutorial>) -> Result<Self, CatalogError> {
        let mut hint_index = HashMap::with_capacity(hints.len());
        for (i, hint) in hints.iter().enumerate() {
            if hint_index.insert(hint.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateHint(hint.id.clone()));
            }
        }

        let mut tutorial_index = HashMap::with_capacity(tutorials.len());
        for (i, tutorial) in tutorials.iter().enumerate() {
            if tutorial.steps.is_empty() {
                return Err(CatalogError::EmptyTutorial(tutorial.id.clone()));
            }
            if tutorial_index.insert(tutorial.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateTutorial(tutorial.id.clone()));
            }
        }

        for tutorial in &tutorials {
            if let Some(missing) = tutorial
                .prerequisites
                .iter()
                .find(|p| !tutorial_index.contains_key(p.as_str()))
            {
                return Err(CatalogError::UnknownPrerequisite {
                    tutorial: tutorial.id.clone(),
                    prerequisite: missing.clone(),
                });
            }
        }

        Ok(Self {
            hints,
            tutorials,
            hint_index,
            tutorial_index,
        })
    }

    /// Parse a catalog from JSON (`{"hints": [...], "tutorials": [...]}`).
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.hints, file.tutorials)
    }

    /// Load a JSON catalog from disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn hint(&self, id: &str) -> Option<&Hint> {
        self.hint_index.get(id).map(|&i| &self.hints[i])
    }

    pub fn tutorial(&self, id: &str) -> Option<&Tutorial> {
        self.tutorial_index.get(id).map(|&i| &self.tutorials[i])
    }

    /// All hints in catalog order.
    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    /// All tutorials in catalog order.
    pub fn tutorials(&self) -> &[Tutorial] {
        &self.tutorials
    }

    /// Hints attached to `route`, in catalog order.
    pub fn hints_for_route<'a>(&'a self, route: &'a str) -> impl Iterator<Item = &'a Hint> + 'a {
        self.hints.iter().filter(move |h| h.route == route)
    }
}
