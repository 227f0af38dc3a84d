//! Hint and tutorial data models.

use serde::{Deserialize, Serialize};

/// How urgently a hint competes for the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintCategory {
    Navigation,
    Feature,
    Tip,
    Tutorial,
}

/// Where the hint bubble anchors relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HintPosition {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
    Center,
}

/// A short, dismissible, route-scoped guidance message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub id: String,
    pub title: String,
    pub body: String,
    /// Route the hint belongs to, matched exactly against the current path.
    pub route: String,
    #[serde(default)]
    pub position: HintPosition,
    pub priority: HintPriority,
    pub category: HintCategory,
}

/// One step of a tutorial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorialStep {
    pub title: String,
    pub body: String,
    /// UI element the step points at, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_element: Option<String>,
}

/// A named, ordered sequence of instructional steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tutorial {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub steps: Vec<TutorialStep>,
    /// Tutorials that must be completed before this one can start.
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

impl Tutorial {
    /// Index of the final step.
    pub fn last_step_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_uses_lowercase_names() {
        let json = serde_json::to_value([HintPriority::Low, HintPriority::High]).unwrap();
        assert_eq!(json, serde_json::json!(["low", "high"]));
        assert!(serde_json::from_str::<HintPriority>(r#""urgent""#).is_err());
    }

    #[test]
    fn hint_position_defaults_when_missing() {
        let hint: Hint = serde_json::from_str(
            r#"{
                "id": "h1",
                "title": "Title",
                "body": "Body",
                "route": "/dashboard",
                "priority": "high",
                "category": "navigation"
            }"#,
        )
        .unwrap();
        assert_eq!(hint.position, HintPosition::Bottom);
        assert_eq!(hint.priority, HintPriority::High);
    }

    #[test]
    fn tutorial_step_uses_camel_case_target() {
        let step: TutorialStep =
            serde_json::from_str(r#"{"title": "t", "body": "b", "targetElement": "chat-input"}"#)
                .unwrap();
        assert_eq!(step.target_element.as_deref(), Some("chat-input"));

        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["targetElement"], "chat-input");
    }

    #[test]
    fn prerequisites_default_to_empty() {
        let tutorial: Tutorial = serde_json::from_str(
            r#"{
                "id": "t1",
                "title": "T",
                "description": "D",
                "category": "basics",
                "steps": [{"title": "s", "body": "b"}]
            }"#,
        )
        .unwrap();
        assert!(tutorial.prerequisites.is_empty());
        assert_eq!(tutorial.last_step_index(), 0);
    }
}
