//! Built-in hints and tutorials shipped with the app.

use super::Catalog;
use super::model::{Hint, HintCategory, HintPosition, HintPriority, Tutorial, TutorialStep};
use crate::error::CatalogError;

fn hint(
    id: &str,
    route: &str,
    priority: HintPriority,
    category: HintCategory,
    position: HintPosition,
    title: &str,
    body: &str,
) -> Hint {
    Hint {
        id: id.to_string(),
        title: title.to_string(),
        body: body.to_string(),
        route: route.to_string(),
        position,
        priority,
        category,
    }
}

fn step(title: &str, body: &str, target: Option<&str>) -> TutorialStep {
    TutorialStep {
        title: title.to_string(),
        body: body.to_string(),
        target_element: target.map(String::from),
    }
}

/// The default catalog.
pub fn builtin_catalog() -> Result<Catalog, CatalogError> {
    use HintCategory::{Feature, Navigation, Tip};
    use HintPosition::*;
    use HintPriority::*;

    let hints = vec![
        hint(
            "dashboard-growth-phase",
            "/dashboard",
            Medium,
            Feature,
            Right,
            "Your growth phase",
            "This card shows where you are in your journey. It updates as you reflect.",
        ),
        hint(
            "dashboard-welcome",
            "/dashboard",
            High,
            Navigation,
            Center,
            "Welcome to your dashboard",
            "Everything you need each day lives here. Start with today's check-in.",
        ),
        hint(
            "dashboard-streak",
            "/dashboard",
            Low,
            Tip,
            Bottom,
            "Keep your streak",
            "A short check-in every day keeps your streak going.",
        ),
        hint(
            "chat-first-message",
            "/chat",
            High,
            Feature,
            Top,
            "Talk it through",
            "Ask anything. Your guide remembers context from earlier conversations.",
        ),
        hint(
            "chat-saved-insights",
            "/chat",
            Low,
            Tip,
            Right,
            "Save what resonates",
            "Tap the bookmark on any reply to keep it in your insights.",
        ),
        hint(
            "community-circles",
            "/community",
            Medium,
            Feature,
            Top,
            "Find your circle",
            "Circles are small groups working on similar goals.",
        ),
        hint(
            "journal-prompts",
            "/journal",
            Medium,
            Tip,
            Left,
            "Need a nudge?",
            "Use a prompt when you are not sure what to write.",
        ),
        hint(
            "settings-tutorials",
            "/settings",
            Low,
            HintCategory::Tutorial,
            Bottom,
            "Replay the tours",
            "You can restart any tutorial from here.",
        ),
    ];

    let tutorials = vec![
        Tutorial {
            id: "getting-started".to_string(),
            title: "Getting started".to_string(),
            description: "A quick tour of the essentials.".to_string(),
            category: "basics".to_string(),
            steps: vec![
                step(
                    "Your dashboard",
                    "This is home. Your daily check-in and progress live here.",
                    Some("dashboard"),
                ),
                step(
                    "Navigation",
                    "Use the sidebar to move between chat, journal and community.",
                    Some("sidebar"),
                ),
                step(
                    "Your guide",
                    "Open chat any time to talk with your guide.",
                    Some("nav-chat"),
                ),
            ],
            prerequisites: Vec::new(),
        },
        Tutorial {
            id: "chat-basics".to_string(),
            title: "Chatting with your guide".to_string(),
            description: "Get more out of every conversation.".to_string(),
            category: "chat".to_string(),
            steps: vec![
                step(
                    "Start a conversation",
                    "Type in the box below and press enter.",
                    Some("chat-input"),
                ),
                step(
                    "Suggested prompts",
                    "Not sure where to begin? Pick one of the suggestions.",
                    Some("chat-suggestions"),
                ),
                step(
                    "Saving insights",
                    "Bookmark replies you want to come back to.",
                    None,
                ),
            ],
            prerequisites: vec!["getting-started".to_string()],
        },
        Tutorial {
            id: "growth-tracking".to_string(),
            title: "Tracking your growth".to_string(),
            description: "Understand the charts on your dashboard.".to_string(),
            category: "dashboard".to_string(),
            steps: vec![
                step(
                    "Growth phase",
                    "Your phase reflects recent check-ins and reflections.",
                    Some("growth-phase-card"),
                ),
                step(
                    "Trends",
                    "The trend line shows how your mood has moved this month.",
                    Some("trend-chart"),
                ),
            ],
            prerequisites: vec!["getting-started".to_string()],
        },
        Tutorial {
            id: "community-circles".to_string(),
            title: "Joining a circle".to_string(),
            description: "Meet people on a similar path.".to_string(),
            category: "community".to_string(),
            steps: vec![
                step(
                    "Browse circles",
                    "Circles are grouped by theme.",
                    Some("circle-list"),
                ),
                step("Join", "Tap join to introduce yourself.", Some("circle-join")),
            ],
            prerequisites: vec!["chat-basics".to_string()],
        },
    ];

    Catalog::new(hints, tutorials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_has_exactly_one_high_priority_hint() {
        let catalog = builtin_catalog().unwrap();
        let high: Vec<&str> = catalog
            .hints_for_route("/dashboard")
            .filter(|h| h.priority == HintPriority::High)
            .map(|h| h.id.as_str())
            .collect();
        assert_eq!(high, vec!["dashboard-welcome"]);
    }

    #[test]
    fn tutorial_chain_is_gated() {
        let catalog = builtin_catalog().unwrap();
        assert!(catalog.tutorial("getting-started").unwrap().prerequisites.is_empty());
        assert_eq!(
            catalog.tutorial("community-circles").unwrap().prerequisites,
            vec!["chat-basics"]
        );
    }
}
