//! Guidance core — the facade the rest of the app talks to.
//!
//! `GuidanceFacade` is constructed once per session and injected wherever
//! guidance is needed. It owns the composed `GuidanceState`, the write-behind
//! store, the route trigger and the event channel.

pub mod events;
pub mod facade;
pub mod routes;
pub mod state;
pub mod trigger;

pub use events::{GuidanceEvent, TimedEvent};
pub use facade::{GuidanceFacade, TutorialOverview};
pub use routes::{GuidanceRouteState, guidance_routes};
pub use state::{GuidanceSnapshot, GuidanceState};
pub use trigger::{RouteTrigger, TriggerId};
