//! Guidance engine — contextual hints, guided tutorials and first-run
//! onboarding over a per-profile key/value store.

pub mod catalog;
pub mod config;
pub mod error;
pub mod guidance;
pub mod hints;
pub mod onboarding;
pub mod store;
pub mod tutorials;
