//! Onboarding system — the five-step first-run wizard.
//!
//! The wizard runs once per profile unless explicitly restarted. Progress,
//! including a partial value selection, is persisted on every move so a
//! reload resumes exactly where the user left off.

pub mod model;
pub mod state;
pub mod wizard;

pub use model::{StepInfo, VALUE_PALETTE};
pub use state::{OnboardingState, OnboardingStep, REQUIRED_VALUE_COUNT};
pub use wizard::{Advance, OnboardingWizard};
