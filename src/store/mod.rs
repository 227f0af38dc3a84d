//! Persistence layer — profile-scoped key/value storage for guidance state.

pub mod codec;
pub mod libsql_backend;
pub mod memory;
pub mod migrations;
pub mod traits;
pub mod write_behind;

pub use libsql_backend::LibSqlStore;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;
pub use write_behind::WriteBehind;

/// Keys guidance state is persisted under.
pub mod keys {
    /// Current wizard step, an integer 0–4.
    pub const ONBOARDING_STEP_INDEX: &str = "onboarding.stepIndex";
    /// JSON array of up to 3 selected value tags.
    pub const ONBOARDING_SELECTED_VALUES: &str = "onboarding.selectedValues";
    /// `true` once the wizard was finished or skipped.
    pub const ONBOARDING_COMPLETED: &str = "onboarding.completed";
    /// JSON array of dismissed hint ids.
    pub const HINTS_DISMISSED_IDS: &str = "hints.dismissedIds";
    /// JSON array of completed tutorial ids.
    pub const TUTORIALS_COMPLETED_IDS: &str = "tutorials.completedIds";
}
