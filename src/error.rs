//! Error types for the guidance engine.
//!
//! Nothing in the engine is fatal. Store and gate failures are produced by
//! the lower layers, logged, and absorbed by `GuidanceFacade` so callers never
//! see them. Only startup (config, catalog, opening the store) propagates.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Key/value persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),
}

/// Problems found while building or loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate hint id: {0}")]
    DuplicateHint(String),

    #[error("Duplicate tutorial id: {0}")]
    DuplicateTutorial(String),

    #[error("Tutorial {0} has no steps")]
    EmptyTutorial(String),

    #[error("Tutorial {tutorial} requires unknown tutorial {prerequisite}")]
    UnknownPrerequisite {
        tutorial: String,
        prerequisite: String,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Anomalies inside the engines. Always absorbed, logged at most.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuidanceError {
    #[error("Unknown {kind} id: {id}")]
    UnknownId { kind: &'static str, id: String },

    #[error("Storage unavailable for key {key}: {reason}")]
    StorageUnavailable { key: String, reason: String },

    #[error("Gate not satisfied at {gate}: {reason}")]
    InvalidGateState { gate: String, reason: String },
}

impl GuidanceError {
    pub fn unknown_hint(id: &str) -> Self {
        Self::UnknownId {
            kind: "hint",
            id: id.to_string(),
        }
    }

    pub fn unknown_tutorial(id: &str) -> Self {
        Self::UnknownId {
            kind: "tutorial",
            id: id.to_string(),
        }
    }

    pub fn gate(gate: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidGateState {
            gate: gate.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for the engine.
pub type Result<T> = std::result::Result<T, Error>;
