//! Error types for the KITH core library.
//!
//! The relationship engine itself never fails: lookups return `Option` and
//! numeric inputs are clamped. Errors only surface from configuration
//! loading and from the orchestration helpers in [`crate::creature`].

use thiserror::Error;

use crate::types::CreatureId;

/// Top-level error type for all KITH operations.
#[derive(Error, Debug)]
pub enum KithError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A creature with the given ID is not registered.
    #[error("Creature not found: {0}")]
    CreatureNotFound(CreatureId),

    /// A creature was asked to form a bond with itself.
    #[error("Creature {0} cannot hold a relationship with itself")]
    SelfRelationship(CreatureId),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for KithError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, KithError>;
