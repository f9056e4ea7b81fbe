//! Shared error types used across submodules.
//!
//! Field, contour and vector computations are total and never fail; these errors only
//! come from configuration loading and from scene-level lookups.

use thiserror::Error;

use crate::fields::ChargeId;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Raised when a tunable is out of its valid range.
    #[error("configuration error: {0}")]
    InvalidConfig(String),
    /// Raised when a configuration file cannot be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// Raised when configuration text is not valid TOML for [`crate::config::FieldConfig`].
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    /// Raised when no charge with the given id exists in the scene.
    #[error("charge {0} not found")]
    UnknownCharge(ChargeId),
    /// Raised when a preset name is not recognised.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
    /// Raised when the force inspector is asked for a charge against itself.
    #[error("select two different charges (got {0} twice)")]
    SameCharge(ChargeId),
}
