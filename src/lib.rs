#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Physical constants, display constants and default tunables.
pub mod constants;
/// Shared two-dimensional vector helpers.
pub mod math;
/// Point charges, superposed fields and field-line tracing.
pub mod fields;
/// Potential grids and marching-squares equipotential extraction.
pub mod contours;
/// Lattice sampling of the field for arrow rendering.
pub mod vectors;
/// SI Coulomb force between two charges, as shown by the force inspector.
pub mod force;
/// Simplified N-body electrostatic dynamics.
pub mod simulation;
/// Named starting layouts of charges.
pub mod presets;
/// Camera transform and feature toggles owned by the presentation layer.
pub mod view;
/// Explicit application state tying charges, view and dynamics together.
pub mod scene;
/// Tunable parameters and TOML loading.
pub mod config;
/// Error types for the fallible edges of the crate.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
