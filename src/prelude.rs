//! Convenience re-exports for building visualizers on top of the field engine.

pub use crate::config::FieldConfig;
pub use crate::constants::*;
pub use crate::contours::{
    build_potential_grid, choose_levels, equipotentials, extract_contours, Contour, ContourParams, LevelContours,
    PotentialGrid,
};
pub use crate::errors::FieldError;
pub use crate::fields::{
    display_radius, field_at, format_charge, potential_at, trace_field_lines, Charge, ChargeId, FieldLine,
    FieldLineTracer, RadiusScale, Termination, TracerParams,
};
pub use crate::force::{coulomb_force, format_force, CoulombForce, Interaction};
pub use crate::math::{distance, normalize_or_zero, R2, Scalar};
pub use crate::presets::{ChargeSpec, Preset};
pub use crate::scene::{FrameGeometry, Scene};
pub use crate::simulation::{net_force, net_force_scaled, DynamicsParams, ElectrostaticDynamics};
pub use crate::vectors::{sample_vector_field, FieldSample, VectorFieldSampler, VectorParams};
pub use crate::view::{Camera, ViewSettings};
