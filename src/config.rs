//! Tunable parameters for every stage, with optional TOML loading.
//!
//! All sections default to the stock visualizer constants, so a configuration file only needs
//! the values it changes:
//!
//! ```toml
//! [tracer]
//! lines_per_charge = 24
//!
//! [dynamics]
//! damping = 0.95
//! ```

use crate::contours::ContourParams;
use crate::errors::FieldError;
use crate::fields::{RadiusScale, TracerParams};
use crate::simulation::DynamicsParams;
use crate::vectors::VectorParams;

/// Aggregated tunables.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldConfig {
    /// Charge display radius mapping.
    pub radius: RadiusScale,
    /// Field-line integration.
    pub tracer: TracerParams,
    /// Equipotential grid and levels.
    pub contours: ContourParams,
    /// Vector lattice.
    pub vectors: VectorParams,
    /// N-body dynamics.
    pub dynamics: DynamicsParams,
}

impl FieldConfig {
    /// Checks every tunable against its valid range.
    pub fn validate(&self) -> Result<(), FieldError> {
        let invalid = |msg: &str| -> Result<(), FieldError> { Err(FieldError::InvalidConfig(msg.to_owned())) };

        let r = &self.radius;
        if !(r.min >= 0.0 && r.min <= r.max) {
            return invalid("radius.min must be non-negative and not exceed radius.max");
        }
        if !(r.magnitude_cap > 0.0) {
            return invalid("radius.magnitude_cap must be > 0");
        }
        if !(self.tracer.step_length > 0.0) {
            return invalid("tracer.step_length must be > 0");
        }
        if !(self.tracer.margin >= 0.0) {
            return invalid("tracer.margin must be >= 0");
        }
        if self.contours.base_resolution == 0 {
            return invalid("contours.base_resolution must be > 0");
        }
        if self.contours.moderate_above > self.contours.crowded_above {
            return invalid("contours.moderate_above must not exceed contours.crowded_above");
        }
        let v = &self.vectors;
        if !(v.base_spacing > 0.0) {
            return invalid("vectors.base_spacing must be > 0");
        }
        if !(v.moderate_factor >= 1.0 && v.crowded_factor >= v.moderate_factor) {
            return invalid("vectors coarsening factors must be >= 1 and non-decreasing");
        }
        if !(v.scale > 0.0) {
            return invalid("vectors.scale must be > 0");
        }
        if !(v.max_length_factor > 0.0) {
            return invalid("vectors.max_length_factor must be > 0");
        }
        if !(v.exclusion_margin >= 0.0) {
            return invalid("vectors.exclusion_margin must be >= 0");
        }
        if !(self.dynamics.mass > 0.0) {
            return invalid("dynamics.mass must be > 0");
        }
        if !(self.dynamics.damping > 0.0 && self.dynamics.damping <= 1.0) {
            return invalid("dynamics.damping must be in (0, 1]");
        }
        if !(self.dynamics.time_step > 0.0) {
            return invalid("dynamics.time_step must be > 0");
        }
        if !(self.dynamics.distance_scale > 0.0) {
            return invalid("dynamics.distance_scale must be > 0");
        }
        Ok(())
    }

    /// Parses and validates a TOML document.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(text: &str) -> Result<Self, FieldError> {
        let config: Self = toml::from_str(text).map_err(|e| FieldError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    #[cfg(feature = "serde")]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, FieldError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded field configuration from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Scalar;

    #[test]
    fn defaults_are_valid() {
        FieldConfig::default().validate().expect("defaults validate");
    }

    #[test]
    fn rejects_out_of_range_damping() {
        let mut config = FieldConfig::default();
        config.dynamics.damping = 1.5;
        assert!(matches!(config.validate(), Err(FieldError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_nan_tunables() {
        let mut config = FieldConfig::default();
        config.tracer.step_length = Scalar::NAN;
        assert!(matches!(config.validate(), Err(FieldError::InvalidConfig(_))));

        let mut config = FieldConfig::default();
        config.dynamics.mass = Scalar::NAN;
        assert!(config.validate().is_err());

        let mut config = FieldConfig::default();
        config.radius.magnitude_cap = Scalar::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_reversed_arrows() {
        let mut config = FieldConfig::default();
        config.vectors.max_length_factor = -0.4;
        assert!(config.validate().is_err());

        let mut config = FieldConfig::default();
        config.vectors.scale = 0.0;
        assert!(config.validate().is_err());

        let mut config = FieldConfig::default();
        config.vectors.exclusion_margin = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_inverted_radius_range() {
        let mut config = FieldConfig::default();
        config.radius.min = 30.0;
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_toml_keeps_defaults() {
        let config = FieldConfig::from_toml_str(
            "[tracer]\nlines_per_charge = 24\n\n[dynamics]\ndamping = 0.95\n",
        )
        .expect("valid toml");
        assert_eq!(config.tracer.lines_per_charge, 24);
        assert_eq!(config.tracer.max_steps, crate::constants::FIELD_LINE_LENGTH);
        assert_eq!(config.dynamics.damping, 0.95);
        assert_eq!(config.contours, ContourParams::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn invalid_values_fail_after_parsing() {
        let err = FieldConfig::from_toml_str("[vectors]\nbase_spacing = -1.0\n").unwrap_err();
        assert!(matches!(err, FieldError::InvalidConfig(_)));
        let err = FieldConfig::from_toml_str("[vectors]\nbase_spacing = \"wide\"\n").unwrap_err();
        assert!(matches!(err, FieldError::Parse(_)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_file_is_io_error() {
        let err = FieldConfig::load("/nonexistent/electric-fields.toml").unwrap_err();
        assert!(matches!(err, FieldError::Io(_)));
    }
}
