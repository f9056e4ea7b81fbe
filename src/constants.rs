//! Physical constants, display constants and default tunables.
//!
//! ## Two unit systems
//!
//! Geometry for rendering (field, potential, field lines, contours, vector arrows) is computed
//! in dimensionless display units with [`DISPLAY_COULOMB_CONSTANT`] `= 1` and positions in
//! canvas pixels. Only the force inspector and the dynamics step convert pixels to meters and
//! use the SI [`COULOMB_CONSTANT`]. The two must not be mixed.
//!
//! ## References
//!
//! - NIST Reference on Constants, Units, and Uncertainty: <https://physics.nist.gov/cuu/Constants/>

/// Coulomb constant used by the display-geometry evaluator (dimensionless).
pub const DISPLAY_COULOMB_CONSTANT: f64 = 1.0;
/// Coulomb constant _k_ₑ = 1/(4πε₀) in N·m²/C².
/// Approximate value: 8.9875517923 × 10⁹ N·m²/C².
pub const COULOMB_CONSTANT: f64 = 8.987_551_792_3e9;

/// Canvas pixels per centimeter.
pub const PIXELS_PER_CM: f64 = 20.0;
/// Centimeters per meter.
pub const CM_PER_METER: f64 = 100.0;
/// Below this separation in centimeters two charges cannot be modeled as point charges.
pub const MIN_DISTANCE_FOR_POINT_CHARGE: f64 = 2.0;

/// Smallest rendered charge radius in pixels.
pub const MIN_CHARGE_RADIUS: f64 = 5.0;
/// Largest rendered charge radius in pixels.
pub const MAX_CHARGE_RADIUS: f64 = 25.0;
/// Magnitude at which the display radius saturates.
pub const MAX_CHARGE_MAGNITUDE: f64 = 10.0;

/// Field lines emitted per charge.
pub const FIELD_LINE_COUNT: usize = 16;
/// Maximum integration steps per field line.
pub const FIELD_LINE_LENGTH: usize = 200;
/// Integration step length in pixels.
pub const STEP_SIZE: f64 = 2.0;
/// Gap in pixels between a charge's rim and the field-line start / stop circle.
pub const FIELD_LINE_MARGIN: f64 = 2.0;

/// Base equipotential grid resolution (cells per axis).
pub const EQUIPOTENTIAL_RESOLUTION: usize = 50;
/// Equipotential levels generated per sign.
pub const EQUIPOTENTIAL_LEVEL_COUNT: usize = 8;
/// Equipotential stroke color; levels are not color coded.
pub const EQUIPOTENTIAL_COLOR: &str = "#ff6b6b";
/// Equipotential stroke opacity.
pub const EQUIPOTENTIAL_ALPHA: f64 = 0.7;

/// Base lattice spacing in pixels for the vector field.
pub const VECTOR_SPACING: f64 = 40.0;
/// Multiplier from field magnitude to arrow length.
pub const VECTOR_SCALE: f64 = 0.5;
/// Arrow length cap as a fraction of the lattice spacing.
pub const VECTOR_MAX_LENGTH_FACTOR: f64 = 0.4;
/// Lattice points closer than `display radius + margin` to a charge are skipped.
pub const VECTOR_EXCLUSION_MARGIN: f64 = 5.0;

/// Mass of every charge in the dynamics model, in kilograms.
pub const MASS: f64 = 1e-3;
/// Per-step velocity damping factor.
pub const DAMPING: f64 = 0.98;
/// Dynamics time step in seconds (about 60 fps).
pub const TIME_STEP: f64 = 0.016;
/// Multiplier turning a squared pixel separation into the dynamics force denominator
/// (`PIXELS_PER_CM² / 10⁴`). Not an SI conversion; see [`crate::simulation`].
pub const DYNAMICS_DISTANCE_SCALE: f64 = PIXELS_PER_CM * PIXELS_PER_CM / 10_000.0;

/// Converts a pixel distance to centimeters.
#[inline]
#[must_use]
pub fn pixels_to_cm(pixels: f64) -> f64 {
    pixels / PIXELS_PER_CM
}

/// Converts a pixel distance to meters.
#[inline]
#[must_use]
pub fn pixels_to_meters(pixels: f64) -> f64 {
    pixels_to_cm(pixels) / CM_PER_METER
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn eighty_pixels_are_four_centimeters() {
        assert_relative_eq!(pixels_to_cm(80.0), 4.0, epsilon = 1.0e-12);
        assert_relative_eq!(pixels_to_meters(80.0), 0.04, epsilon = 1.0e-12);
    }
}
