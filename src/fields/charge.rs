use std::fmt;

use crate::constants::{MAX_CHARGE_MAGNITUDE, MAX_CHARGE_RADIUS, MIN_CHARGE_RADIUS};
use crate::math::{R2, Scalar};

/// Stable identity of a charge within a scene.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChargeId(pub u64);

impl fmt::Display for ChargeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Point charge on the canvas.
///
/// Positions are in canvas pixels and `q` is the signed magnitude in coulombs. The velocity is
/// only touched by [`crate::simulation::ElectrostaticDynamics`]; `fixed` charges never move.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Charge {
    /// Unique identity.
    pub id: ChargeId,
    /// Number shown next to the charge.
    pub number: u32,
    /// Position in pixels.
    pub position: R2,
    /// Signed magnitude.
    pub q: Scalar,
    /// Velocity in m/s (dynamics only).
    pub velocity: R2,
    /// Excluded from dynamics updates when set.
    pub fixed: bool,
}

impl Charge {
    /// Creates a charge at rest at `(x, y)`. The display number mirrors the id.
    #[must_use]
    pub fn new(id: u64, x: Scalar, y: Scalar, q: Scalar) -> Self {
        Self {
            id: ChargeId(id),
            number: u32::try_from(id).unwrap_or(u32::MAX),
            position: R2::new(x, y),
            q,
            velocity: R2::zeros(),
            fixed: false,
        }
    }

    /// Builder-style toggle of the `fixed` flag.
    #[must_use]
    pub const fn with_fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    /// Display radius with the default [`RadiusScale`].
    #[must_use]
    pub fn display_radius(&self) -> Scalar {
        display_radius(self.q)
    }

    /// True when `self` and `other` carry charges of opposite sign.
    #[must_use]
    pub fn is_opposite(&self, other: &Self) -> bool {
        self.q * other.q < 0.0
    }
}

/// Logarithmic mapping from charge magnitude to rendered radius.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusScale {
    /// Radius for a zero magnitude.
    pub min: Scalar,
    /// Radius reached at `magnitude_cap` and beyond.
    pub max: Scalar,
    /// Magnitude at which the mapping saturates.
    pub magnitude_cap: Scalar,
}

impl RadiusScale {
    /// Mapping used by the stock visualizer.
    pub const DEFAULT: Self = Self {
        min: MIN_CHARGE_RADIUS,
        max: MAX_CHARGE_RADIUS,
        magnitude_cap: MAX_CHARGE_MAGNITUDE,
    };

    /// `min + (max - min) · clamp(log10(|q| + 1) / log10(cap + 1), 0, 1)`.
    #[must_use]
    pub fn radius(&self, q: Scalar) -> Scalar {
        let magnitude = q.abs();
        if magnitude == 0.0 {
            return self.min;
        }
        let normalized = ((magnitude + 1.0).log10() / (self.magnitude_cap + 1.0).log10()).clamp(0.0, 1.0);
        self.min + (self.max - self.min) * normalized
    }
}

impl Default for RadiusScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Rendered radius of a charge with magnitude `q`, using [`RadiusScale::DEFAULT`].
#[must_use]
pub fn display_radius(q: Scalar) -> Scalar {
    RadiusScale::DEFAULT.radius(q)
}

/// Label for a charge value, e.g. `+1C`, `-2.5C` or `+5.0e-2C`.
#[must_use]
pub fn format_charge(q: Scalar) -> String {
    let sign = if q > 0.0 { "+" } else { "" };
    let body = if q.abs() % 1.0 == 0.0 {
        format!("{q:.0}")
    } else if q.abs() < 0.1 {
        signed_exponential(q, 1)
    } else {
        format!("{q:.1}")
    };
    format!("{sign}{body}C")
}

/// Exponential notation with an explicit exponent sign (`1.23e+4`, `5.0e-2`).
pub(crate) fn signed_exponential(value: Scalar, digits: usize) -> String {
    let formatted = format!("{value:.digits$e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{mantissa}e+{exponent}"),
        _ => formatted,
    }
}
