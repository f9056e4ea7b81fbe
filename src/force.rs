//! SI Coulomb force between two charges for the force inspector.
//!
//! Distances on the canvas are converted with [`PIXELS_PER_CM`] before applying
//! `F = k·|q₁q₂|/r²` with the SI [`COULOMB_CONSTANT`]. Pairs closer than
//! [`MIN_DISTANCE_FOR_POINT_CHARGE`] centimeters are reported as not modelable rather than
//! as an error.

use crate::constants::{
    pixels_to_cm, pixels_to_meters, COULOMB_CONSTANT, MIN_DISTANCE_FOR_POINT_CHARGE, PIXELS_PER_CM,
};
use crate::fields::{signed_exponential, Charge};
use crate::math::{distance, R2, Scalar};

/// Whether the force pulls the charges together or pushes them apart.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Opposite signs.
    Attractive,
    /// Same signs.
    Repulsive,
}

/// Result of [`coulomb_force`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoulombForce {
    /// Magnitude in newtons; `None` when the pair is too close to be point charges.
    pub force: Option<Scalar>,
    /// False when the separation is below the point-charge threshold.
    pub is_point_charge_valid: bool,
    /// Separation in centimeters.
    pub distance_cm: Scalar,
    /// Unit vector from A toward B, negated for attraction.
    pub direction: Option<R2>,
    /// Attractive or repulsive; `None` when no direction could be determined.
    pub interaction: Option<Interaction>,
}

impl CoulombForce {
    /// Force formatted for display, see [`format_force`].
    #[must_use]
    pub fn formatted(&self) -> String {
        format_force(self.force)
    }
}

/// Coulomb force between `a` and `b`.
#[must_use]
pub fn coulomb_force(a: &Charge, b: &Charge) -> CoulombForce {
    let pixel_distance = distance(&a.position, &b.position);
    let distance_cm = pixels_to_cm(pixel_distance);

    if distance_cm < MIN_DISTANCE_FOR_POINT_CHARGE {
        return CoulombForce {
            force: None,
            is_point_charge_valid: false,
            distance_cm,
            direction: None,
            interaction: None,
        };
    }

    let meters = pixels_to_meters(pixel_distance);
    let magnitude = COULOMB_CONSTANT * (a.q * b.q).abs() / (meters * meters);

    let delta = b.position - a.position;
    let distance_pixels = delta.norm();
    if distance_pixels == 0.0 {
        return CoulombForce {
            force: Some(0.0),
            is_point_charge_valid: true,
            distance_cm,
            direction: None,
            interaction: None,
        };
    }

    let (sign, interaction) =
        if a.q * b.q > 0.0 { (1.0, Interaction::Repulsive) } else { (-1.0, Interaction::Attractive) };
    CoulombForce {
        force: Some(magnitude),
        is_point_charge_valid: true,
        distance_cm,
        direction: Some(delta / distance_pixels * sign),
        interaction: Some(interaction),
    }
}

/// Formats a force for display: `N/A`, `0 N`, exponential with two digits below 1e-3 N or
/// at/above 1e6 N, otherwise three decimals.
#[must_use]
pub fn format_force(force: Option<Scalar>) -> String {
    match force {
        None => "N/A".to_owned(),
        Some(f) if f == 0.0 => "0 N".to_owned(),
        Some(f) if f.abs() < 1e-3 || f.abs() >= 1e6 => format!("{} N", signed_exponential(f, 2)),
        Some(f) => format!("{f:.3} N"),
    }
}

/// Pixel separation at which two charges are exactly at the point-charge threshold.
#[must_use]
pub fn min_point_charge_pixels() -> Scalar {
    MIN_DISTANCE_FOR_POINT_CHARGE * PIXELS_PER_CM
}
