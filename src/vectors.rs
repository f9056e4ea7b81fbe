//! Lattice sampling of the display-unit field for arrow rendering.

use crate::constants::{VECTOR_EXCLUSION_MARGIN, VECTOR_MAX_LENGTH_FACTOR, VECTOR_SCALE, VECTOR_SPACING};
use crate::fields::{field_at, Charge, RadiusScale};
use crate::math::{distance, R2, Scalar};

/// Field evaluated at one lattice point.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSample {
    /// Lattice point.
    pub origin: R2,
    /// True superposed field at `origin`.
    pub field: R2,
    /// `|field|`, always positive.
    pub magnitude: Scalar,
    /// Arrow tip: `origin` plus the unit field direction times the capped display length.
    pub tip: R2,
}

impl FieldSample {
    /// Unit direction of the field.
    #[must_use]
    pub fn direction(&self) -> R2 {
        self.field / self.magnitude
    }

    /// Rendered arrow length.
    #[must_use]
    pub fn display_length(&self) -> Scalar {
        distance(&self.origin, &self.tip)
    }
}

/// Lattice spacing, arrow scaling and coarsening policy.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorParams {
    /// Lattice spacing for small charge counts, in pixels.
    pub base_spacing: Scalar,
    /// Multiplier from field magnitude to arrow length.
    pub scale: Scalar,
    /// Arrow length cap as a fraction of the effective spacing.
    pub max_length_factor: Scalar,
    /// Extra clearance around each charge's display radius.
    pub exclusion_margin: Scalar,
    /// Above this many charges the spacing grows by `moderate_factor`.
    pub moderate_above: usize,
    /// Spacing multiplier in the moderate regime.
    pub moderate_factor: Scalar,
    /// Above this many charges the spacing grows by `crowded_factor`.
    pub crowded_above: usize,
    /// Spacing multiplier in the crowded regime.
    pub crowded_factor: Scalar,
}

impl Default for VectorParams {
    fn default() -> Self {
        Self {
            base_spacing: VECTOR_SPACING,
            scale: VECTOR_SCALE,
            max_length_factor: VECTOR_MAX_LENGTH_FACTOR,
            exclusion_margin: VECTOR_EXCLUSION_MARGIN,
            moderate_above: 4,
            moderate_factor: 1.2,
            crowded_above: 8,
            crowded_factor: 1.5,
        }
    }
}

impl VectorParams {
    /// Lattice spacing to use for `charge_count` charges.
    #[must_use]
    pub fn spacing(&self, charge_count: usize) -> Scalar {
        if charge_count > self.crowded_above {
            self.base_spacing * self.crowded_factor
        } else if charge_count > self.moderate_above {
            self.base_spacing * self.moderate_factor
        } else {
            self.base_spacing
        }
    }
}

/// Samples the field on a lattice with explicit `spacing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorFieldSampler {
    params: VectorParams,
    radius: RadiusScale,
}

impl VectorFieldSampler {
    /// Creates a sampler with explicit parameters.
    #[must_use]
    pub const fn new(params: VectorParams, radius: RadiusScale) -> Self {
        Self { params, radius }
    }

    /// Lattice starting at `spacing / 2` on both axes, skipping points inside any charge's
    /// exclusion circle and points with exactly zero field.
    #[must_use]
    pub fn sample(&self, charges: &[Charge], width: Scalar, height: Scalar, spacing: Scalar) -> Vec<FieldSample> {
        let mut samples = Vec::new();
        if spacing <= 0.0 {
            return samples;
        }
        let max_length = spacing * self.params.max_length_factor;

        let mut x = spacing / 2.0;
        while x < width {
            let mut y = spacing / 2.0;
            while y < height {
                let origin = R2::new(x, y);
                y += spacing;
                if self.is_excluded(charges, &origin) {
                    continue;
                }
                let field = field_at(charges, origin);
                let magnitude = field.norm();
                if magnitude == 0.0 {
                    continue;
                }
                let length = (magnitude * self.params.scale).min(max_length);
                samples.push(FieldSample { origin, field, magnitude, tip: origin + field * (length / magnitude) });
            }
            x += spacing;
        }
        log::trace!("sampled {} field vectors at spacing {spacing}", samples.len());
        samples
    }

    /// Samples with the spacing chosen for `charges.len()`.
    #[must_use]
    pub fn sample_auto(&self, charges: &[Charge], width: Scalar, height: Scalar) -> Vec<FieldSample> {
        if charges.is_empty() {
            return Vec::new();
        }
        self.sample(charges, width, height, self.params.spacing(charges.len()))
    }

    fn is_excluded(&self, charges: &[Charge], point: &R2) -> bool {
        charges
            .iter()
            .any(|c| distance(point, &c.position) < self.radius.radius(c.q) + self.params.exclusion_margin)
    }
}

/// Samples the field with default parameters at the given `spacing`.
#[must_use]
pub fn sample_vector_field(charges: &[Charge], width: Scalar, height: Scalar, spacing: Scalar) -> Vec<FieldSample> {
    VectorFieldSampler::default().sample(charges, width, height, spacing)
}
