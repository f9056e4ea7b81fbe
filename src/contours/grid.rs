use nalgebra::DMatrix;

use crate::constants::{DISPLAY_COULOMB_CONSTANT, EQUIPOTENTIAL_LEVEL_COUNT, EQUIPOTENTIAL_RESOLUTION};
use crate::fields::{potential_at, Charge, RadiusScale};
use crate::math::{R2, Scalar};

/// Sampled potential over `[0, width] × [0, height]`.
///
/// `values[(row, col)]` holds the potential at `(col · cell_width, row · cell_height)`, so a grid
/// of `n` cells per axis stores `(n + 1) × (n + 1)` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct PotentialGrid {
    /// Potential samples indexed `(row, col)`.
    pub values: DMatrix<Scalar>,
    /// Horizontal distance between neighbouring samples.
    pub cell_width: Scalar,
    /// Vertical distance between neighbouring samples.
    pub cell_height: Scalar,
}

impl PotentialGrid {
    /// Number of cells per axis.
    #[must_use]
    pub fn cells(&self) -> (usize, usize) {
        (self.values.nrows().saturating_sub(1), self.values.ncols().saturating_sub(1))
    }
}

/// Samples [`potential_at`] on a `(grid_size + 1) × (grid_size + 1)` lattice.
///
/// A `grid_size` of zero is treated as one cell.
#[must_use]
pub fn build_potential_grid(charges: &[Charge], width: Scalar, height: Scalar, grid_size: usize) -> PotentialGrid {
    let n = grid_size.max(1);
    let cell_width = width / n as Scalar;
    let cell_height = height / n as Scalar;
    let values = DMatrix::from_fn(n + 1, n + 1, |row, col| {
        potential_at(charges, R2::new(col as Scalar * cell_width, row as Scalar * cell_height))
    });
    PotentialGrid { values, cell_width, cell_height }
}

/// Contour level generation and grid coarsening policy.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourParams {
    /// Cells per axis for small charge counts.
    pub base_resolution: usize,
    /// Levels generated per sign.
    pub level_count: usize,
    /// Above this many charges the grid loses one cell per extra charge.
    pub moderate_above: usize,
    /// Lower bound on the resolution in the moderate regime.
    pub moderate_floor: usize,
    /// Above this many charges the grid loses two cells per extra charge.
    pub crowded_above: usize,
    /// Lower bound on the resolution in the crowded regime.
    pub crowded_floor: usize,
}

impl Default for ContourParams {
    fn default() -> Self {
        Self {
            base_resolution: EQUIPOTENTIAL_RESOLUTION,
            level_count: EQUIPOTENTIAL_LEVEL_COUNT,
            moderate_above: 5,
            moderate_floor: 30,
            crowded_above: 10,
            crowded_floor: 20,
        }
    }
}

impl ContourParams {
    /// Cells per axis to use for `charge_count` charges. Never finer than the base resolution.
    #[must_use]
    pub fn grid_resolution(&self, charge_count: usize) -> usize {
        let base = self.base_resolution;
        let resolution = if charge_count > self.crowded_above {
            base.saturating_sub((charge_count - self.crowded_above) * 2).max(self.crowded_floor)
        } else if charge_count > self.moderate_above {
            base.saturating_sub(charge_count - self.moderate_above).max(self.moderate_floor)
        } else {
            base
        };
        resolution.min(base)
    }

    /// Levels `±max·i/level_count` for `i = 1..=level_count`, interleaved positive then negative.
    ///
    /// `max` is the largest `|K·q / display_radius(q)|` over the charges. Returns an empty list
    /// when that is zero, meaning there is nothing to draw.
    #[must_use]
    pub fn levels(&self, charges: &[Charge], radius: &RadiusScale) -> Vec<Scalar> {
        let max_potential = charges
            .iter()
            .map(|c| (DISPLAY_COULOMB_CONSTANT * c.q / radius.radius(c.q)).abs())
            .fold(0.0, Scalar::max);
        if max_potential == 0.0 {
            return Vec::new();
        }
        let count = self.level_count as Scalar;
        (1..=self.level_count)
            .flat_map(|i| {
                let level = max_potential * (i as Scalar / count);
                [level, -level]
            })
            .collect()
    }
}

/// Default contour levels for `charges`; see [`ContourParams::levels`].
#[must_use]
pub fn choose_levels(charges: &[Charge]) -> Vec<Scalar> {
    ContourParams::default().levels(charges, &RadiusScale::DEFAULT)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::fields::display_radius;

    #[test]
    fn grid_has_corner_samples() {
        let charges = vec![Charge::new(1, 0.0, 0.0, 1.0)];
        let grid = build_potential_grid(&charges, 100.0, 50.0, 10);
        assert_eq!(grid.values.shape(), (11, 11));
        assert_eq!(grid.cells(), (10, 10));
        assert_relative_eq!(grid.cell_width, 10.0);
        assert_relative_eq!(grid.cell_height, 5.0);
        // sample on the charge itself is skipped
        assert_eq!(grid.values[(0, 0)], 0.0);
        assert_relative_eq!(grid.values[(0, 10)], 0.01, epsilon = 1.0e-15);
        assert_relative_eq!(grid.values[(10, 0)], 0.02, epsilon = 1.0e-15);
    }

    #[test]
    fn resolution_coarsens_with_charge_count() {
        let params = ContourParams::default();
        assert_eq!(params.grid_resolution(0), 50);
        assert_eq!(params.grid_resolution(5), 50);
        assert_eq!(params.grid_resolution(8), 47);
        assert_eq!(params.grid_resolution(10), 45);
        assert_eq!(params.grid_resolution(12), 46);
        assert_eq!(params.grid_resolution(16), 38);
        assert_eq!(params.grid_resolution(100), 20);
    }

    #[test]
    fn sixteen_levels_scaled_by_strongest_charge() {
        let charges = vec![Charge::new(1, 0.0, 0.0, 1.0), Charge::new(2, 50.0, 0.0, -10.0)];
        let levels = choose_levels(&charges);
        assert_eq!(levels.len(), 16);
        let max = 10.0 / display_radius(10.0);
        assert_relative_eq!(levels[0], max / 8.0, epsilon = 1.0e-15);
        assert_relative_eq!(levels[1], -max / 8.0, epsilon = 1.0e-15);
        assert_relative_eq!(levels[14], max, epsilon = 1.0e-15);
        assert_relative_eq!(levels[15], -max, epsilon = 1.0e-15);
    }

    #[test]
    fn no_levels_without_potential() {
        assert!(choose_levels(&[]).is_empty());
        assert!(choose_levels(&[Charge::new(1, 10.0, 10.0, 0.0)]).is_empty());
    }
}
