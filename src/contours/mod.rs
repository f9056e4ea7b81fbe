//! Equipotential extraction: potential grid sampling plus marching squares.

mod grid;
mod marching;

pub use grid::{build_potential_grid, choose_levels, ContourParams, PotentialGrid};
pub use marching::{extract_contours, Contour};

use crate::fields::{Charge, RadiusScale};
use crate::math::Scalar;

/// Every segment extracted at one potential level.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LevelContours {
    /// Potential of the level.
    pub level: Scalar,
    /// Independent two-point segments.
    pub segments: Vec<Contour>,
}

impl PotentialGrid {
    /// Marching squares over this grid at `level`.
    #[must_use]
    pub fn contours(&self, level: Scalar) -> Vec<Contour> {
        extract_contours(&self.values, level, self.cell_width, self.cell_height)
    }
}

/// Builds the grid at the resolution chosen for `charges.len()` and extracts every level.
///
/// Returns nothing for an empty charge list or when no level can be chosen.
#[must_use]
pub fn equipotentials(
    charges: &[Charge],
    width: Scalar,
    height: Scalar,
    params: &ContourParams,
    radius: &RadiusScale,
) -> Vec<LevelContours> {
    if charges.is_empty() {
        return Vec::new();
    }
    let levels = params.levels(charges, radius);
    if levels.is_empty() {
        return Vec::new();
    }
    let grid_size = params.grid_resolution(charges.len());
    let grid = build_potential_grid(charges, width, height, grid_size);
    let result: Vec<LevelContours> = levels
        .into_iter()
        .map(|level| LevelContours { level, segments: grid.contours(level) })
        .collect();
    log::trace!(
        "equipotentials: grid {grid_size}x{grid_size}, {} levels, {} segments",
        result.len(),
        result.iter().map(|l| l.segments.len()).sum::<usize>()
    );
    result
}
