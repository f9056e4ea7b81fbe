use nalgebra::DMatrix;

use crate::math::{R2, Scalar};

/// One straight piece of an equipotential, produced by a single grid cell.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contour {
    /// First crossing in world coordinates.
    pub start: R2,
    /// Second crossing in world coordinates.
    pub end: R2,
}

impl Contour {
    /// Midpoint of the segment.
    #[must_use]
    pub fn midpoint(&self) -> R2 {
        (self.start + self.end) * 0.5
    }
}

/// Crossing on the edge running from corner value `from` to corner value `to`, as a fraction
/// of the edge length, or `None` when both corners lie on the same side of `level`.
#[inline]
fn crossing(from: Scalar, to: Scalar, level: Scalar) -> Option<Scalar> {
    if (from >= level) == (to >= level) {
        return None;
    }
    Some((level - from) / (to - from))
}

/// Marching squares over every cell of `values` at `level`.
///
/// Edges are visited top, right, bottom, left. A cell emits a segment only when exactly two
/// of its edges cross the level; saddle cells with four crossings emit nothing. Segments are
/// not joined across cells.
#[must_use]
pub fn extract_contours(values: &DMatrix<Scalar>, level: Scalar, cell_width: Scalar, cell_height: Scalar) -> Vec<Contour> {
    let rows = values.nrows().saturating_sub(1);
    let cols = values.ncols().saturating_sub(1);
    let mut contours = Vec::new();

    for i in 0..rows {
        for j in 0..cols {
            let top_left = values[(i, j)];
            let top_right = values[(i, j + 1)];
            let bottom_left = values[(i + 1, j)];
            let bottom_right = values[(i + 1, j + 1)];
            let (x, y) = (j as Scalar, i as Scalar);

            // Cell-space crossings; each edge is walked from its first corner to its second.
            let edges = [
                crossing(top_left, top_right, level).map(|t| R2::new(x + t, y)),
                crossing(top_right, bottom_right, level).map(|t| R2::new(x + 1.0, y + t)),
                crossing(bottom_right, bottom_left, level).map(|t| R2::new(x + 1.0 - t, y + 1.0)),
                crossing(bottom_left, top_left, level).map(|t| R2::new(x, y + 1.0 - t)),
            ];

            let mut found = edges.iter().flatten();
            if let (Some(a), Some(b), None) = (found.next(), found.next(), found.next()) {
                contours.push(Contour {
                    start: R2::new(a.x * cell_width, a.y * cell_height),
                    end: R2::new(b.x * cell_width, b.y * cell_height),
                });
            }
        }
    }
    contours
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn uniform_cell_has_no_segment() {
        let values = DMatrix::from_element(2, 2, 1.0);
        assert!(extract_contours(&values, 0.5, 1.0, 1.0).is_empty());
    }

    #[test]
    fn vertical_ramp_gives_one_vertical_segment() {
        // left column 0, right column 4, level 1 crosses a quarter of the way
        let values = DMatrix::from_row_slice(2, 2, &[0.0, 4.0, 0.0, 4.0]);
        let contours = extract_contours(&values, 1.0, 10.0, 20.0);
        assert_eq!(contours.len(), 1);
        let c = contours[0];
        assert_relative_eq!(c.start, R2::new(2.5, 0.0), epsilon = 1.0e-12);
        assert_relative_eq!(c.end, R2::new(2.5, 20.0), epsilon = 1.0e-12);
    }

    #[test]
    fn bottom_and_left_edges_map_back_to_cell_coordinates() {
        // only the bottom-left corner is above the level
        let values = DMatrix::from_row_slice(2, 2, &[0.0, 0.0, 4.0, 0.0]);
        let contours = extract_contours(&values, 1.0, 1.0, 1.0);
        assert_eq!(contours.len(), 1);
        let c = contours[0];
        // bottom row falls from 4 to 0 left to right, so level 1 sits at x = 0.75
        assert_relative_eq!(c.start, R2::new(0.75, 1.0), epsilon = 1.0e-12);
        assert_relative_eq!(c.end, R2::new(0.0, 0.25), epsilon = 1.0e-12);
    }

    #[test]
    fn saddle_cell_is_skipped() {
        let values = DMatrix::from_row_slice(2, 2, &[1.0, -1.0, -1.0, 1.0]);
        assert!(extract_contours(&values, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn each_cell_contributes_independently() {
        let values = DMatrix::from_row_slice(3, 3, &[0.0, 2.0, 4.0, 0.0, 2.0, 4.0, 0.0, 2.0, 4.0]);
        let contours = extract_contours(&values, 1.0, 1.0, 1.0);
        assert_eq!(contours.len(), 2);
        for c in &contours {
            assert_relative_eq!(c.midpoint().x, 0.5, epsilon = 1.0e-12);
        }
    }
}
