//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::Vector2;

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Convenient alias for two-dimensional real vectors (points, velocities, fields).
pub type R2 = Vector2<Scalar>;

/// Euclidean distance between two points.
#[inline]
#[must_use]
pub fn distance(a: &R2, b: &R2) -> Scalar {
    (b - a).norm()
}

/// Unit vector along `v`, or the zero vector when `v` has zero length.
#[must_use]
pub fn normalize_or_zero(v: &R2) -> R2 {
    let magnitude = v.norm();
    if magnitude == 0.0 {
        R2::zeros()
    } else {
        v / magnitude
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn normalize_keeps_direction() {
        let v = normalize_or_zero(&R2::new(3.0, 4.0));
        assert_relative_eq!(v, R2::new(0.6, 0.8), epsilon = 1.0e-12);
    }

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(normalize_or_zero(&R2::zeros()), R2::zeros());
    }
}
