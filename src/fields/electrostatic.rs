use crate::constants::DISPLAY_COULOMB_CONSTANT;
use crate::fields::Charge;
use crate::math::{R2, Scalar};

/// Electric potential V at `point` due to discrete point charges, in display units.
///
/// Charges located exactly at `point` are skipped.
#[must_use]
pub fn potential_at(charges: &[Charge], point: R2) -> Scalar {
    let k = DISPLAY_COULOMB_CONSTANT;
    let mut phi = 0.0;
    for c in charges {
        let r = (point - c.position).norm();
        if r != 0.0 {
            phi += k * c.q / r;
        }
    }
    phi
}

/// Electric field E at `point` due to discrete point charges, in display units.
///
/// Each contribution has magnitude `K·q/r²` along the unit vector from the charge to the point.
/// Charges located exactly at `point` are skipped, so evaluating at a charge's own position
/// yields the field of all other charges.
#[must_use]
pub fn field_at(charges: &[Charge], point: R2) -> R2 {
    let k = DISPLAY_COULOMB_CONSTANT;
    let mut e = R2::zeros();
    for c in charges {
        let r_vec = point - c.position;
        let r_squared = r_vec.norm_squared();
        if r_squared == 0.0 {
            continue;
        }
        let magnitude = k * c.q / r_squared;
        e += r_vec * (magnitude / r_squared.sqrt());
    }
    e
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    fn dipole() -> Vec<Charge> {
        vec![Charge::new(1, 300.0, 200.0, 1.0), Charge::new(2, 500.0, 200.0, -1.0)]
    }

    #[test]
    fn empty_set_is_zero() {
        assert_eq!(field_at(&[], R2::new(1.0, 2.0)), R2::zeros());
        assert_eq!(potential_at(&[], R2::new(1.0, 2.0)), 0.0);
    }

    #[test]
    fn point_on_only_charge_is_zero() {
        let charges = [Charge::new(1, 10.0, 10.0, 4.0)];
        assert_eq!(field_at(&charges, R2::new(10.0, 10.0)), R2::zeros());
        assert_eq!(potential_at(&charges, R2::new(10.0, 10.0)), 0.0);
    }

    #[test]
    fn single_charge_inverse_square() {
        let charges = [Charge::new(1, 0.0, 0.0, 2.0)];
        let e = field_at(&charges, R2::new(0.0, 10.0));
        assert_relative_eq!(e, R2::new(0.0, 0.02), epsilon = 1.0e-15);
        assert_relative_eq!(potential_at(&charges, R2::new(0.0, 10.0)), 0.2, epsilon = 1.0e-15);
    }

    #[test]
    fn symmetric_about_single_charge() {
        let charges = [Charge::new(1, 0.0, 0.0, 3.0)];
        let d = 37.5;
        let right = field_at(&charges, R2::new(d, 0.0));
        let left = field_at(&charges, R2::new(-d, 0.0));
        assert_relative_eq!(right.x, -left.x, epsilon = 1.0e-15);
        assert_relative_eq!(right.norm(), left.norm(), epsilon = 1.0e-15);
        assert_relative_eq!(
            potential_at(&charges, R2::new(d, 0.0)),
            potential_at(&charges, R2::new(-d, 0.0))
        );
    }

    #[test]
    fn superposition_holds() {
        let charges = vec![
            Charge::new(1, 120.0, 80.0, 1.5),
            Charge::new(2, 260.0, 140.0, -2.0),
            Charge::new(3, 40.0, 300.0, 0.7),
        ];
        let p = R2::new(173.0, 211.0);
        let summed = charges
            .iter()
            .fold(R2::zeros(), |acc, c| acc + field_at(std::slice::from_ref(c), p));
        assert_relative_eq!(field_at(&charges, p), summed, epsilon = 1.0e-15);
    }

    #[test]
    fn evaluating_at_a_charge_excludes_itself() {
        let charges = dipole();
        let at_positive = field_at(&charges, charges[0].position);
        let from_negative_only = field_at(&charges[1..], charges[0].position);
        assert_eq!(at_positive, from_negative_only);
    }

    #[test]
    fn dipole_midpoint_points_to_negative() {
        let charges = dipole();
        let mid = R2::new(400.0, 200.0);
        let e = field_at(&charges, mid);
        assert!(e.x > 0.0);
        assert_abs_diff_eq!(e.y, 0.0, epsilon = 1.0e-15);
        assert_relative_eq!(e.x, 2.0e-4, epsilon = 1.0e-15);
        assert_abs_diff_eq!(potential_at(&charges, mid), 0.0, epsilon = 1.0e-15);
    }
}
