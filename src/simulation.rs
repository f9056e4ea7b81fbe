//! Simplified N-body electrostatic dynamics.
//!
//! Forces use the SI [`COULOMB_CONSTANT`] but divide by `r²·distance_scale` with `r` in
//! pixels, where `distance_scale` defaults to [`DYNAMICS_DISTANCE_SCALE`] (`0.04`). This is a
//! display convention of its own: the force inspector in [`crate::force`] converts pixels to
//! meters instead and reports forces 1.6·10⁵ times larger for the same pair. Mass, damping and
//! the time step are arbitrary display choices too, so the result is a qualitative animation
//! and independent of the display-unit geometry in [`crate::fields`].

use crate::constants::{
    pixels_to_cm, CM_PER_METER, COULOMB_CONSTANT, DAMPING, DYNAMICS_DISTANCE_SCALE, MASS,
    MIN_DISTANCE_FOR_POINT_CHARGE, PIXELS_PER_CM, TIME_STEP,
};
use crate::fields::Charge;
use crate::math::{R2, Scalar};

/// Integration constants for [`ElectrostaticDynamics`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicsParams {
    /// Mass of every charge in kilograms.
    pub mass: Scalar,
    /// Velocity multiplier applied after each step, in `(0, 1]`.
    pub damping: Scalar,
    /// Step length in seconds.
    pub time_step: Scalar,
    /// Multiplier on the squared pixel separation in the force denominator.
    pub distance_scale: Scalar,
}

impl Default for DynamicsParams {
    fn default() -> Self {
        Self { mass: MASS, damping: DAMPING, time_step: TIME_STEP, distance_scale: DYNAMICS_DISTANCE_SCALE }
    }
}

/// Semi-implicit Euler integrator with velocity damping.
#[derive(Debug, Clone, Default)]
pub struct ElectrostaticDynamics {
    params: DynamicsParams,
    elapsed: Scalar,
    steps: u64,
}

impl ElectrostaticDynamics {
    /// Creates an integrator at `t = 0`.
    #[must_use]
    pub const fn new(params: DynamicsParams) -> Self {
        Self { params, elapsed: 0.0, steps: 0 }
    }

    /// Integration constants.
    #[must_use]
    pub const fn params(&self) -> &DynamicsParams {
        &self.params
    }

    /// Simulated seconds since creation or the last [`reset`](Self::reset).
    #[must_use]
    pub const fn elapsed(&self) -> Scalar {
        self.elapsed
    }

    /// Steps taken since creation or the last reset.
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Rewinds the clock. Charge velocities are left untouched.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.steps = 0;
    }

    /// Advances every non-fixed charge by one time step.
    ///
    /// All forces are evaluated on the positions at the start of the step; velocities are then
    /// updated (`v += F/m·dt`, `v *= damping`) and finally positions move by `v·dt` converted
    /// from meters to pixels.
    pub fn step(&mut self, charges: &mut [Charge]) {
        let dt = self.params.time_step;
        let forces: Vec<R2> = (0..charges.len())
            .map(|i| {
                if charges[i].fixed {
                    R2::zeros()
                } else {
                    net_force_scaled(charges, i, self.params.distance_scale)
                }
            })
            .collect();

        for (charge, force) in charges.iter_mut().zip(forces) {
            if charge.fixed {
                continue;
            }
            charge.velocity += force / self.params.mass * dt;
            charge.velocity *= self.params.damping;
        }

        let meters_to_pixels = PIXELS_PER_CM * CM_PER_METER;
        for charge in charges.iter_mut().filter(|c| !c.fixed) {
            charge.position += charge.velocity * dt * meters_to_pixels;
        }

        self.elapsed += dt;
        self.steps += 1;
        log::trace!("dynamics step {} (t = {:.3} s, {} charges)", self.steps, self.elapsed, charges.len());
    }
}

/// Net force on `charges[index]` from every other charge, with the default distance scale.
///
/// Coincident pairs and pairs closer than the point-charge threshold contribute nothing.
#[must_use]
pub fn net_force(charges: &[Charge], index: usize) -> R2 {
    net_force_scaled(charges, index, DYNAMICS_DISTANCE_SCALE)
}

/// [`net_force`] with an explicit `distance_scale` on `r²` (pixels).
#[must_use]
pub fn net_force_scaled(charges: &[Charge], index: usize, distance_scale: Scalar) -> R2 {
    let target = &charges[index];
    let mut total = R2::zeros();
    for (j, other) in charges.iter().enumerate() {
        if j == index {
            continue;
        }
        let delta = target.position - other.position;
        let r = delta.norm();
        if r == 0.0 || pixels_to_cm(r) < MIN_DISTANCE_FOR_POINT_CHARGE {
            continue;
        }
        let magnitude = COULOMB_CONSTANT * (target.q * other.q).abs() / (r * r * distance_scale);
        let sign = if target.q * other.q > 0.0 { 1.0 } else { -1.0 };
        total += delta / r * (sign * magnitude);
    }
    total
}
