//! Streamline integration outward from each charge.

use std::f64::consts::TAU;

use crate::constants::{FIELD_LINE_COUNT, FIELD_LINE_LENGTH, FIELD_LINE_MARGIN, STEP_SIZE};
use crate::fields::{field_at, Charge, ChargeId, RadiusScale};
use crate::math::{distance, normalize_or_zero, R2, Scalar};

/// Why a field line stopped growing.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The field vanished exactly at the current point.
    ZeroField,
    /// The next point fell outside the canvas rectangle.
    LeftCanvas,
    /// The next point came within the stop circle of an opposite-sign charge.
    ReachedCharge(ChargeId),
    /// The step budget ran out.
    StepLimit,
}

/// Polyline following the field from one charge at one emission angle.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FieldLine {
    /// Charge the line was emitted from.
    pub source: ChargeId,
    /// Emission angle in radians.
    pub angle: Scalar,
    /// Points from the start circle outward; always contains at least the start point.
    pub points: Vec<R2>,
    /// Reason the integration stopped.
    pub termination: Termination,
}

impl FieldLine {
    /// True when the line has at least one segment to draw.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.points.len() > 1
    }
}

/// Integration parameters for [`FieldLineTracer`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracerParams {
    /// Lines emitted per charge, evenly spaced in angle.
    pub lines_per_charge: usize,
    /// Hard cap on integration steps per line.
    pub max_steps: usize,
    /// Distance advanced per step, in pixels.
    pub step_length: Scalar,
    /// Gap between a charge's display radius and both the start and stop circles.
    pub margin: Scalar,
}

impl Default for TracerParams {
    fn default() -> Self {
        Self {
            lines_per_charge: FIELD_LINE_COUNT,
            max_steps: FIELD_LINE_LENGTH,
            step_length: STEP_SIZE,
            margin: FIELD_LINE_MARGIN,
        }
    }
}

/// Fixed-step streamline tracer.
///
/// Lines from positive charges follow the field, lines from negative charges run against it,
/// so every line travels away from its source.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldLineTracer {
    params: TracerParams,
    radius: RadiusScale,
}

impl FieldLineTracer {
    /// Creates a tracer with explicit parameters.
    #[must_use]
    pub const fn new(params: TracerParams, radius: RadiusScale) -> Self {
        Self { params, radius }
    }

    /// Traces every `(charge, angle)` pair over a `width × height` canvas.
    #[must_use]
    pub fn trace(&self, charges: &[Charge], width: Scalar, height: Scalar) -> Vec<FieldLine> {
        let count = self.params.lines_per_charge;
        let mut lines = Vec::with_capacity(charges.len() * count);
        for source in charges {
            for i in 0..count {
                let angle = TAU * i as Scalar / count as Scalar;
                lines.push(self.trace_line(charges, source, angle, width, height));
            }
        }
        log::trace!("traced {} field lines from {} charges", lines.len(), charges.len());
        lines
    }

    /// Traces the single line leaving `source` at `angle`.
    #[must_use]
    pub fn trace_line(
        &self,
        charges: &[Charge],
        source: &Charge,
        angle: Scalar,
        width: Scalar,
        height: Scalar,
    ) -> FieldLine {
        let start_radius = self.radius.radius(source.q) + self.params.margin;
        let mut point = source.position + R2::new(angle.cos(), angle.sin()) * start_radius;
        let mut points = vec![point];
        let sign = if source.q > 0.0 { 1.0 } else { -1.0 };

        let mut termination = Termination::StepLimit;
        for _ in 0..self.params.max_steps {
            let direction = normalize_or_zero(&field_at(charges, point));
            if direction == R2::zeros() {
                termination = Termination::ZeroField;
                break;
            }
            point += direction * (sign * self.params.step_length);

            if point.x < 0.0 || point.x > width || point.y < 0.0 || point.y > height {
                termination = Termination::LeftCanvas;
                break;
            }
            if let Some(sink) = self.absorbing_charge(charges, source, &point) {
                termination = Termination::ReachedCharge(sink);
                break;
            }
            points.push(point);
        }

        FieldLine { source: source.id, angle, points, termination }
    }

    fn absorbing_charge(&self, charges: &[Charge], source: &Charge, point: &R2) -> Option<ChargeId> {
        charges
            .iter()
            .filter(|other| other.is_opposite(source))
            .find(|other| distance(point, &other.position) < self.radius.radius(other.q) + self.params.margin)
            .map(|other| other.id)
    }
}

/// Traces field lines with the default tracer (16 lines per charge, 200 steps of 2 px).
#[must_use]
pub fn trace_field_lines(charges: &[Charge], width: Scalar, height: Scalar) -> Vec<FieldLine> {
    FieldLineTracer::default().trace(charges, width, height)
}
