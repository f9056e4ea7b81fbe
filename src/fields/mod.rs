//! Point charges, superposed display-unit fields and field-line tracing.

mod charge;
mod electrostatic;
mod lines;

pub use charge::{display_radius, format_charge, Charge, ChargeId, RadiusScale};
pub(crate) use charge::signed_exponential;
pub use electrostatic::{field_at, potential_at};
pub use lines::{trace_field_lines, FieldLine, FieldLineTracer, Termination, TracerParams};
