//! Named starting layouts of charges.
//!
//! A preset is only a list of `(x, y, q)` triples; identities are assigned by whoever loads it
//! (see [`crate::scene::Scene::load_preset`]).

use std::fmt;
use std::str::FromStr;

use crate::errors::FieldError;
use crate::math::Scalar;

/// Position and magnitude of one charge in a preset.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeSpec {
    /// Horizontal position in pixels.
    pub x: Scalar,
    /// Vertical position in pixels.
    pub y: Scalar,
    /// Signed magnitude.
    pub q: Scalar,
}

const fn spec(x: Scalar, y: Scalar, q: Scalar) -> ChargeSpec {
    ChargeSpec { x, y, q }
}

const DIPOLE: [ChargeSpec; 2] = [spec(300.0, 200.0, 1.0), spec(500.0, 200.0, -1.0)];
const QUADRUPOLE: [ChargeSpec; 4] = [
    spec(250.0, 150.0, 1.0),
    spec(350.0, 150.0, -1.0),
    spec(250.0, 250.0, -1.0),
    spec(350.0, 250.0, 1.0),
];
const LINE: [ChargeSpec; 5] = [
    spec(200.0, 200.0, 1.0),
    spec(300.0, 200.0, 1.0),
    spec(400.0, 200.0, 1.0),
    spec(500.0, 200.0, 1.0),
    spec(600.0, 200.0, 1.0),
];
const CAPACITOR: [ChargeSpec; 16] = [
    spec(200.0, 150.0, 1.0),
    spec(250.0, 150.0, 1.0),
    spec(300.0, 150.0, 1.0),
    spec(350.0, 150.0, 1.0),
    spec(400.0, 150.0, 1.0),
    spec(450.0, 150.0, 1.0),
    spec(500.0, 150.0, 1.0),
    spec(550.0, 150.0, 1.0),
    spec(200.0, 250.0, -1.0),
    spec(250.0, 250.0, -1.0),
    spec(300.0, 250.0, -1.0),
    spec(350.0, 250.0, -1.0),
    spec(400.0, 250.0, -1.0),
    spec(450.0, 250.0, -1.0),
    spec(500.0, 250.0, -1.0),
    spec(550.0, 250.0, -1.0),
];
const SINGLE: [ChargeSpec; 1] = [spec(400.0, 200.0, 1.0)];
const SAME_SIGN: [ChargeSpec; 2] = [spec(300.0, 200.0, 1.0), spec(500.0, 200.0, 1.0)];

/// Built-in charge layouts.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Equal and opposite pair.
    Dipole,
    /// Two dipoles arranged on a square.
    Quadrupole,
    /// Five positive charges in a row.
    Line,
    /// Two plates of eight charges each.
    Capacitor,
    /// One positive charge.
    Single,
    /// Two positive charges.
    SameSign,
}

impl Preset {
    /// Every preset, in menu order.
    pub const ALL: [Self; 6] =
        [Self::Dipole, Self::Quadrupole, Self::Line, Self::Capacitor, Self::Single, Self::SameSign];

    /// Menu identifier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dipole => "dipole",
            Self::Quadrupole => "quadrupole",
            Self::Line => "line",
            Self::Capacitor => "capacitor",
            Self::Single => "single",
            Self::SameSign => "same_sign",
        }
    }

    /// Looks up a preset by its menu identifier.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Charges of the layout.
    #[must_use]
    pub const fn charges(self) -> &'static [ChargeSpec] {
        match self {
            Self::Dipole => &DIPOLE,
            Self::Quadrupole => &QUADRUPOLE,
            Self::Line => &LINE,
            Self::Capacitor => &CAPACITOR,
            Self::Single => &SINGLE,
            Self::SameSign => &SAME_SIGN,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| FieldError::UnknownPreset(s.to_owned()))
    }
}
