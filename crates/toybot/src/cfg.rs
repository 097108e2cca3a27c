//! Numeric constants for agent motion (internal).
//!
//! Policy
//! - Fixed constants, no runtime knobs. Canonical headings never touch these;
//!   they only matter for raw (non-quarter-turn) orientations.

/// Decimal digits kept in the unit displacement for raw angles.
pub(crate) const ROUND_DIGITS: i32 = 9;
/// One counter-clockwise quarter turn, in radians.
pub(crate) const QUARTER_TURN: f64 = std::f64::consts::FRAC_PI_2;
/// Angular distance under which a raw angle snaps to a canonical heading.
pub(crate) const SNAP_EPS: f64 = 1e-12;
