//! Headings and orientations.
//!
//! Purpose
//! - `Heading`: the four canonical orientations, with name lookup for the
//!   command layer and exact quarter-turn arithmetic.
//! - `Orientation`: a `Heading` or a raw angle left over from a rotation that
//!   is not a whole number of quarter turns.
//!
//! Conventions
//! - Angles are radians, counter-clockwise from NORTH.
//!   NORTH = 0, WEST = +π/2, SOUTH = π, EAST = −π/2.
//! - NORTH points to +y, WEST to −x.
//! - Raw angles are kept wrapped to (−π, π]; a raw angle within `SNAP_EPS`
//!   (angular distance) of a canonical value is stored as that `Heading`.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;
use std::str::FromStr;

use nalgebra::Vector2;

use crate::cfg::{QUARTER_TURN, ROUND_DIGITS, SNAP_EPS};

/// Canonical heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    North,
    South,
    East,
    West,
}

/// Lookup of a heading by an unrecognized name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownHeading(pub String);

impl fmt::Display for UnknownHeading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown heading name {:?}", self.0)
    }
}

impl std::error::Error for UnknownHeading {}

impl Heading {
    /// All headings in counter-clockwise order starting at NORTH.
    pub const CCW: [Heading; 4] = [Heading::North, Heading::West, Heading::South, Heading::East];

    /// Angle in radians, counter-clockwise from NORTH.
    #[inline]
    pub fn angle(self) -> f64 {
        match self {
            Heading::North => 0.0,
            Heading::West => FRAC_PI_2,
            Heading::South => PI,
            Heading::East => -FRAC_PI_2,
        }
    }

    /// Upper-case name as used in commands and reports.
    pub fn name(self) -> &'static str {
        match self {
            Heading::North => "NORTH",
            Heading::South => "SOUTH",
            Heading::East => "EAST",
            Heading::West => "WEST",
        }
    }

    /// Exact (case-sensitive) lookup by name.
    pub fn from_name(name: &str) -> Result<Heading, UnknownHeading> {
        match name {
            "NORTH" => Ok(Heading::North),
            "SOUTH" => Ok(Heading::South),
            "EAST" => Ok(Heading::East),
            "WEST" => Ok(Heading::West),
            other => Err(UnknownHeading(other.to_string())),
        }
    }

    /// Heading within `eps` (angular distance, modulo a full turn) of `theta`, if any.
    pub fn nearest(theta: f64, eps: f64) -> Option<Heading> {
        Heading::CCW.into_iter().find(|h| {
            let d = (theta - h.angle()).abs();
            d.min(TAU - d) <= eps
        })
    }

    /// Rotate by `quarters` counter-clockwise quarter turns (negative = clockwise).
    #[inline]
    pub fn rotate_quarters(self, quarters: i64) -> Heading {
        let idx = (self.ccw_index() as i64 + quarters).rem_euclid(4) as usize;
        Heading::CCW[idx]
    }

    /// Exact unit step for this heading.
    #[inline]
    pub fn unit(self) -> Vector2<f64> {
        match self {
            Heading::North => Vector2::new(0.0, 1.0),
            Heading::West => Vector2::new(-1.0, 0.0),
            Heading::South => Vector2::new(0.0, -1.0),
            Heading::East => Vector2::new(1.0, 0.0),
        }
    }

    #[inline]
    fn ccw_index(self) -> usize {
        match self {
            Heading::North => 0,
            Heading::West => 1,
            Heading::South => 2,
            Heading::East => 3,
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heading {
    type Err = UnknownHeading;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Heading::from_name(s)
    }
}

/// Facing of a placed agent: canonical heading or raw angle.
///
/// Invariants:
/// - `Angle(a)` is never within `SNAP_EPS` of a canonical value (those become `Heading`).
/// - `Angle(a)` is wrapped to (−π, π] unless `a` is NaN.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Orientation {
    Heading(Heading),
    Angle(f64),
}

impl Orientation {
    /// Normalize an arbitrary angle: wrap to (−π, π], then snap to a heading within `SNAP_EPS`.
    ///
    /// Non-finite input yields a NaN raw angle; such an agent can still rotate
    /// but every move is rejected by the surface.
    pub fn from_angle(theta: f64) -> Orientation {
        let wrapped = wrap_angle(theta);
        match Heading::nearest(wrapped, SNAP_EPS) {
            Some(h) => Orientation::Heading(h),
            None => Orientation::Angle(wrapped),
        }
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        match *self {
            Orientation::Heading(h) => h.angle(),
            Orientation::Angle(a) => a,
        }
    }

    /// Canonical heading, if the orientation is one.
    #[inline]
    pub fn heading(&self) -> Option<Heading> {
        match *self {
            Orientation::Heading(h) => Some(h),
            Orientation::Angle(_) => None,
        }
    }

    /// Orientation after rotating by `delta` radians counter-clockwise.
    ///
    /// Whole quarter turns applied to a canonical heading are exact; anything
    /// else goes through the raw angle.
    pub fn rotate(&self, delta: f64) -> Orientation {
        if let Orientation::Heading(h) = *self {
            if let Some(q) = whole_quarters(delta) {
                return Orientation::Heading(h.rotate_quarters(q));
            }
        }
        Orientation::from_angle(self.angle() + delta)
    }

    /// Unit displacement `(−sin θ, cos θ)`.
    ///
    /// Raw angles round each component to `ROUND_DIGITS` decimals so trig
    /// residue near the axes does not leak into positions.
    pub fn unit(&self) -> Vector2<f64> {
        match *self {
            Orientation::Heading(h) => h.unit(),
            Orientation::Angle(a) => Vector2::new(round_digits(-a.sin()), round_digits(a.cos())),
        }
    }
}

impl From<Heading> for Orientation {
    fn from(h: Heading) -> Self {
        Orientation::Heading(h)
    }
}

impl From<f64> for Orientation {
    fn from(theta: f64) -> Self {
        Orientation::from_angle(theta)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Heading(h) => write!(f, "{h}"),
            Orientation::Angle(a) => write!(f, "{a}"),
        }
    }
}

fn wrap_angle(theta: f64) -> f64 {
    if theta > -PI && theta <= PI {
        return theta;
    }
    let w = (theta + PI).rem_euclid(TAU) - PI;
    if w <= -PI {
        PI
    } else {
        w
    }
}

/// `Some(n)` if `delta` is exactly `n` quarter turns with `|n| <= 4` (n reduced mod 4).
fn whole_quarters(delta: f64) -> Option<i64> {
    let q = delta / QUARTER_TURN;
    if q.abs() <= 4.0 && q.fract() == 0.0 && q * QUARTER_TURN == delta {
        Some(q.rem_euclid(4.0) as i64)
    } else {
        None
    }
}

#[inline]
fn round_digits(v: f64) -> f64 {
    let scale = 10f64.powi(ROUND_DIGITS);
    (v * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_and_are_case_sensitive() {
        for h in Heading::CCW {
            assert_eq!(Heading::from_name(h.name()), Ok(h));
            assert_eq!(h.to_string().parse::<Heading>(), Ok(h));
        }
        assert_eq!(
            Heading::from_name("north"),
            Err(UnknownHeading("north".to_string()))
        );
        assert!(Heading::from_name("UP").is_err());
        assert!(Heading::from_name("").is_err());
    }

    #[test]
    fn canonical_angles() {
        assert_eq!(Heading::North.angle(), 0.0);
        assert_eq!(Heading::West.angle(), FRAC_PI_2);
        assert_eq!(Heading::South.angle(), PI);
        assert_eq!(Heading::East.angle(), -FRAC_PI_2);
    }

    #[test]
    fn quarter_rotation_is_ccw() {
        assert_eq!(Heading::North.rotate_quarters(1), Heading::West);
        assert_eq!(Heading::North.rotate_quarters(-1), Heading::East);
        assert_eq!(Heading::East.rotate_quarters(2), Heading::West);
        assert_eq!(Heading::South.rotate_quarters(-6), Heading::North);
    }

    #[test]
    fn exact_units_match_rounded_trig() {
        for h in Heading::CCW {
            let a = h.angle();
            let trig = Vector2::new(round_digits(-a.sin()), round_digits(a.cos()));
            assert_eq!(h.unit(), trig, "{h}");
        }
    }

    #[test]
    fn from_angle_wraps_and_snaps() {
        assert_eq!(Orientation::from_angle(0.0), Orientation::Heading(Heading::North));
        assert_eq!(Orientation::from_angle(PI), Orientation::Heading(Heading::South));
        assert_eq!(Orientation::from_angle(-PI), Orientation::Heading(Heading::South));
        match Orientation::from_angle(0.25) {
            Orientation::Angle(a) => assert_eq!(a, 0.25),
            other => panic!("expected raw angle, got {other:?}"),
        }
        let w = Orientation::from_angle(3.0 * PI + 0.5).angle();
        assert!(w > -PI && w <= PI);
        assert!((w - (-PI + 0.5)).abs() < 1e-12);
    }

    #[test]
    fn rotate_keeps_quarter_turns_exact() {
        let mut o = Orientation::Heading(Heading::North);
        for _ in 0..4 {
            o = o.rotate(FRAC_PI_2);
        }
        assert_eq!(o, Orientation::Heading(Heading::North));
        assert_eq!(
            Orientation::Heading(Heading::East).rotate(PI),
            Orientation::Heading(Heading::West)
        );
    }

    #[test]
    fn rotate_off_axis_and_back() {
        let o = Orientation::Heading(Heading::North).rotate(0.25);
        assert_eq!(o, Orientation::Angle(0.25));
        assert_eq!(o.rotate(-0.25).heading(), Some(Heading::North));
    }

    #[test]
    fn off_axis_spin_and_back_restores_every_heading() {
        for h in Heading::CCW {
            for d in [0.1, 0.3, 0.7, 1.0, 2.5, -0.3, -1.1] {
                let there = Orientation::Heading(h).rotate(d);
                assert!(there.heading().is_none(), "{h} {d}");
                assert_eq!(there.rotate(-d), Orientation::Heading(h), "{h} {d}");
            }
        }
    }

    #[test]
    fn snapping_wraps_around_south() {
        assert_eq!(Heading::nearest(-PI + 1e-15, SNAP_EPS), Some(Heading::South));
        assert_eq!(Heading::nearest(FRAC_PI_2 + 1e-6, SNAP_EPS), None);
    }

    #[test]
    fn huge_spin_is_not_a_quarter_turn_shortcut() {
        for delta in [1e17, -3.0e20, 2f64.powi(60)] {
            assert_eq!(
                Orientation::Heading(Heading::North).rotate(delta),
                Orientation::from_angle(delta),
                "{delta}"
            );
        }
        assert_eq!(whole_quarters(1e17), None);
        assert_eq!(whole_quarters(-FRAC_PI_2), Some(3));
        assert_eq!(whole_quarters(TAU), Some(0));
    }

    #[test]
    fn raw_unit_is_rounded() {
        let u = Orientation::Angle(FRAC_PI_2 / 2.0).unit();
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert!((u.x + s).abs() < 1e-9 && (u.y - s).abs() < 1e-9);
        assert_eq!(u.x, round_digits(u.x));
    }

    #[test]
    fn nan_angle_stays_raw() {
        let o = Orientation::from_angle(f64::NAN);
        assert!(o.heading().is_none());
        assert!(o.angle().is_nan());
    }
}
