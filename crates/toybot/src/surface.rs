//! Rectangular table surface.
//!
//! - `Surface`: closed rectangle `[0, width] × [0, length]`, origin at one corner.
//! - `SurfaceError`: rejected dimensions at construction time.

use std::fmt;

use nalgebra::Vector2;

/// Closed, axis-aligned rectangle with one corner at the origin.
///
/// Invariants:
/// - `width` and `length` are finite and `>= 0`.
/// - Never mutated after construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    width: f64,
    length: f64,
}

/// Errors surfaced when building a `Surface`.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceError {
    /// A dimension is negative, NaN or infinite.
    InvalidDimension { name: &'static str, value: f64 },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::InvalidDimension { name, value } => write!(
                f,
                "surface {} must be finite and non-negative, got {}",
                name, value
            ),
        }
    }
}

impl std::error::Error for SurfaceError {}

impl Surface {
    /// Build a surface; fails fast on dimensions that would make it unsatisfiable.
    pub fn new(width: f64, length: f64) -> Result<Self, SurfaceError> {
        check_dimension("width", width)?;
        check_dimension("length", length)?;
        Ok(Self { width, length })
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// True iff `0 <= x <= width` and `0 <= y <= length` (boundary inclusive).
    ///
    /// NaN coordinates are never contained; infinite ones are outside any surface.
    #[inline]
    pub fn valid(&self, x: f64, y: f64) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.length).contains(&y)
    }

    #[inline]
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        self.valid(p.x, p.y)
    }
}

fn check_dimension(name: &'static str, value: f64) -> Result<(), SurfaceError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SurfaceError::InvalidDimension { name, value })
    }
}
