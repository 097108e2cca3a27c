//! The robot: placement state machine on a borrowed surface.
//!
//! Purpose
//! - Hold the agent's pose and enforce that every committed pose lies on the
//!   associated `Surface`.
//! - Every operation is validate-then-commit: a rejected call leaves the
//!   agent exactly as it was.
//!
//! States
//! - `NoSurface`: built without a surface; every operation is rejected, forever.
//! - `Unplaced`: surface present, no pose yet; only `place` can succeed.
//! - `Placed`: pose committed; `place`, moves and rotations self-loop.
//!
//! Two API layers
//! - `try_*` return `Result<(), AgentError>` with the rejection reason.
//! - The bool layer (`place`, `move_by`, `spin`, ...) reports success only.

use std::fmt;

use nalgebra::Vector2;

use crate::cfg::QUARTER_TURN;
use crate::heading::{Heading, Orientation};
use crate::surface::Surface;

/// Committed position and facing of a placed agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vector2<f64>,
    pub orientation: Orientation,
}

impl Pose {
    #[inline]
    pub fn x(&self) -> f64 {
        self.position.x
    }
    #[inline]
    pub fn y(&self) -> f64 {
        self.position.y
    }
    /// Canonical heading, or `None` while facing a raw angle.
    #[inline]
    pub fn heading(&self) -> Option<Heading> {
        self.orientation.heading()
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x(), self.y(), self.orientation)
    }
}

/// Lifecycle state, see module docs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentState {
    NoSurface,
    Unplaced,
    Placed,
}

/// Why an operation was rejected. The agent is unchanged in every case.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AgentError {
    /// The agent was built without a surface.
    NoSurfaceAssociated,
    /// Move or rotation before the first successful `place`.
    NotYetPlaced,
    /// Target of a `place` or move lies outside the surface.
    OutOfBounds { x: f64, y: f64 },
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentError::NoSurfaceAssociated => write!(f, "agent has no surface"),
            AgentError::NotYetPlaced => write!(f, "agent has not been placed yet"),
            AgentError::OutOfBounds { x, y } => {
                write!(f, "target ({}, {}) is outside the surface", x, y)
            }
        }
    }
}

impl std::error::Error for AgentError {}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Placement {
    Unplaced,
    Placed(Pose),
}

/// A single robot on (at most) one surface.
///
/// The surface is borrowed read-only and fixed at construction.
#[derive(Clone, Debug)]
pub struct Agent<'s> {
    surface: Option<&'s Surface>,
    placement: Placement,
}

impl<'s> Agent<'s> {
    pub fn new(surface: Option<&'s Surface>) -> Self {
        Self {
            surface,
            placement: Placement::Unplaced,
        }
    }

    #[inline]
    pub fn surface(&self) -> Option<&'s Surface> {
        self.surface
    }

    pub fn state(&self) -> AgentState {
        match (self.surface, self.placement) {
            (None, _) => AgentState::NoSurface,
            (Some(_), Placement::Unplaced) => AgentState::Unplaced,
            (Some(_), Placement::Placed(_)) => AgentState::Placed,
        }
    }

    /// Current pose; `None` both without a surface and before the first placement.
    pub fn report(&self) -> Option<Pose> {
        match (self.surface, self.placement) {
            (Some(_), Placement::Placed(pose)) => Some(pose),
            _ => None,
        }
    }

    /// Place (or re-place) at `(x, y)` facing `orientation`.
    pub fn try_place(
        &mut self,
        x: f64,
        y: f64,
        orientation: impl Into<Orientation>,
    ) -> Result<(), AgentError> {
        let surface = self.surface.ok_or(AgentError::NoSurfaceAssociated)?;
        if !surface.valid(x, y) {
            return Err(AgentError::OutOfBounds { x, y });
        }
        self.placement = Placement::Placed(Pose {
            position: Vector2::new(x, y),
            orientation: orientation.into(),
        });
        Ok(())
    }

    /// Move `distance` units along the current facing (negative moves backwards).
    pub fn try_move_by(&mut self, distance: f64) -> Result<(), AgentError> {
        let (surface, pose) = self.placed()?;
        let candidate = pose.position + pose.orientation.unit() * distance;
        if !surface.contains(candidate) {
            return Err(AgentError::OutOfBounds {
                x: candidate.x,
                y: candidate.y,
            });
        }
        self.placement = Placement::Placed(Pose {
            position: candidate,
            ..pose
        });
        Ok(())
    }

    /// Rotate by `delta` radians counter-clockwise. Never rejected once placed.
    pub fn try_spin(&mut self, delta: f64) -> Result<(), AgentError> {
        let (_, pose) = self.placed()?;
        self.placement = Placement::Placed(Pose {
            orientation: pose.orientation.rotate(delta),
            ..pose
        });
        Ok(())
    }

    pub fn try_left(&mut self) -> Result<(), AgentError> {
        self.try_spin(QUARTER_TURN)
    }

    pub fn try_right(&mut self) -> Result<(), AgentError> {
        self.try_spin(-QUARTER_TURN)
    }

    #[inline]
    pub fn place(&mut self, x: f64, y: f64, orientation: impl Into<Orientation>) -> bool {
        self.try_place(x, y, orientation).is_ok()
    }

    #[inline]
    pub fn move_by(&mut self, distance: f64) -> bool {
        self.try_move_by(distance).is_ok()
    }

    /// One unit forward.
    #[inline]
    pub fn advance(&mut self) -> bool {
        self.move_by(1.0)
    }

    #[inline]
    pub fn spin(&mut self, delta: f64) -> bool {
        self.try_spin(delta).is_ok()
    }

    /// Quarter turn counter-clockwise.
    #[inline]
    pub fn left(&mut self) -> bool {
        self.try_left().is_ok()
    }

    /// Quarter turn clockwise.
    #[inline]
    pub fn right(&mut self) -> bool {
        self.try_right().is_ok()
    }

    fn placed(&self) -> Result<(&'s Surface, Pose), AgentError> {
        let surface = self.surface.ok_or(AgentError::NoSurfaceAssociated)?;
        match self.placement {
            Placement::Placed(pose) => Ok((surface, pose)),
            Placement::Unplaced => Err(AgentError::NotYetPlaced),
        }
    }
}
