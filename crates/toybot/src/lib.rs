//! Toy robot on a bounded rectangular table.
//!
//! Layout
//! - `surface`: the table, a closed rectangle with containment queries.
//! - `heading`: canonical headings and raw-angle orientations.
//! - `agent`: the robot's placement state machine.
//! - `command`: text commands parsed into typed values and applied to an agent.
//!
//! Coordinates have the origin at one table corner; NORTH is +y, WEST is −x.

pub mod agent;
mod cfg;
pub mod command;
pub mod heading;
pub mod surface;

pub use agent::{Agent, AgentError, AgentState, Pose};
pub use command::{execute_line, is_skippable, Command, LineOutcome, ParseError};
pub use heading::{Heading, Orientation, UnknownHeading};
pub use surface::{Surface, SurfaceError};
pub use nalgebra::Vector2 as Vec2;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::agent::{Agent, AgentError, AgentState, Pose};
    pub use crate::command::{execute_line, Command, LineOutcome};
    pub use crate::heading::{Heading, Orientation};
    pub use crate::surface::Surface;
}
