//! Simulation module
//!
//! All gameplay logic lives here. This module has no rendering or platform
//! dependencies:
//! - Variable timestep supplied by the host
//! - Seeded, session-scoped RNG only
//! - Stable iteration order (pool order)

pub mod collision;
pub mod obstacle;
pub mod state;
pub mod tick;
pub mod transform;

pub use collision::{overlaps, transforms_overlap};
pub use obstacle::ObstaclePair;
pub use state::{Avatar, GameEvent, GameState, Member, SessionPhase, SessionStats};
pub use tick::{TickInput, autopilot, tick};
pub use transform::Transform;
