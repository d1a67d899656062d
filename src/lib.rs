//! Flappy Speedrun - a falling-avatar obstacle runner
//!
//! Core modules:
//! - `sim`: Simulation (transforms, collision, obstacle recycling, frame tick)
//! - `renderer`: Unit-quad geometry and the WebGPU quad pipeline
//! - `platform`: Host input and clock abstractions
//! - `session`: Host-agnostic frame loop tying input, sim and renderer together
//! - `settings`: Data-driven configuration

pub mod error;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::StartupError;
pub use settings::{GravityMode, Settings};

/// Game configuration constants
///
/// Positions and speeds are in an entity's local (pre-scale) units unless
/// noted otherwise; world-space motion is the local value times the scale.
pub mod consts {
    use glam::Vec3;

    /// Avatar scale (uniform)
    pub const AVATAR_SCALE: Vec3 = Vec3::splat(0.25);
    /// Avatar starting translation (local units)
    pub const AVATAR_START: Vec3 = Vec3::new(-5.0, 0.0, 0.0);

    /// Vertical velocity assigned while ascend is held (local units/s)
    pub const ASCEND_VELOCITY: f32 = 10.0;
    /// Velocity lost per frame while ascend is released
    pub const GRAVITY_PER_FRAME: f32 = 0.1;
    /// Frame rate the per-frame gravity was tuned at, used by time-scaled gravity
    pub const GRAVITY_REFERENCE_HZ: f32 = 60.0;

    /// Obstacle scale: thin and very tall
    pub const OBSTACLE_SCALE: Vec3 = Vec3::new(0.3, 10.0, 1.0);
    /// Horizontal obstacle speed (local units/s, negative = leftward)
    pub const OBSTACLE_SPEED: f32 = -5.5;
    /// Vertical offset of each pair member from the gap center (local units)
    pub const OBSTACLE_HALF_GAP: f32 = 0.55;
    /// Bound of the uniform jitter added to each recycled member (local units)
    pub const OBSTACLE_JITTER: f32 = 0.03;

    /// World x left of which a pair is recycled
    pub const EXIT_THRESHOLD_X: f32 = -7.0;
    /// Local x a recycled pair is rebuilt at
    pub const SPAWN_X: f32 = 8.0;

    /// Session start layout: (x, lower y, upper y) in local units
    pub const INITIAL_PAIRS: [(f32, f32, f32); 3] = [
        (10.0, -0.55, 0.55),
        (18.0, -0.56, 0.54),
        (26.0, -0.55, 0.55),
    ];

    /// Camera eye position (world)
    pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 0.0, 3.0);
    /// Vertical field of view in degrees
    pub const CAMERA_FOV_DEG: f32 = 45.0;
    pub const CAMERA_NEAR: f32 = 0.1;
    pub const CAMERA_FAR: f32 = 100.0;
}
