//! Session state and core simulation types
//!
//! The session exclusively owns the avatar, the obstacle pool and the RNG.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacle::ObstaclePair;
use super::transform::Transform;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Frames are being simulated
    Running,
    /// The avatar hit an obstacle (terminal)
    Ended,
}

/// Which member of a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Member {
    Upper,
    Lower,
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Pair at `pair` index was rebuilt at the spawn edge
    Recycled { pair: usize },
    /// Avatar overlapped a member of the pair at `pair` index
    Collision { pair: usize, member: Member },
}

/// The player-controlled avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub transform: Transform,
    /// Vertical velocity in local units per second
    pub velocity: f32,
}

impl Default for Avatar {
    fn default() -> Self {
        Self {
            transform: Transform::compose(AVATAR_SCALE, AVATAR_START),
            velocity: 0.0,
        }
    }
}

impl Avatar {
    /// Integrate vertical position over `dt` seconds
    pub fn integrate(&mut self, dt: f32) {
        self.transform.translate(Vec3::new(0.0, self.velocity * dt, 0.0));
    }
}

/// Session counters reported when the session finishes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Frames simulated
    pub frames: u64,
    /// Sum of all frame deltas (seconds)
    pub elapsed: f64,
    /// Pairs rebuilt at the spawn edge
    pub recycles: u64,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub phase: SessionPhase,
    pub avatar: Avatar,
    /// Obstacle pool, iterated in index order
    pub pairs: Vec<ObstaclePair>,
    pub stats: SessionStats,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    /// Session-scoped jitter source
    pub rng: Pcg32,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: SessionPhase::Running,
            avatar: Avatar::default(),
            pairs: ObstaclePair::initial_pool(),
            stats: SessionStats::default(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Transforms in fixed draw order: avatar, then each pair upper before lower
    pub fn draw_order(&self) -> impl Iterator<Item = &Transform> + '_ {
        std::iter::once(&self.avatar.transform)
            .chain(self.pairs.iter().flat_map(|pair| pair.members()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let state = GameState::new(12345);
        assert_eq!(state.phase, SessionPhase::Running);
        assert_eq!(state.avatar.velocity, 0.0);
        assert_eq!(state.avatar.transform.position, Vec3::new(-1.25, 0.0, 0.0));
        assert_eq!(state.pairs.len(), INITIAL_PAIRS.len());
        assert_eq!(state.stats, SessionStats::default());
    }

    #[test]
    fn test_draw_order() {
        let state = GameState::new(1);
        let order: Vec<&Transform> = state.draw_order().collect();
        assert_eq!(order.len(), 1 + 2 * state.pairs.len());
        assert_eq!(*order[0], state.avatar.transform);
        for (i, pair) in state.pairs.iter().enumerate() {
            assert_eq!(*order[1 + 2 * i], pair.upper);
            assert_eq!(*order[2 + 2 * i], pair.lower);
        }
    }

    #[test]
    fn test_integrate_uses_scaled_units() {
        let mut avatar = Avatar {
            velocity: 4.0,
            ..Default::default()
        };
        avatar.integrate(0.5);
        assert_eq!(avatar.transform.position.y, 4.0 * 0.5 * AVATAR_SCALE.y);
    }
}
