//! Obstacle pairs and recycling
//!
//! Each pair is an upper and a lower obstacle sharing one horizontal scroll
//! position. Pairs that leave the playfield on the left are rebuilt at the
//! spawn edge with a small random vertical jitter per member.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::transform::Transform;
use crate::consts::*;

/// Two obstacles forming the gap the avatar must pass through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    pub upper: Transform,
    pub lower: Transform,
}

impl ObstaclePair {
    /// Build a pair at local `x` with explicit member offsets (local units)
    pub fn new(x: f32, lower_y: f32, upper_y: f32) -> Self {
        Self {
            upper: Transform::compose(OBSTACLE_SCALE, Vec3::new(x, upper_y, 0.0)),
            lower: Transform::compose(OBSTACLE_SCALE, Vec3::new(x, lower_y, 0.0)),
        }
    }

    /// Session start layout, in pool order
    pub fn initial_pool() -> Vec<Self> {
        INITIAL_PAIRS
            .iter()
            .map(|&(x, lower_y, upper_y)| Self::new(x, lower_y, upper_y))
            .collect()
    }

    /// Shared world-space horizontal position
    #[inline]
    pub fn x(&self) -> f32 {
        self.lower.position.x
    }

    /// Scroll both members leftward for `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        let delta = Vec3::new(OBSTACLE_SPEED * dt, 0.0, 0.0);
        self.upper.translate(delta);
        self.lower.translate(delta);
    }

    /// Whether the pair has left the playfield
    #[inline]
    pub fn is_past_exit(&self) -> bool {
        self.x() < EXIT_THRESHOLD_X
    }

    /// Rebuild the pair at the spawn edge if it has left the playfield
    ///
    /// Both transforms are composed from scratch so repeated scrolling never
    /// accumulates drift across cycles. Upper and lower draw independent
    /// jitter. Returns true when the pair was recycled.
    pub fn maybe_recycle<R: Rng>(&mut self, rng: &mut R) -> bool {
        if !self.is_past_exit() {
            return false;
        }
        let lower_jitter = rng.random_range(-OBSTACLE_JITTER..OBSTACLE_JITTER);
        let upper_jitter = rng.random_range(-OBSTACLE_JITTER..OBSTACLE_JITTER);
        *self = Self::new(
            SPAWN_X,
            -OBSTACLE_HALF_GAP + lower_jitter,
            OBSTACLE_HALF_GAP + upper_jitter,
        );
        true
    }

    /// Members in draw order
    pub fn members(&self) -> [&Transform; 2] {
        [&self.upper, &self.lower]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Recover the local-space jitter of a member from its world position
    fn local_jitter(member: &Transform, base: f32) -> f32 {
        member.position.y / member.scale.y - base
    }

    #[test]
    fn test_initial_pool_layout() {
        let pool = ObstaclePair::initial_pool();
        assert_eq!(pool.len(), 3);
        for (pair, &(x, _, _)) in pool.iter().zip(INITIAL_PAIRS.iter()) {
            assert_eq!(pair.upper.position.x, pair.lower.position.x);
            assert_eq!(pair.x(), x * OBSTACLE_SCALE.x);
            assert!(pair.upper.position.y > pair.lower.position.y);
        }
        // Pairs are spaced left to right
        assert!(pool[0].x() < pool[1].x() && pool[1].x() < pool[2].x());
    }

    #[test]
    fn test_advance_moves_left_by_scaled_speed() {
        let mut pair = ObstaclePair::new(10.0, -0.55, 0.55);
        let before = pair.clone();
        let dt = 0.016;
        pair.advance(dt);

        let step = OBSTACLE_SPEED * dt * OBSTACLE_SCALE.x;
        assert_eq!(pair.upper.position.x, before.upper.position.x + step);
        assert_eq!(pair.lower.position.x, before.lower.position.x + step);
        assert!(
            ((before.x() - pair.x()) - OBSTACLE_SPEED.abs() * dt * OBSTACLE_SCALE.x).abs() < 1e-6
        );
        // Vertical placement and scale untouched
        assert_eq!(pair.upper.position.y, before.upper.position.y);
        assert_eq!(pair.lower.position.y, before.lower.position.y);
        assert_eq!(pair.upper.scale, OBSTACLE_SCALE);
    }

    #[test]
    fn test_no_recycle_inside_playfield() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut pair = ObstaclePair::new(10.0, -0.55, 0.55);
        let before = pair.clone();
        assert!(!pair.maybe_recycle(&mut rng));
        assert_eq!(pair, before);
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut pair = ObstaclePair::new(0.0, -0.55, 0.55);
        pair.upper.position.x = EXIT_THRESHOLD_X;
        pair.lower.position.x = EXIT_THRESHOLD_X;
        assert!(!pair.maybe_recycle(&mut rng));
    }

    #[test]
    fn test_recycle_resets_to_spawn_with_bounded_jitter() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..200 {
            let mut pair = ObstaclePair::new(-100.0, -0.55, 0.55);
            assert!(pair.maybe_recycle(&mut rng));

            let spawn_world_x = SPAWN_X * OBSTACLE_SCALE.x;
            assert_eq!(pair.upper.position.x, spawn_world_x);
            assert_eq!(pair.lower.position.x, spawn_world_x);
            assert_eq!(pair.upper.scale, OBSTACLE_SCALE);
            assert_eq!(pair.lower.scale, OBSTACLE_SCALE);

            let upper = local_jitter(&pair.upper, OBSTACLE_HALF_GAP);
            let lower = local_jitter(&pair.lower, -OBSTACLE_HALF_GAP);
            assert!(upper.abs() <= OBSTACLE_JITTER + 1e-5, "upper jitter {upper}");
            assert!(lower.abs() <= OBSTACLE_JITTER + 1e-5, "lower jitter {lower}");
        }
    }

    #[test]
    fn test_members_jitter_independently() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut differing = 0;
        for _ in 0..50 {
            let mut pair = ObstaclePair::new(-100.0, -0.55, 0.55);
            pair.maybe_recycle(&mut rng);
            let upper = local_jitter(&pair.upper, OBSTACLE_HALF_GAP);
            let lower = local_jitter(&pair.lower, -OBSTACLE_HALF_GAP);
            if (upper - lower).abs() > 1e-4 {
                differing += 1;
            }
        }
        assert!(differing > 40);
    }

    #[test]
    fn test_recycle_is_deterministic_for_seed() {
        let mut a = Pcg32::seed_from_u64(99);
        let mut b = Pcg32::seed_from_u64(99);
        let mut pa = ObstaclePair::new(-100.0, -0.55, 0.55);
        let mut pb = pa.clone();
        pa.maybe_recycle(&mut a);
        pb.maybe_recycle(&mut b);
        assert_eq!(pa, pb);
    }
}
