//! Axis-aligned bounding-box collision
//!
//! Entities are unit quads, so an entity's bounding box is centered on its
//! world position with full extents equal to its scale vector.

use glam::Vec3;

use super::transform::Transform;

/// Check whether two boxes overlap on every axis
///
/// `size_a`/`size_b` are full extents (pass the entity's scale directly);
/// they are halved here. Intervals are closed, so touching faces collide.
/// The z test is kept even though gameplay is planar: entities sharing
/// z = 0 pass it trivially.
pub fn overlaps(pos_a: Vec3, pos_b: Vec3, size_a: Vec3, size_b: Vec3) -> bool {
    let min_a = pos_a - size_a / 2.0;
    let max_a = pos_a + size_a / 2.0;
    let min_b = pos_b - size_b / 2.0;
    let max_b = pos_b + size_b / 2.0;

    let overlap_x = min_a.x <= max_b.x && max_a.x >= min_b.x;
    let overlap_y = min_a.y <= max_b.y && max_a.y >= min_b.y;
    let overlap_z = min_a.z <= max_b.z && max_a.z >= min_b.z;

    overlap_x && overlap_y && overlap_z
}

/// [`overlaps`] for two transforms
#[inline]
pub fn transforms_overlap(a: &Transform, b: &Transform) -> bool {
    overlaps(a.position, b.position, a.scale, b.scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vec3() -> impl Strategy<Value = Vec3> {
        (-20.0f32..20.0, -20.0f32..20.0, -2.0f32..2.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
    }

    fn size() -> impl Strategy<Value = Vec3> {
        (0.01f32..12.0, 0.01f32..12.0, 0.01f32..2.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
    }

    #[test]
    fn test_touching_edges_collide() {
        // Boxes of width 1 whose faces meet exactly at x = 0.5
        assert!(overlaps(
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::ONE,
            Vec3::ONE
        ));
    }

    #[test]
    fn test_separated_on_x_misses() {
        assert!(!overlaps(
            Vec3::ZERO,
            Vec3::new(1.01, 0.0, 0.0),
            Vec3::ONE,
            Vec3::ONE
        ));
    }

    #[test]
    fn test_avatar_in_gap_misses_both_obstacles() {
        // Avatar centered in the gap between a lower and an upper obstacle
        let avatar = Transform::compose(Vec3::splat(0.25), Vec3::new(0.0, 0.0, 0.0));
        let lower = Transform::compose(Vec3::new(0.3, 10.0, 1.0), Vec3::new(0.0, -0.55, 0.0));
        let upper = Transform::compose(Vec3::new(0.3, 10.0, 1.0), Vec3::new(0.0, 0.55, 0.0));
        assert!(!transforms_overlap(&avatar, &lower));
        assert!(!transforms_overlap(&avatar, &upper));
    }

    #[test]
    fn test_avatar_touching_lower_obstacle_hits() {
        let lower = Transform::compose(Vec3::new(0.3, 10.0, 1.0), Vec3::new(0.0, -0.55, 0.0));
        // Lower obstacle top edge is at -5.5 + 5.0 = -0.5
        let avatar = Transform {
            position: Vec3::new(0.0, -0.45, 0.0),
            scale: Vec3::splat(0.25),
        };
        assert!(transforms_overlap(&avatar, &lower));
    }

    #[test]
    fn test_z_axis_is_checked() {
        assert!(!overlaps(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ONE,
            Vec3::ONE
        ));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in vec3(), b in vec3(), sa in size(), sb in size()) {
            prop_assert_eq!(overlaps(a, b, sa, sb), overlaps(b, a, sb, sa));
        }

        #[test]
        fn prop_identical_positions_overlap(p in vec3(), sa in size(), sb in size()) {
            prop_assert!(overlaps(p, p, sa, sb));
        }

        #[test]
        fn prop_separation_on_one_axis_never_overlaps(
            a in vec3(),
            b in vec3(),
            sa in size(),
            sb in size(),
            axis in 0usize..3,
            extra in 0.01f32..5.0,
        ) {
            // Push b away from a along `axis` beyond the sum of half extents
            let mut b = b;
            let gap = sa[axis] / 2.0 + sb[axis] / 2.0 + extra;
            b[axis] = a[axis] + gap;
            prop_assert!(!overlaps(a, b, sa, sb));
            b[axis] = a[axis] - gap;
            prop_assert!(!overlaps(a, b, sa, sb));
        }
    }
}
