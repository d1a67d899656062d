//! Entity transforms
//!
//! A transform places the shared unit quad in world space. Composition order
//! is fixed: scale about the origin first, then translate. Incremental moves
//! are expressed in the already-scaled local space, so every translation is
//! multiplied by the scale before it reaches world space.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// World-space placement of one entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// World-space translation (the matrix's fourth column)
    pub position: Vec3,
    /// Per-axis scale, strictly positive and fixed for the entity's lifetime
    pub scale: Vec3,
}

impl Transform {
    /// Scale first, then translate by `translation` in local units
    pub fn compose(scale: Vec3, translation: Vec3) -> Self {
        Self {
            position: scale * translation,
            scale,
        }
    }

    /// Move by `delta` local units (world displacement is `delta * scale`)
    #[inline]
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta * self.scale;
    }

    /// Value-returning form of [`Transform::translate`]
    #[inline]
    pub fn translated(mut self, delta: Vec3) -> Self {
        self.translate(delta);
        self
    }

    /// Model matrix for the GPU
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_scale(self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_compose_scales_translation() {
        let t = Transform::compose(Vec3::splat(0.25), Vec3::new(-5.0, 0.0, 0.0));
        assert_eq!(t.position, Vec3::new(-1.25, 0.0, 0.0));
        assert_eq!(t.scale, Vec3::splat(0.25));
    }

    #[test]
    fn test_translate_is_in_local_units() {
        let mut t = Transform::compose(Vec3::new(0.3, 10.0, 1.0), Vec3::ZERO);
        t.translate(Vec3::new(1.0, 1.0, 0.0));
        assert!((t.position.x - 0.3).abs() < 1e-6);
        assert!((t.position.y - 10.0).abs() < 1e-6);
        assert_eq!(t.position.z, 0.0);
    }

    #[test]
    fn test_matrix_matches_scale_then_translate() {
        let t = Transform::compose(Vec3::new(0.3, 10.0, 1.0), Vec3::new(8.0, 0.55, 0.0));
        let m = t.matrix();
        // Quad corner (0.5, 0.5) lands at position + 0.5 * scale
        let corner = m.transform_point3(Vec3::new(0.5, 0.5, 0.0));
        let expected = t.position + Vec3::new(0.15, 5.0, 0.0);
        assert!((corner - expected).length() < 1e-5);
        assert_eq!(m.w_axis.truncate(), t.position);
    }

    proptest! {
        #[test]
        fn prop_vertical_translate_scales_by_scale_y(
            y in -50.0f32..50.0,
            sy in 0.01f32..20.0,
            v in -20.0f32..20.0,
            dt in 0.0f32..1.0,
        ) {
            let t = Transform {
                position: Vec3::new(-1.25, y, 0.0),
                scale: Vec3::new(0.25, sy, 0.25),
            };
            let moved = t.translated(Vec3::new(0.0, v * dt, 0.0));
            prop_assert_eq!(moved.position.y, t.position.y + v * dt * t.scale.y);
            prop_assert_eq!(moved.position.x, t.position.x);
            prop_assert_eq!(moved.scale, t.scale);
        }
    }
}
