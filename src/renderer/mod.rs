//! Rendering module
//!
//! Every entity is the same unit quad placed by its transform. The simulation
//! only talks to [`RenderAdapter`]; the WebGPU pipeline is one implementation,
//! [`DrawRecorder`] another for headless runs and tests.

pub mod camera;
pub mod pipeline;
pub mod recorder;
pub mod vertex;

pub use camera::Camera;
pub use pipeline::QuadRenderer;
pub use recorder::DrawRecorder;

use crate::sim::{GameState, Transform};

/// Draws the shared unit quad with a given transform
pub trait RenderAdapter {
    fn draw_quad(&mut self, transform: &Transform);
}

/// Submit every entity in fixed draw order: avatar, then each pair upper/lower
pub fn submit_frame<R: RenderAdapter + ?Sized>(state: &GameState, renderer: &mut R) {
    for transform in state.draw_order() {
        renderer.draw_quad(transform);
    }
}
