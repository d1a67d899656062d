//! Render adapter that records transforms instead of drawing

use super::RenderAdapter;
use crate::sim::Transform;

/// Keeps the quads of the most recent frame
#[derive(Debug, Clone, Default)]
pub struct DrawRecorder {
    /// Transforms drawn since the last [`DrawRecorder::begin_frame`]
    pub frame: Vec<Transform>,
    /// Total quads drawn over the recorder's lifetime
    pub total_draws: u64,
}

impl DrawRecorder {
    pub fn begin_frame(&mut self) {
        self.frame.clear();
    }
}

impl RenderAdapter for DrawRecorder {
    fn draw_quad(&mut self, transform: &Transform) {
        self.frame.push(*transform);
        self.total_draws += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::submit_frame;
    use crate::sim::GameState;

    #[test]
    fn test_submit_frame_draws_in_fixed_order() {
        let state = GameState::new(3);
        let mut recorder = DrawRecorder::default();
        submit_frame(&state, &mut recorder);

        assert_eq!(recorder.frame.len(), 1 + 2 * state.pairs.len());
        assert_eq!(recorder.frame[0], state.avatar.transform);
        assert_eq!(recorder.frame[1], state.pairs[0].upper);
        assert_eq!(recorder.frame[2], state.pairs[0].lower);
        assert_eq!(recorder.frame[5], state.pairs[2].upper);
        assert_eq!(recorder.frame[6], state.pairs[2].lower);

        recorder.begin_frame();
        assert!(recorder.frame.is_empty());
        assert_eq!(recorder.total_draws, 7);
    }
}
