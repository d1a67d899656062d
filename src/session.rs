//! Host-agnostic frame loop
//!
//! One call to [`Session::frame`] is one fully synchronous frame: sample the
//! clock and input, tick the simulation, then hand every entity to the
//! render adapter. The host owns the window and decides what to do with the
//! returned [`FrameOutcome`].

use crate::platform::{Clock, FrameClock, InputSource};
use crate::renderer::{RenderAdapter, submit_frame};
use crate::settings::{GravityMode, Settings};
use crate::sim::{GameEvent, GameState, SessionPhase, SessionStats, TickInput, tick};

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Frame presented; keep going
    Continue,
    /// Host asked to quit before this frame was simulated
    Quit,
    /// Avatar collided; session is over and nothing was presented
    Ended,
}

/// A running session plus the timing state that drives it
pub struct Session {
    pub state: GameState,
    frame_clock: FrameClock,
    gravity: GravityMode,
}

impl Session {
    pub fn new(settings: &Settings, seed: u64, clock: &impl Clock) -> Self {
        log::info!(
            "Session starting (seed {}, gravity {}, max dt {:?})",
            seed,
            settings.gravity.as_str(),
            settings.max_frame_dt
        );
        Self {
            state: GameState::new(seed),
            frame_clock: FrameClock::new(clock, settings.max_frame_dt),
            gravity: settings.gravity,
        }
    }

    /// Run one frame with input polled from `input`
    pub fn frame<R: RenderAdapter + ?Sized>(
        &mut self,
        clock: &impl Clock,
        input: &impl InputSource,
        renderer: &mut R,
    ) -> FrameOutcome {
        let tick_input = TickInput {
            ascend: input.ascend_held(),
        };
        self.frame_with(clock, input.quit_requested(), &tick_input, renderer)
    }

    /// Run one frame with an explicit tick input
    pub fn frame_with<R: RenderAdapter + ?Sized>(
        &mut self,
        clock: &impl Clock,
        quit: bool,
        input: &TickInput,
        renderer: &mut R,
    ) -> FrameOutcome {
        if self.state.phase == SessionPhase::Ended {
            return FrameOutcome::Ended;
        }
        if quit {
            return FrameOutcome::Quit;
        }

        let dt = self.frame_clock.delta(clock);
        tick(&mut self.state, input, dt, self.gravity);

        for event in &self.state.events {
            if let GameEvent::Recycled { pair } = event {
                log::trace!("frame {}: pair {} recycled", self.state.stats.frames, pair);
            }
        }

        if self.state.phase == SessionPhase::Ended {
            return FrameOutcome::Ended;
        }

        submit_frame(&self.state, renderer);
        FrameOutcome::Continue
    }

    pub fn stats(&self) -> SessionStats {
        self.state.stats
    }

    /// Log the end-of-session summary
    pub fn log_summary(&self, outcome: FrameOutcome) {
        let stats = self.state.stats;
        log::info!(
            "Session finished ({:?}): {} frames, {:.2}s simulated, {} pairs recycled",
            outcome,
            stats.frames,
            stats.elapsed,
            stats.recycles
        );
    }
}
