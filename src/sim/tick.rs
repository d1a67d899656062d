//! Variable timestep simulation tick
//!
//! Core game loop step: input, integration, scrolling, collision, recycling.

use super::collision::transforms_overlap;
use super::state::{GameEvent, GameState, Member, SessionPhase};
use crate::consts::*;
use crate::settings::GravityMode;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Ascend held (space)
    pub ascend: bool,
}

/// Advance the session by one frame of `dt` seconds
///
/// `dt` is used as given; any clamping is the caller's decision.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, gravity: GravityMode) {
    state.events.clear();

    if state.phase == SessionPhase::Ended {
        return;
    }

    state.stats.frames += 1;
    state.stats.elapsed += f64::from(dt);

    // Ascend is an absolute assignment, not an impulse
    if input.ascend {
        state.avatar.velocity = ASCEND_VELOCITY;
    } else {
        state.avatar.velocity -= match gravity {
            GravityMode::PerFrame => GRAVITY_PER_FRAME,
            GravityMode::PerSecond => GRAVITY_PER_FRAME * GRAVITY_REFERENCE_HZ * dt,
        };
    }
    state.avatar.integrate(dt);

    for pair in &mut state.pairs {
        pair.advance(dt);
    }

    if let Some((pair, member)) = find_collision(state) {
        log::info!(
            "Collision with pair {} ({:?}) after {} frames",
            pair,
            member,
            state.stats.frames
        );
        state.events.push(GameEvent::Collision { pair, member });
        state.phase = SessionPhase::Ended;
        return;
    }

    for (index, pair) in state.pairs.iter_mut().enumerate() {
        if pair.maybe_recycle(&mut state.rng) {
            log::debug!(
                "Recycled pair {} (gap lower {:.3}, upper {:.3})",
                index,
                pair.lower.position.y,
                pair.upper.position.y
            );
            state.stats.recycles += 1;
            state.events.push(GameEvent::Recycled { pair: index });
        }
    }
}

/// First obstacle member the avatar overlaps, in pool order
fn find_collision(state: &GameState) -> Option<(usize, Member)> {
    let avatar = &state.avatar.transform;
    state.pairs.iter().enumerate().find_map(|(index, pair)| {
        if transforms_overlap(avatar, &pair.upper) {
            Some((index, Member::Upper))
        } else if transforms_overlap(avatar, &pair.lower) {
            Some((index, Member::Lower))
        } else {
            None
        }
    })
}

/// Demo input: flap when the avatar sinks toward the bottom of the next gap
pub fn autopilot(state: &GameState) -> TickInput {
    let avatar = &state.avatar.transform;
    let avatar_left = avatar.position.x - avatar.scale.x / 2.0;

    // Nearest pair whose right edge is still ahead of the avatar
    let next_gap = state
        .pairs
        .iter()
        .filter(|pair| pair.x() + pair.lower.scale.x / 2.0 >= avatar_left)
        .min_by(|a, b| a.x().total_cmp(&b.x()))
        .map(|pair| {
            let gap_bottom = pair.lower.position.y + pair.lower.scale.y / 2.0;
            let gap_top = pair.upper.position.y - pair.upper.scale.y / 2.0;
            (gap_bottom, gap_top)
        });

    let (gap_bottom, gap_top) = next_gap.unwrap_or((-0.5, 0.5));
    let floor = gap_bottom + (gap_top - gap_bottom) * 0.2;

    TickInput {
        ascend: avatar.position.y < floor && state.avatar.velocity <= 0.0,
    }
}
