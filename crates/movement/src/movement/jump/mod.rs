//! Jump engines: the strategies that turn press/release edges and the
//! grounded, coyote and buffer timers into vertical impulses.
//!
//! Every engine runs the same per-tick skeleton: decay the timers, advance
//! its charge, consume `just_landed`, then fire a buffered jump if the
//! character is grounded or inside the coyote window.

mod charge;
mod ground_pound;
mod standard;

pub use charge::ChargeReleaseJump;
pub use ground_pound::{GroundPoundConfig, GroundPoundJump};
pub use standard::StandardJump;

use crate::curve::CurveEval;
use crate::physics::Axis;

use super::{MovementConfig, MovementState, TickContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JumpKind {
    Standard,
    ChargeRelease,
    GroundPound,
    /// Engines defined outside this crate.
    Custom(&'static str),
}

impl JumpKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::ChargeRelease => "charge-release",
            Self::GroundPound => "ground-pound",
            Self::Custom(name) => name,
        }
    }
}

pub trait JumpEngine {
    fn kind(&self) -> JumpKind;

    fn on_pressed(&mut self, state: &mut MovementState, config: &MovementConfig);

    fn on_released(&mut self, state: &mut MovementState, config: &MovementConfig);

    fn update(&mut self, ctx: &mut TickContext<'_>);

    /// Drops any charge in progress so the next engine starts clean.
    fn on_unregister(&mut self, state: &mut MovementState) {
        state.is_jump_charging = false;
        state.jump_hold_counter = 0.0;
        state.do_hold_jump = false;
    }
}

/// Impulse that brings vertical velocity to the jump's target speed.
pub fn jump_impulse(config: &MovementConfig, state: &MovementState, vertical_velocity: f32) -> f32 {
    let multiplier = if state.do_hold_jump {
        config.hold_jump_curve.evaluate(state.hold_ratio(config))
    } else {
        1.0
    };
    config.jump_force * multiplier - vertical_velocity
}

/// Fires the buffered jump when the grounded or coyote window allows it.
pub(crate) fn execute_buffered(ctx: &mut TickContext<'_>) -> bool {
    if !ctx.state.can_jump() || ctx.state.jump_buffer_counter <= 0.0 {
        return false;
    }

    let vertical_velocity = ctx.physics.velocity().y;
    let impulse = jump_impulse(ctx.config, ctx.state, vertical_velocity);
    ctx.physics.apply_impulse(Axis::Y, impulse);

    log::trace!(
        "jump fired: impulse={impulse:.3} hold={:.3} held={} grounded={}",
        ctx.state.jump_hold_counter,
        ctx.state.do_hold_jump,
        ctx.state.is_grounded
    );

    ctx.state.clear_jump();
    ctx.state.jumped_this_tick = true;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{Curve, Keyframe};

    #[test]
    fn held_impulse_follows_curve_over_whole_hold_range() {
        let config = MovementConfig {
            jump_force: 12.0,
            max_jump_hold_time: 0.3,
            hold_jump_curve: Curve::linear(Keyframe::new(0.0, 0.5), Keyframe::new(1.0, 1.0))
                .unwrap(),
            ..Default::default()
        };

        for step in 0..=30 {
            let hold = step as f32 * 0.01;
            let state = MovementState {
                do_hold_jump: true,
                jump_hold_counter: hold,
                ..Default::default()
            };
            let expected = 12.0 * config.hold_jump_curve.evaluate(hold / 0.3) - 1.5;
            assert!((jump_impulse(&config, &state, 1.5) - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn tap_impulse_ignores_curve() {
        let config = MovementConfig {
            jump_force: 12.0,
            hold_jump_curve: Curve::constant(0.1),
            ..Default::default()
        };
        let state = MovementState::default();
        assert_eq!(jump_impulse(&config, &state, -3.0), 15.0);
    }
}
