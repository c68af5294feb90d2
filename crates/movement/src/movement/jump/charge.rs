use crate::movement::{MovementConfig, MovementState, TickContext};

use super::{JumpEngine, JumpKind, execute_buffered};

/// Every jump is a charged jump: the press always starts charging, charging
/// continues in the air, and the hold curve is applied even to taps.
///
/// A charge that hits the cap while airborne is discarded on the next tick,
/// so only charges released or landed before the cap carry over.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChargeReleaseJump;

impl JumpEngine for ChargeReleaseJump {
    fn kind(&self) -> JumpKind {
        JumpKind::ChargeRelease
    }

    fn on_pressed(&mut self, state: &mut MovementState, config: &MovementConfig) {
        state.is_jump_charging = true;
        state.jump_hold_counter = 0.0;
        if !state.is_grounded {
            state.arm_buffer(config);
        }
    }

    fn on_released(&mut self, state: &mut MovementState, config: &MovementConfig) {
        if state.is_jump_charging && state.jump_hold_counter < config.max_jump_hold_time {
            state.complete_charge(config);
        }
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        let config = ctx.config;
        let state = &mut *ctx.state;

        state.decay_timers(config, ctx.dt);

        if !state.is_grounded && !state.is_jump_charging && state.hold_at_cap(config) {
            state.jump_hold_counter = 0.0;
        }

        if state.is_jump_charging {
            state.accumulate_hold(config, ctx.dt);

            if state.hold_at_cap(config) {
                state.complete_charge(config);
            } else if state.just_landed && state.jump_hold_counter > 0.0 {
                state.complete_charge(config);
            }
        }
        state.just_landed = false;

        state.do_hold_jump = true;
        execute_buffered(ctx);
    }
}
