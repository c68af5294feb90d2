use crate::movement::{MovementConfig, MovementState, TickContext};

use super::{JumpEngine, JumpKind, execute_buffered};

/// Buffered, coyote-aware jump whose height is shaped by how long the button
/// is held while grounded.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardJump;

impl JumpEngine for StandardJump {
    fn kind(&self) -> JumpKind {
        JumpKind::Standard
    }

    fn on_pressed(&mut self, state: &mut MovementState, config: &MovementConfig) {
        if state.is_grounded {
            state.is_jump_charging = true;
            state.jump_hold_counter = 0.0;
        } else {
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

        if state.is_grounded && state.is_jump_charging {
            state.accumulate_hold(config, ctx.dt);
            if state.hold_at_cap(config) {
                state.complete_charge(config);
            }
        }

        // A charge cut short by a landing keeps whatever it accumulated.
        if state.just_landed && state.is_jump_charging && state.jump_hold_counter > 0.0 {
            state.complete_charge(config);
        }
        state.just_landed = false;

        execute_buffered(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::JumpPhase;

    #[test]
    fn grounded_press_starts_charge() {
        let config = MovementConfig::default();
        let mut state = MovementState {
            is_grounded: true,
            jump_hold_counter: 0.2,
            ..Default::default()
        };

        StandardJump.on_pressed(&mut state, &config);

        assert!(state.is_jump_charging);
        assert_eq!(state.jump_hold_counter, 0.0);
        assert_eq!(state.jump_buffer_counter, 0.0);
    }

    #[test]
    fn airborne_press_arms_buffer() {
        let config = MovementConfig::default();
        let mut state = MovementState::default();

        StandardJump.on_pressed(&mut state, &config);

        assert!(!state.is_jump_charging);
        assert_eq!(state.jump_buffer_counter, config.jump_buffer_time);
        assert!(!state.do_hold_jump);
    }

    #[test]
    fn short_tap_still_queues_held_jump() {
        let config = MovementConfig::default();
        let mut state = MovementState {
            is_grounded: true,
            ..Default::default()
        };

        StandardJump.on_pressed(&mut state, &config);
        state.jump_hold_counter = 0.05;
        StandardJump.on_released(&mut state, &config);

        assert_eq!(state.phase(), JumpPhase::BufferedPending);
        assert!(state.do_hold_jump);
        assert!(!state.is_jump_charging);
    }

    #[test]
    fn release_without_charge_is_ignored() {
        let config = MovementConfig::default();
        let mut state = MovementState::default();

        StandardJump.on_released(&mut state, &config);

        assert_eq!(state.phase(), JumpPhase::Idle);
    }
}
