use glam::Vec2;

use super::MovementConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpPhase {
    #[default]
    Idle,
    Charging,
    BufferedPending,
    Executed,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovementState {
    pub is_grounded: bool,
    /// True only on the tick of an airborne to grounded transition.
    pub just_landed: bool,
    pub is_jump_charging: bool,

    pub coyote_time_counter: f32,
    pub jump_buffer_counter: f32,
    pub jump_hold_counter: f32,

    pub do_hold_jump: bool,
    pub last_grounded_position: Vec2,

    pub jumped_this_tick: bool,
    /// Vertical velocity on the most recent landing tick.
    pub landing_velocity: f32,
}

impl MovementState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(position: Vec2) -> Self {
        Self {
            last_grounded_position: position,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> JumpPhase {
        if self.jumped_this_tick {
            JumpPhase::Executed
        } else if self.jump_buffer_counter > 0.0 {
            JumpPhase::BufferedPending
        } else if self.is_jump_charging {
            JumpPhase::Charging
        } else {
            JumpPhase::Idle
        }
    }

    pub fn can_jump(&self) -> bool {
        self.is_grounded || self.coyote_time_counter > 0.0
    }

    pub fn hold_ratio(&self, config: &MovementConfig) -> f32 {
        (self.jump_hold_counter / config.max_jump_hold_time).clamp(0.0, 1.0)
    }

    pub fn decay_timers(&mut self, config: &MovementConfig, dt: f32) {
        self.jump_buffer_counter =
            (self.jump_buffer_counter - dt).clamp(0.0, config.jump_buffer_time);
        self.coyote_time_counter =
            (self.coyote_time_counter - dt).clamp(0.0, config.coyote_time);
    }

    pub fn accumulate_hold(&mut self, config: &MovementConfig, dt: f32) {
        self.jump_hold_counter =
            (self.jump_hold_counter + dt).clamp(0.0, config.max_jump_hold_time);
    }

    pub fn hold_at_cap(&self, config: &MovementConfig) -> bool {
        approximately(self.jump_hold_counter, config.max_jump_hold_time)
    }

    pub fn arm_buffer(&mut self, config: &MovementConfig) {
        self.jump_buffer_counter = config.jump_buffer_time;
    }

    /// Ends a charge and queues it as a held jump.
    pub fn complete_charge(&mut self, config: &MovementConfig) {
        self.arm_buffer(config);
        self.do_hold_jump = true;
        self.is_jump_charging = false;
    }

    pub fn clear_jump(&mut self) {
        self.coyote_time_counter = 0.0;
        self.jump_buffer_counter = 0.0;
        self.jump_hold_counter = 0.0;
        self.do_hold_jump = false;
    }
}

pub(crate) fn approximately(a: f32, b: f32) -> bool {
    const TOLERANCE: f32 = 1e-5;
    (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
}
