use glam::Vec2;

use crate::movement::config::{ConfigError, non_negative};
use crate::movement::{MovementConfig, MovementState, TickContext};
use crate::physics::{Axis, LayerMask};

use super::{JumpEngine, JumpKind, execute_buffered};

#[derive(Debug, Clone, PartialEq)]
pub struct GroundPoundConfig {
    /// Downward impulse of the slam.
    pub pound_force: f32,
    /// Downward force per tick at full charge while the button is held airborne.
    pub bias_force: f32,
    /// Hold ratio in `[0, 1]` a release must exceed to slam.
    pub damage_threshold: f32,
    pub damage: f32,
    pub radius: f32,
    /// Impact circle centre relative to the character.
    pub offset: Vec2,
    pub damage_layer: LayerMask,
}

impl Default for GroundPoundConfig {
    fn default() -> Self {
        Self {
            pound_force: 100.0,
            bias_force: 20.0,
            damage_threshold: 0.5,
            damage: 1.0,
            radius: 1.0,
            offset: Vec2::new(0.0, -0.5),
            damage_layer: LayerMask::DAMAGEABLE,
        }
    }
}

impl GroundPoundConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("pound_force", self.pound_force)?;
        non_negative("bias_force", self.bias_force)?;
        non_negative("damage", self.damage)?;
        non_negative("radius", self.radius)?;
        if !(0.0..=1.0).contains(&self.damage_threshold) {
            return Err(ConfigError::DamageThreshold(self.damage_threshold));
        }
        Ok(())
    }
}

/// Grounded presses jump normally. Holding while airborne charges a slam that
/// drags the character down; releasing past the threshold slams, and the
/// next landing damages everything under the impact circle once.
#[derive(Debug, Clone, Default)]
pub struct GroundPoundJump {
    config: GroundPoundConfig,
    slam_pending: bool,
    slam_armed: bool,
}

impl GroundPoundJump {
    pub fn new(config: GroundPoundConfig) -> Self {
        Self {
            config,
            slam_pending: false,
            slam_armed: false,
        }
    }

    pub fn config(&self) -> &GroundPoundConfig {
        &self.config
    }

    pub fn is_slam_armed(&self) -> bool {
        self.slam_pending || self.slam_armed
    }

    fn impact(&mut self, ctx: &mut TickContext<'_>) {
        let center = ctx.physics.position() + self.config.offset;
        let mut targets =
            ctx.physics
                .overlap_circle_multi(center, self.config.radius, self.config.damage_layer);
        targets.sort_unstable();
        targets.dedup();

        let mut hits = 0;
        for target in targets {
            if ctx.damage.deal_damage(target, self.config.damage) {
                hits += 1;
            }
        }
        log::debug!("ground pound impact at {center}: {hits} target(s) damaged");
    }
}

impl JumpEngine for GroundPoundJump {
    fn kind(&self) -> JumpKind {
        JumpKind::GroundPound
    }

    fn on_pressed(&mut self, state: &mut MovementState, config: &MovementConfig) {
        if state.is_grounded {
            state.arm_buffer(config);
            state.do_hold_jump = false;
        } else {
            state.is_jump_charging = true;
            state.jump_hold_counter = 0.0;
        }
    }

    fn on_released(&mut self, state: &mut MovementState, config: &MovementConfig) {
        if !state.is_jump_charging {
            return;
        }
        state.is_jump_charging = false;

        if state.hold_ratio(config) > self.config.damage_threshold {
            self.slam_pending = true;
        }
        state.jump_hold_counter = 0.0;
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        ctx.state.decay_timers(ctx.config, ctx.dt);

        if ctx.state.is_jump_charging {
            if ctx.state.is_grounded {
                ctx.state.is_jump_charging = false;
                ctx.state.jump_hold_counter = 0.0;
            } else {
                ctx.state.accumulate_hold(ctx.config, ctx.dt);
                let ratio = ctx.state.hold_ratio(ctx.config);
                ctx.physics
                    .apply_force(Axis::Y, -self.config.bias_force * ratio);
            }
        }

        if self.slam_pending {
            self.slam_pending = false;
            self.slam_armed = true;
            ctx.physics.apply_impulse(Axis::Y, -self.config.pound_force.abs());
            log::trace!("ground pound slam");
        }

        if ctx.state.just_landed && self.slam_armed {
            self.slam_armed = false;
            self.impact(ctx);
        }
        ctx.state.just_landed = false;

        execute_buffered(ctx);
    }

    fn on_unregister(&mut self, state: &mut MovementState) {
        self.slam_pending = false;
        self.slam_armed = false;
        state.is_jump_charging = false;
        state.jump_hold_counter = 0.0;
        state.do_hold_jump = false;
    }
}
