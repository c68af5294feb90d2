use glam::Vec2;

use crate::physics::{CharacterPhysics, DamageRouter};

use super::{MovementConfig, MovementState};

/// Everything a subsystem may touch during one fixed tick.
pub struct TickContext<'a> {
    pub physics: &'a mut dyn CharacterPhysics,
    pub state: &'a mut MovementState,
    pub config: &'a MovementConfig,
    pub damage: &'a mut dyn DamageRouter,
    /// Latest sample of the analog move axis.
    pub move_axis: Vec2,
    pub dt: f32,
}
