use bitflags::bitflags;
use glam::Vec2;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LayerMask: u32 {
        const GROUND = 1 << 0;
        const DAMAGEABLE = 1 << 1;
        const HAZARD = 1 << 2;
        const PLAYER = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn unit(self) -> Vec2 {
        match self {
            Self::X => Vec2::X,
            Self::Y => Vec2::Y,
        }
    }

    pub fn component(self, v: Vec2) -> f32 {
        match self {
            Self::X => v.x,
            Self::Y => v.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyMode {
    #[default]
    Dynamic,
    Static,
}

/// The physics body of one character plus the overlap queries the movement
/// core issues around it.
pub trait CharacterPhysics {
    fn position(&self) -> Vec2;
    fn velocity(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);
    fn set_velocity(&mut self, velocity: Vec2);

    fn apply_impulse(&mut self, axis: Axis, magnitude: f32);
    fn apply_force(&mut self, axis: Axis, magnitude: f32);

    fn body_mode(&self) -> BodyMode;
    fn set_body_mode(&mut self, mode: BodyMode);

    /// First collider on `mask` overlapping the circle, ignoring the character itself.
    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> Option<ColliderId>;

    /// Bodies owning colliders on `mask` that overlap the circle. A body with
    /// several colliders may appear more than once.
    fn overlap_circle_multi(&self, center: Vec2, radius: f32, mask: LayerMask) -> Vec<BodyId>;
}

pub trait DamageRouter {
    /// Returns false when no damageable target is registered for `target`.
    fn deal_damage(&mut self, target: BodyId, amount: f32) -> bool;
}

#[derive(Debug, Default)]
pub struct NoDamage;

impl DamageRouter for NoDamage {
    fn deal_damage(&mut self, _target: BodyId, _amount: f32) -> bool {
        false
    }
}
