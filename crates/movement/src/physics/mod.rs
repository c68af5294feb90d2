mod body;
mod world;

pub use body::{
    Axis, BodyId, BodyMode, CharacterPhysics, ColliderId, DamageRouter, LayerMask, NoDamage,
};
pub use world::{PhysicsWorld, RapierCharacter, body_id, collider_id};
