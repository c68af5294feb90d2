pub mod curve;
pub mod effects;
pub mod input;
pub mod movement;
pub mod physics;
pub mod powerup;
pub mod simulation;

pub use curve::{Curve, CurveError, CurveEval, Keyframe};
pub use effects::{LandingSquash, TweenToken};
pub use input::{BindingId, InputRouter, JumpEdge};
pub use movement::{
    ApexHorizontalMover, ChargeReleaseJump, CircleGroundDetector, ConfigError, GroundDetector,
    GroundPoundConfig, GroundPoundJump, GroundProbe, HorizontalMover, JumpEngine, JumpKind,
    JumpPhase, Lifecycle, MovementConfig, MovementController, MovementState, StandardJump,
    TickContext,
};
pub use physics::{
    Axis, BodyId, BodyMode, CharacterPhysics, ColliderId, DamageRouter, LayerMask, NoDamage,
    PhysicsWorld, RapierCharacter,
};
pub use powerup::{InventoryItem, JumpPowerUp};
pub use simulation::{FixedTimestep, Stage, Target, TargetRegistry};
