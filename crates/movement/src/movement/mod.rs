mod config;
mod context;
mod controller;
mod ground;
mod horizontal;
pub mod jump;
mod lifecycle;
mod state;

pub use config::{ConfigError, MovementConfig};
pub use context::TickContext;
pub use controller::MovementController;
pub use ground::{CircleGroundDetector, GroundDetector, GroundProbe};
pub use horizontal::{ApexHorizontalMover, HorizontalMover};
pub use jump::{
    ChargeReleaseJump, GroundPoundConfig, GroundPoundJump, JumpEngine, JumpKind, StandardJump,
    jump_impulse,
};
pub use lifecycle::{DEFAULT_SETTLE_DELAY, Lifecycle};
pub use state::{JumpPhase, MovementState};
