use std::sync::Arc;
use std::time::Duration;

use glam::Vec2;

use crate::effects::LandingSquash;
use crate::input::{BindingId, InputRouter, JumpEdge};
use crate::physics::{BodyMode, CharacterPhysics, DamageRouter, NoDamage};

use super::lifecycle::DEFAULT_SETTLE_DELAY;
use super::{
    ApexHorizontalMover, CircleGroundDetector, GroundDetector, HorizontalMover, JumpEngine,
    JumpKind, Lifecycle, MovementConfig, MovementState, StandardJump, TickContext,
};

struct JumpSlot {
    engine: Box<dyn JumpEngine>,
    binding: BindingId,
}

/// Owns one character's movement state and the three subsystem slots, and
/// runs them in ground, jump, horizontal order every fixed tick.
pub struct MovementController {
    config: Arc<MovementConfig>,
    state: MovementState,
    jump: Option<JumpSlot>,
    jump_stack: Vec<Box<dyn JumpEngine>>,
    ground: Option<Box<dyn GroundDetector>>,
    horizontal: Option<Box<dyn HorizontalMover>>,
    input: InputRouter,
    damage: Box<dyn DamageRouter>,
    lifecycle: Lifecycle,
    squash: LandingSquash,
    settle_delay: Duration,
}

impl MovementController {
    /// A controller with every slot empty.
    pub fn new(config: Arc<MovementConfig>, damage: Box<dyn DamageRouter>) -> Self {
        Self {
            config,
            state: MovementState::new(),
            jump: None,
            jump_stack: Vec::new(),
            ground: None,
            horizontal: None,
            input: InputRouter::new(),
            damage,
            lifecycle: Lifecycle::Active,
            squash: LandingSquash::default(),
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    pub fn with_defaults(config: Arc<MovementConfig>, damage: Box<dyn DamageRouter>) -> Self {
        let mut controller = Self::new(config, damage);
        controller.register_ground(Box::new(CircleGroundDetector::default()));
        controller.register_jump(Box::new(StandardJump));
        controller.register_horizontal(Box::new(ApexHorizontalMover));
        controller
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn state(&self) -> &MovementState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut MovementState {
        &mut self.state
    }

    pub fn input(&self) -> &InputRouter {
        &self.input
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn visual_scale(&self) -> Vec2 {
        self.squash.scale()
    }

    pub fn squash(&self) -> &LandingSquash {
        &self.squash
    }

    // --- jump slot ---

    pub fn jump_kind(&self) -> Option<JumpKind> {
        self.jump.as_ref().map(|slot| slot.engine.kind())
    }

    /// Binds `engine`, detaching and returning whatever held the slot.
    pub fn register_jump(&mut self, engine: Box<dyn JumpEngine>) -> Option<Box<dyn JumpEngine>> {
        let previous = self.unregister_jump();

        let binding = self.input.bind(engine.kind());
        log::debug!("registered jump engine {}", engine.kind().name());
        self.jump = Some(JumpSlot { engine, binding });

        previous
    }

    pub fn unregister_jump(&mut self) -> Option<Box<dyn JumpEngine>> {
        let JumpSlot {
            mut engine,
            binding,
        } = self.jump.take()?;

        self.input.unbind(binding);
        engine.on_unregister(&mut self.state);
        log::debug!("unregistered jump engine {}", engine.kind().name());

        Some(engine)
    }

    /// Swaps in `engine`, saving the current one so `pop_jump` can restore it.
    pub fn push_jump(&mut self, engine: Box<dyn JumpEngine>) {
        if let Some(previous) = self.unregister_jump() {
            self.jump_stack.push(previous);
        }
        self.register_jump(engine);
    }

    /// Removes the active engine and restores the one saved beneath it, or a
    /// [`StandardJump`] when nothing was saved.
    pub fn pop_jump(&mut self) -> Option<Box<dyn JumpEngine>> {
        let removed = self.unregister_jump();
        let restored = self
            .jump_stack
            .pop()
            .unwrap_or_else(|| Box::new(StandardJump));
        self.register_jump(restored);
        removed
    }

    pub fn jump_stack_depth(&self) -> usize {
        self.jump_stack.len()
    }

    // --- ground slot ---

    pub fn ground_detector(&self) -> Option<&dyn GroundDetector> {
        self.ground.as_deref()
    }

    pub fn register_ground(
        &mut self,
        mut detector: Box<dyn GroundDetector>,
    ) -> Option<Box<dyn GroundDetector>> {
        let previous = self.unregister_ground();
        detector.on_register();
        log::debug!("registered ground detector {}", detector.name());
        self.ground = Some(detector);
        previous
    }

    pub fn unregister_ground(&mut self) -> Option<Box<dyn GroundDetector>> {
        let mut detector = self.ground.take()?;
        detector.on_unregister();
        log::debug!("unregistered ground detector {}", detector.name());
        Some(detector)
    }

    // --- horizontal slot ---

    pub fn horizontal_mover(&self) -> Option<&dyn HorizontalMover> {
        self.horizontal.as_deref()
    }

    pub fn register_horizontal(
        &mut self,
        mut mover: Box<dyn HorizontalMover>,
    ) -> Option<Box<dyn HorizontalMover>> {
        let previous = self.unregister_horizontal();
        mover.on_register();
        log::debug!("registered horizontal mover {}", mover.name());
        self.horizontal = Some(mover);
        previous
    }

    pub fn unregister_horizontal(&mut self) -> Option<Box<dyn HorizontalMover>> {
        let mut mover = self.horizontal.take()?;
        mover.on_unregister();
        log::debug!("unregistered horizontal mover {}", mover.name());
        Some(mover)
    }

    // --- input ---

    pub fn on_jump_pressed(&mut self) {
        self.handle_jump(JumpEdge::Pressed);
    }

    pub fn on_jump_released(&mut self) {
        self.handle_jump(JumpEdge::Released);
    }

    fn handle_jump(&mut self, edge: JumpEdge) {
        if !self.lifecycle.accepts_input() {
            log::warn!("ignoring {edge:?} while {}", self.lifecycle);
            return;
        }
        let Some(slot) = self.jump.as_mut() else {
            return;
        };

        // Only the binding held by the live slot reaches its engine.
        for binding in self.input.route(edge) {
            if binding != slot.binding {
                log::warn!("jump input {binding:?} has no live engine");
                continue;
            }
            match edge {
                JumpEdge::Pressed => slot.engine.on_pressed(&mut self.state, &self.config),
                JumpEdge::Released => slot.engine.on_released(&mut self.state, &self.config),
            }
        }
    }

    /// Variable-rate sample of the analog axis; read by the next fixed tick.
    pub fn set_move_axis(&mut self, axis: Vec2) {
        self.input.set_move_axis(axis);
    }

    // --- simulation ---

    pub fn fixed_tick(&mut self, dt: f32, physics: &mut dyn CharacterPhysics) {
        if !self.lifecycle.is_active() {
            return;
        }

        self.state.jumped_this_tick = false;

        let mut ctx = TickContext {
            physics,
            state: &mut self.state,
            config: &*self.config,
            damage: &mut *self.damage,
            move_axis: self.input.move_axis(),
            dt,
        };

        if let Some(ground) = self.ground.as_mut() {
            ground.update(&mut ctx);
        }

        if ctx.state.just_landed {
            self.squash.start_for_landing(ctx.state.landing_velocity);
        }

        if let Some(slot) = self.jump.as_mut() {
            slot.engine.update(&mut ctx);
        }

        if let Some(horizontal) = self.horizontal.as_mut() {
            horizontal.update(&mut ctx);
        }

        self.state.just_landed = false;
        self.squash.advance(dt);
    }

    // --- despawn / respawn ---

    /// Disables control and freezes the body, then suspends for the settle
    /// delay before reporting `Despawned`.
    pub async fn despawn(&mut self, physics: &mut dyn CharacterPhysics) {
        self.begin_despawn(physics);
        tokio::time::sleep(self.settle_delay).await;
        self.finish_despawn();
    }

    pub async fn respawn(&mut self, physics: &mut dyn CharacterPhysics) {
        self.restore(physics);
    }

    /// Hazard workflow: despawn, wait out the settle delay, respawn.
    pub async fn respawn_cycle(&mut self, physics: &mut dyn CharacterPhysics) {
        self.despawn(physics).await;
        self.respawn(physics).await;
    }

    fn begin_despawn(&mut self, physics: &mut dyn CharacterPhysics) {
        self.set_lifecycle(Lifecycle::Despawning);
        self.input.set_enabled(false);
        physics.set_body_mode(BodyMode::Static);
    }

    fn finish_despawn(&mut self) {
        if self.lifecycle == Lifecycle::Despawning {
            self.set_lifecycle(Lifecycle::Despawned);
        }
    }

    fn restore(&mut self, physics: &mut dyn CharacterPhysics) {
        self.set_lifecycle(Lifecycle::Respawning);

        self.input.set_enabled(true);
        physics.set_position(self.state.last_grounded_position);
        physics.set_velocity(Vec2::ZERO);
        physics.set_body_mode(BodyMode::Dynamic);

        let anchor = self.state.last_grounded_position;
        self.state = MovementState::at(anchor);

        self.set_lifecycle(Lifecycle::Active);
        log::info!("respawned at {anchor}");
    }

    fn set_lifecycle(&mut self, next: Lifecycle) {
        log::debug!("lifecycle {} -> {}", self.lifecycle, next);
        self.lifecycle = next;
    }
}

impl Default for MovementController {
    fn default() -> Self {
        Self::with_defaults(Arc::new(MovementConfig::default()), Box::new(NoDamage))
    }
}
