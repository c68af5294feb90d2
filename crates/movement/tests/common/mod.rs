#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use glam::Vec2;
use platformer::{
    Axis, BodyId, BodyMode, CharacterPhysics, ColliderId, JumpEngine, JumpKind, LayerMask,
    MovementConfig, MovementController, MovementState, NoDamage, TickContext,
};

pub const FLOOR: ColliderId = ColliderId(1);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Call {
    TickStart,
    Impulse(Axis, f32),
    Force(Axis, f32),
}

/// Stand-in physics body whose ground contact is set by the test.
#[derive(Debug, Default)]
pub struct ScriptedBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub mode: BodyMode,
    pub on_ground: bool,
    pub head: Option<ColliderId>,
    pub targets: Vec<BodyId>,
    pub multi_queries: Cell<usize>,
    pub calls: Vec<Call>,
}

impl ScriptedBody {
    pub fn impulses(&self, axis: Axis) -> Vec<f32> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Impulse(a, m) if *a == axis => Some(*m),
                _ => None,
            })
            .collect()
    }

    pub fn forces(&self, axis: Axis) -> Vec<f32> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Force(a, m) if *a == axis => Some(*m),
                _ => None,
            })
            .collect()
    }
}

impl CharacterPhysics for ScriptedBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn apply_impulse(&mut self, axis: Axis, magnitude: f32) {
        self.calls.push(Call::Impulse(axis, magnitude));
        self.velocity += axis.unit() * magnitude;
    }

    fn apply_force(&mut self, axis: Axis, magnitude: f32) {
        self.calls.push(Call::Force(axis, magnitude));
    }

    fn body_mode(&self) -> BodyMode {
        self.mode
    }

    fn set_body_mode(&mut self, mode: BodyMode) {
        self.mode = mode;
    }

    fn overlap_circle(&self, center: Vec2, _radius: f32, _mask: LayerMask) -> Option<ColliderId> {
        if center.y < self.position.y {
            self.on_ground.then_some(FLOOR)
        } else {
            self.head
        }
    }

    fn overlap_circle_multi(&self, _center: Vec2, _radius: f32, _mask: LayerMask) -> Vec<BodyId> {
        self.multi_queries.set(self.multi_queries.get() + 1);
        self.targets.clone()
    }
}

pub struct Rig {
    pub controller: MovementController,
    pub body: ScriptedBody,
    pub dt: f32,
}

impl Rig {
    pub fn new(config: MovementConfig, dt: f32) -> Self {
        Self {
            controller: MovementController::with_defaults(Arc::new(config), Box::new(NoDamage)),
            body: ScriptedBody::default(),
            dt,
        }
    }

    pub fn tick(&mut self) {
        self.body.calls.push(Call::TickStart);
        self.controller.fixed_tick(self.dt, &mut self.body);
    }

    pub fn ticks(&mut self, n: usize) {
        for _ in 0..n {
            self.tick();
        }
    }

    /// Grounds the character and runs the landing tick.
    pub fn land(&mut self) {
        self.body.on_ground = true;
        self.body.velocity.y = self.body.velocity.y.min(0.0);
        self.tick();
    }

    pub fn leave_ground(&mut self) {
        self.body.on_ground = false;
    }

    pub fn jumps(&self) -> Vec<f32> {
        self.body.impulses(Axis::Y)
    }

    pub fn state(&self) -> &MovementState {
        self.controller.state()
    }
}

/// Jump engine that only records what it sees.
#[derive(Clone, Default)]
pub struct Recorder {
    pub presses: Rc<RefCell<usize>>,
    pub landings: Rc<RefCell<Vec<bool>>>,
}

impl JumpEngine for Recorder {
    fn kind(&self) -> JumpKind {
        JumpKind::Custom("recorder")
    }

    fn on_pressed(&mut self, _state: &mut MovementState, _config: &MovementConfig) {
        *self.presses.borrow_mut() += 1;
    }

    fn on_released(&mut self, _state: &mut MovementState, _config: &MovementConfig) {}

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        self.landings.borrow_mut().push(ctx.state.just_landed);
    }
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}
