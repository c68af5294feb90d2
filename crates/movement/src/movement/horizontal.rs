use crate::curve::CurveEval;
use crate::physics::Axis;

use super::TickContext;

const AXIS_DEADZONE: f32 = 1e-3;

pub trait HorizontalMover {
    fn name(&self) -> &'static str;

    fn on_register(&mut self) {}

    fn on_unregister(&mut self) {}

    fn update(&mut self, ctx: &mut TickContext<'_>);
}

/// Pushes along X while under the speed cap. Airborne, the cap is scaled by
/// the apex curve keyed on vertical velocity.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApexHorizontalMover;

impl ApexHorizontalMover {
    pub fn effective_cap(ctx: &TickContext<'_>, vertical_velocity: f32) -> f32 {
        if ctx.state.is_grounded {
            ctx.config.max_speed
        } else {
            ctx.config.max_speed * ctx.config.apex_modifier_curve.evaluate(vertical_velocity)
        }
    }
}

impl HorizontalMover for ApexHorizontalMover {
    fn name(&self) -> &'static str {
        "apex"
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        let axis = ctx.move_axis.x;
        if axis.abs() < AXIS_DEADZONE {
            return;
        }

        let velocity = ctx.physics.velocity();
        let cap = Self::effective_cap(ctx, velocity.y);
        if velocity.x.abs() < cap {
            ctx.physics
                .apply_force(Axis::X, axis * ctx.config.movement_speed);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::curve::{Curve, Keyframe};
    use crate::movement::{MovementConfig, MovementState};
    use crate::physics::{BodyId, BodyMode, CharacterPhysics, ColliderId, LayerMask, NoDamage};

    #[derive(Default)]
    struct Body {
        velocity: Vec2,
        forces: Vec<(Axis, f32)>,
    }

    impl CharacterPhysics for Body {
        fn position(&self) -> Vec2 {
            Vec2::ZERO
        }
        fn velocity(&self) -> Vec2 {
            self.velocity
        }
        fn set_position(&mut self, _position: Vec2) {}
        fn set_velocity(&mut self, velocity: Vec2) {
            self.velocity = velocity;
        }
        fn apply_impulse(&mut self, _axis: Axis, _magnitude: f32) {}
        fn apply_force(&mut self, axis: Axis, magnitude: f32) {
            self.forces.push((axis, magnitude));
        }
        fn body_mode(&self) -> BodyMode {
            BodyMode::Dynamic
        }
        fn set_body_mode(&mut self, _mode: BodyMode) {}
        fn overlap_circle(&self, _c: Vec2, _r: f32, _m: LayerMask) -> Option<ColliderId> {
            None
        }
        fn overlap_circle_multi(&self, _c: Vec2, _r: f32, _m: LayerMask) -> Vec<BodyId> {
            Vec::new()
        }
    }

    fn config() -> MovementConfig {
        MovementConfig {
            movement_speed: 10.0,
            max_speed: 5.0,
            apex_modifier_curve: Curve::new(vec![
                Keyframe::new(-1.0, 1.0),
                Keyframe::new(0.0, 2.0),
                Keyframe::new(1.0, 1.0),
            ])
            .unwrap(),
            ..Default::default()
        }
    }

    fn step(body: &mut Body, grounded: bool, axis: f32) {
        let config = config();
        let mut state = MovementState {
            is_grounded: grounded,
            ..Default::default()
        };
        let mut damage = NoDamage;
        let mut ctx = TickContext {
            physics: body,
            state: &mut state,
            config: &config,
            damage: &mut damage,
            move_axis: Vec2::new(axis, 0.0),
            dt: 0.02,
        };
        ApexHorizontalMover.update(&mut ctx);
    }

    #[test]
    fn pushes_below_cap() {
        let mut body = Body::default();
        step(&mut body, true, -0.5);
        assert_eq!(body.forces, vec![(Axis::X, -5.0)]);
    }

    #[test]
    fn grounded_cap_blocks_force() {
        let mut body = Body {
            velocity: Vec2::new(6.0, 0.0),
            ..Default::default()
        };
        step(&mut body, true, 1.0);
        assert!(body.forces.is_empty());
    }

    #[test]
    fn apex_relaxes_airborne_cap() {
        let mut body = Body {
            velocity: Vec2::new(6.0, 0.0),
            ..Default::default()
        };
        step(&mut body, false, 1.0);
        assert_eq!(body.forces.len(), 1);

        body.forces.clear();
        body.velocity.y = -1.0;
        step(&mut body, false, 1.0);
        assert!(body.forces.is_empty());
    }

    #[test]
    fn idle_axis_applies_nothing() {
        let mut body = Body::default();
        step(&mut body, true, 0.0);
        assert!(body.forces.is_empty());
    }
}
