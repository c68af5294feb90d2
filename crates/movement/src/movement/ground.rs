use glam::Vec2;

use crate::physics::LayerMask;

use super::TickContext;

pub trait GroundDetector {
    fn name(&self) -> &'static str;

    fn on_register(&mut self) {}

    fn on_unregister(&mut self) {}

    fn update(&mut self, ctx: &mut TickContext<'_>);
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroundProbe {
    pub ground_layer: LayerMask,
    pub feet_offset: Vec2,
    pub feet_radius: f32,
    pub head_offset: Vec2,
    pub head_radius: f32,
    /// Horizontal distance the respawn anchor is pulled back against the
    /// direction of travel.
    pub respawn_margin: f32,
}

impl Default for GroundProbe {
    fn default() -> Self {
        Self {
            ground_layer: LayerMask::GROUND,
            feet_offset: Vec2::new(0.0, -0.5),
            feet_radius: 0.15,
            head_offset: Vec2::new(0.0, 0.5),
            head_radius: 0.15,
            respawn_margin: 1.5,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CircleGroundDetector {
    probe: GroundProbe,
}

impl CircleGroundDetector {
    pub fn new(probe: GroundProbe) -> Self {
        Self { probe }
    }

    pub fn probe(&self) -> &GroundProbe {
        &self.probe
    }

    fn respawn_anchor(&self, position: Vec2, velocity_x: f32) -> Vec2 {
        let offset = if velocity_x > 0.0 {
            -self.probe.respawn_margin
        } else if velocity_x < 0.0 {
            self.probe.respawn_margin
        } else {
            0.0
        };
        Vec2::new(position.x + offset, position.y)
    }
}

impl GroundDetector for CircleGroundDetector {
    fn name(&self) -> &'static str {
        "circle"
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        let position = ctx.physics.position();
        let velocity = ctx.physics.velocity();

        let feet = ctx.physics.overlap_circle(
            position + self.probe.feet_offset,
            self.probe.feet_radius,
            self.probe.ground_layer,
        );
        let head = ctx.physics.overlap_circle(
            position + self.probe.head_offset,
            self.probe.head_radius,
            self.probe.ground_layer,
        );

        // Touching one collider at both probes means wedged, not standing.
        let was_grounded = ctx.state.is_grounded;
        let grounded = feet.is_some() && feet != head && velocity.y <= 0.0;
        ctx.state.is_grounded = grounded;

        if grounded && !was_grounded {
            ctx.state.just_landed = true;
            ctx.state.landing_velocity = velocity.y;
            log::trace!("landed at {position} with vy={}", velocity.y);
        } else if !grounded && was_grounded {
            log::trace!("left ground at {position}");
        }

        if grounded {
            ctx.state.coyote_time_counter = ctx.config.coyote_time;
            ctx.state.last_grounded_position = self.respawn_anchor(position, velocity.x);
        }
    }
}
