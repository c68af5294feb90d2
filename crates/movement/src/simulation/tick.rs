use glam::Vec2;
use rapier3d::prelude::RigidBodyHandle;

use crate::movement::MovementController;
use crate::physics::{PhysicsWorld, RapierCharacter};

pub struct FixedTimestep {
    tick_rate: u32,
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    const MAX_FRAME_DELTA: f32 = 0.25;

    pub fn new(tick_rate: u32) -> Self {
        let tick_rate = tick_rate.max(1);
        Self {
            tick_rate,
            dt: 1.0 / tick_rate as f32,
            accumulator: 0.0,
        }
    }

    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn accumulate(&mut self, delta: f32) {
        self.accumulator += delta.clamp(0.0, Self::MAX_FRAME_DELTA);
    }

    pub fn consume_tick(&mut self) -> bool {
        if self.accumulator >= self.dt {
            self.accumulator -= self.dt;
            true
        } else {
            false
        }
    }
}

/// One controlled character in a rapier world, advanced on a fixed timestep.
pub struct Stage {
    pub physics: PhysicsWorld,
    pub player: RigidBodyHandle,
    pub controller: MovementController,
    timestep: FixedTimestep,
    tick: u32,
}

impl Stage {
    pub fn new(
        tick_rate: u32,
        physics: PhysicsWorld,
        player: RigidBodyHandle,
        mut controller: MovementController,
    ) -> Self {
        if let Some(position) = physics.body_position(player) {
            controller.state_mut().last_grounded_position = position;
        }

        Self {
            physics,
            player,
            controller,
            timestep: FixedTimestep::new(tick_rate),
            tick: 0,
        }
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn dt(&self) -> f32 {
        self.timestep.dt()
    }

    pub fn player_position(&self) -> Vec2 {
        self.physics.body_position(self.player).unwrap_or(Vec2::ZERO)
    }

    pub fn player_velocity(&self) -> Vec2 {
        self.physics.body_velocity(self.player).unwrap_or(Vec2::ZERO)
    }

    pub fn character(&mut self) -> RapierCharacter<'_> {
        RapierCharacter::new(&mut self.physics, self.player)
    }

    /// Feeds a variable frame delta and runs every fixed tick it covers.
    pub fn update(&mut self, delta: f32) -> u32 {
        self.timestep.accumulate(delta);

        let mut ticks_run = 0;
        while self.timestep.consume_tick() {
            self.step();
            ticks_run += 1;
        }
        ticks_run
    }

    pub fn step(&mut self) {
        let dt = self.timestep.dt();
        let mut character = RapierCharacter::new(&mut self.physics, self.player);
        self.controller.fixed_tick(dt, &mut character);
        self.physics.step();
        self.tick += 1;
    }

    pub async fn respawn_player(&mut self) {
        let mut character = RapierCharacter::new(&mut self.physics, self.player);
        self.controller.respawn_cycle(&mut character).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_timestep_accumulation() {
        let mut ts = FixedTimestep::new(60);

        ts.accumulate(1.0 / 30.0);
        assert!(ts.consume_tick());
        assert!(ts.consume_tick());
        assert!(!ts.consume_tick());
    }

    #[test]
    fn long_frames_are_capped() {
        let mut ts = FixedTimestep::new(10);
        ts.accumulate(5.0);

        let mut ticks = 0;
        while ts.consume_tick() {
            ticks += 1;
        }
        assert_eq!(ticks, 2);
    }

    #[test]
    fn stage_runs_fixed_ticks() {
        let mut physics = PhysicsWorld::new(60);
        physics.add_ground(0.0, 20.0);
        let player = physics.add_character(Vec2::new(0.0, 1.0), 0.3, 1.0);
        let mut stage = Stage::new(60, physics, player, MovementController::default());

        assert_eq!(stage.update(1.0 / 30.0), 2);
        assert_eq!(stage.tick(), 2);
    }
}
