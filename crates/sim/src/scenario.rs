use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Result, bail};
use clap::ValueEnum;
use glam::Vec2;
use platformer::physics::body_id;
use platformer::{
    ChargeReleaseJump, GroundPoundConfig, GroundPoundJump, JumpEngine, LayerMask,
    MovementConfig, MovementController, PhysicsWorld, Stage, StandardJump, TargetRegistry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    Default,
    Charge,
    GroundPound,
}

#[derive(Debug, Clone)]
pub struct Scenario {
    pub tick_rate: u32,
    pub seconds: f32,
    pub hold: f32,
    pub strategy: Strategy,
}

impl Scenario {
    const START: Vec2 = Vec2::new(0.0, 0.6);
    const PRESS_AT: f32 = 0.5;
    const POUND_DELAY: f32 = 0.15;
    const TARGET_HEALTH: f32 = 1.0;

    pub fn validate(&self) -> Result<()> {
        if self.tick_rate == 0 {
            bail!("tick rate must be at least 1");
        }
        if !(self.seconds > 0.0) {
            bail!("simulated time must be positive, got {}", self.seconds);
        }
        if self.hold < 0.0 {
            bail!("hold duration must not be negative, got {}", self.hold);
        }
        Ok(())
    }

    fn engine(&self) -> Result<Box<dyn JumpEngine>> {
        Ok(match self.strategy {
            Strategy::Default => Box::new(StandardJump),
            Strategy::Charge => Box::new(ChargeReleaseJump),
            Strategy::GroundPound => {
                let config = GroundPoundConfig::default();
                config.validate()?;
                Box::new(GroundPoundJump::new(config))
            }
        })
    }

    pub fn build(&self) -> Result<(Stage, Rc<RefCell<TargetRegistry>>)> {
        let config = MovementConfig::default();
        config.validate()?;

        let mut physics = PhysicsWorld::new(self.tick_rate);
        physics.add_ground(0.0, 40.0);
        let player = physics.add_character(Self::START, 0.3, 1.0);

        let targets = TargetRegistry::shared();
        for x in [-0.9, 0.9] {
            let body = physics.add_dynamic_box(
                Vec2::new(x, 0.35),
                Vec2::splat(0.25),
                2.0,
                LayerMask::DAMAGEABLE,
            );
            targets
                .borrow_mut()
                .insert(body_id(body), Self::TARGET_HEALTH);
        }

        let mut controller =
            MovementController::with_defaults(Arc::new(config), Box::new(Rc::clone(&targets)));
        controller.register_jump(self.engine()?);

        Ok((Stage::new(self.tick_rate, physics, player, controller), targets))
    }

    fn ticks_for(&self, seconds: f32) -> u32 {
        (seconds * self.tick_rate as f32).round() as u32
    }

    /// Tick indices of every jump press and release.
    fn script(&self) -> (Vec<u32>, Vec<u32>) {
        let press = self.ticks_for(Self::PRESS_AT);
        let hold = self.ticks_for(self.hold);

        match self.strategy {
            Strategy::Default | Strategy::Charge => (vec![press], vec![press + hold]),
            Strategy::GroundPound => {
                // Tap to leave the ground, then charge the slam in the air.
                let pound = press + self.ticks_for(Self::POUND_DELAY);
                (vec![press, pound], vec![press, pound + hold])
            }
        }
    }

    pub fn run(&self, stage: &mut Stage) -> Report {
        let (presses, releases) = self.script();
        let total = self.ticks_for(self.seconds);
        let rest = stage.player_position().y;

        let mut report = Report {
            ticks: 0,
            jumps: 0,
            landings: 0,
            peak_height: 0.0,
            final_position: Vec2::ZERO,
        };

        let mut was_grounded = stage.controller.state().is_grounded;
        for tick in 0..total {
            if presses.contains(&tick) {
                log::debug!("tick {tick}: jump pressed");
                stage.controller.on_jump_pressed();
            }
            if releases.contains(&tick) {
                log::debug!("tick {tick}: jump released");
                stage.controller.on_jump_released();
            }

            stage.step();

            let state = stage.controller.state();
            if state.jumped_this_tick {
                report.jumps += 1;
            }
            if state.is_grounded && !was_grounded {
                report.landings += 1;
            }
            was_grounded = state.is_grounded;
            report.peak_height = report.peak_height.max(stage.player_position().y - rest);
            report.ticks += 1;
        }

        report.final_position = stage.player_position();
        report
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub ticks: u32,
    pub jumps: u32,
    pub landings: u32,
    pub peak_height: f32,
    pub final_position: Vec2,
}
