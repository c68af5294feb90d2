use std::f32::consts::TAU;

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TweenToken(u64);

#[derive(Debug, Clone, Copy)]
struct Shake {
    token: TweenToken,
    elapsed: f32,
    duration: f32,
    amplitude: f32,
}

/// Squash-and-stretch on the character's visual scale. At most one shake
/// runs at a time; starting another, cancelling, or finishing always puts
/// the scale back to baseline.
#[derive(Debug, Clone)]
pub struct LandingSquash {
    baseline: Vec2,
    scale: Vec2,
    vibrato: f32,
    active: Option<Shake>,
    generation: u64,
}

impl Default for LandingSquash {
    fn default() -> Self {
        Self::new(Vec2::ONE)
    }
}

impl LandingSquash {
    pub const DURATION: f32 = 0.15;
    pub const VELOCITY_SCALE: f32 = 0.1;

    pub fn new(baseline: Vec2) -> Self {
        Self {
            baseline,
            scale: baseline,
            vibrato: 24.0,
            active: None,
            generation: 0,
        }
    }

    pub fn baseline(&self) -> Vec2 {
        self.baseline
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn start(&mut self, amplitude: f32, duration: f32) -> TweenToken {
        if let Some(previous) = self.active {
            self.cancel(previous.token);
        }

        self.generation += 1;
        let token = TweenToken(self.generation);
        self.active = Some(Shake {
            token,
            elapsed: 0.0,
            duration: duration.max(f32::EPSILON),
            amplitude: amplitude.abs(),
        });
        token
    }

    pub fn start_for_landing(&mut self, landing_velocity: f32) -> TweenToken {
        self.start(landing_velocity.abs() * Self::VELOCITY_SCALE, Self::DURATION)
    }

    /// Stops the shake owned by `token`. Stale tokens are ignored.
    pub fn cancel(&mut self, token: TweenToken) -> bool {
        match self.active {
            Some(shake) if shake.token == token => {
                self.active = None;
                self.scale = self.baseline;
                true
            }
            _ => false,
        }
    }

    pub fn advance(&mut self, dt: f32) -> Vec2 {
        let Some(shake) = self.active.as_mut() else {
            return self.scale;
        };

        shake.elapsed += dt;
        if shake.elapsed >= shake.duration {
            self.active = None;
            self.scale = self.baseline;
            return self.scale;
        }

        let t = shake.elapsed / shake.duration;
        let offset = shake.amplitude * (1.0 - t) * (t * self.vibrato * TAU / 4.0).sin();
        self.scale = self.baseline + Vec2::new(offset, -offset);
        self.scale
    }
}
