use serde::{Deserialize, Serialize};

use crate::curve::{Curve, CurveError, Keyframe};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementConfig {
    pub movement_speed: f32,
    pub max_speed: f32,

    pub jump_force: f32,
    pub max_jump_hold_time: f32,
    pub jump_buffer_time: f32,
    pub coyote_time: f32,

    /// Normalized hold time in `[0, 1]` to jump-strength multiplier.
    pub hold_jump_curve: Curve,
    /// Vertical velocity to horizontal speed-cap multiplier while airborne.
    pub apex_modifier_curve: Curve,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a finite value >= 0, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must be > 0, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{curve}: {source}")]
    Curve {
        curve: &'static str,
        #[source]
        source: CurveError,
    },
    #[error("{curve} does not cover [{start}, {end}]")]
    CurveDomain {
        curve: &'static str,
        start: f32,
        end: f32,
    },
    #[error("ground pound damage threshold must be in [0, 1], got {0}")]
    DamageThreshold(f32),
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            movement_speed: 10.0,
            max_speed: 5.0,

            jump_force: 12.0,
            max_jump_hold_time: 0.3,
            jump_buffer_time: 0.2,
            coyote_time: 0.15,

            hold_jump_curve: Curve::new(vec![
                Keyframe::new(0.0, 0.6),
                Keyframe::new(1.0, 1.0),
            ])
            .unwrap_or_else(|_| Curve::constant(1.0)),
            apex_modifier_curve: Curve::new(vec![
                Keyframe::new(-4.0, 1.0),
                Keyframe::new(0.0, 1.5),
                Keyframe::new(4.0, 1.0),
            ])
            .unwrap_or_else(|_| Curve::constant(1.0)),
        }
    }
}

impl MovementConfig {
    /// Load-time check; the tick path assumes a validated config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("movement_speed", self.movement_speed)?;
        positive("max_speed", self.max_speed)?;
        non_negative("jump_force", self.jump_force)?;
        positive("max_jump_hold_time", self.max_jump_hold_time)?;
        non_negative("jump_buffer_time", self.jump_buffer_time)?;
        non_negative("coyote_time", self.coyote_time)?;

        check_curve("hold_jump_curve", &self.hold_jump_curve, Some((0.0, 1.0)))?;
        check_curve("apex_modifier_curve", &self.apex_modifier_curve, None)?;

        Ok(())
    }
}

pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

pub(crate) fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn check_curve(
    name: &'static str,
    curve: &Curve,
    required: Option<(f32, f32)>,
) -> Result<(), ConfigError> {
    curve
        .validate()
        .map_err(|source| ConfigError::Curve { curve: name, source })?;

    let Some((start, end)) = required else {
        return Ok(());
    };

    // Single-key curves are constant and therefore defined everywhere.
    if curve.keys().len() == 1 {
        return Ok(());
    }

    match curve.domain() {
        Some((lo, hi)) if lo <= start && hi >= end => Ok(()),
        _ => Err(ConfigError::CurveDomain {
            curve: name,
            start,
            end,
        }),
    }
}
