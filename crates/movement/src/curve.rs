use serde::{Deserialize, Serialize};

pub trait CurveEval {
    fn evaluate(&self, t: f32) -> f32;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
}

impl Keyframe {
    pub const fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CurveError {
    #[error("curve has no keyframes")]
    Empty,
    #[error("keyframe {index} at t={time} is not after the previous key")]
    Unsorted { index: usize, time: f32 },
    #[error("keyframe {index} is not finite")]
    NotFinite { index: usize },
}

/// Piecewise-linear curve over sorted keyframes. Inputs outside the key range
/// clamp to the first or last value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    keys: Vec<Keyframe>,
}

impl Curve {
    pub fn new(keys: Vec<Keyframe>) -> Result<Self, CurveError> {
        Self::check_keys(&keys)?;
        Ok(Self { keys })
    }

    pub fn constant(value: f32) -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, value)],
        }
    }

    pub fn linear(start: Keyframe, end: Keyframe) -> Result<Self, CurveError> {
        Self::new(vec![start, end])
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn domain(&self) -> Option<(f32, f32)> {
        let first = self.keys.first()?;
        let last = self.keys.last()?;
        Some((first.time, last.time))
    }

    /// Re-checks the invariants; a deserialized curve bypasses `new`.
    pub fn validate(&self) -> Result<(), CurveError> {
        Self::check_keys(&self.keys)
    }

    fn check_keys(keys: &[Keyframe]) -> Result<(), CurveError> {
        if keys.is_empty() {
            return Err(CurveError::Empty);
        }

        for (index, key) in keys.iter().enumerate() {
            if !key.time.is_finite() || !key.value.is_finite() {
                return Err(CurveError::NotFinite { index });
            }
            if index > 0 && key.time <= keys[index - 1].time {
                return Err(CurveError::Unsorted {
                    index,
                    time: key.time,
                });
            }
        }

        Ok(())
    }
}

impl CurveEval for Curve {
    fn evaluate(&self, t: f32) -> f32 {
        let Some(first) = self.keys.first() else {
            return 0.0;
        };
        if t <= first.time {
            return first.value;
        }

        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.time {
                let span = b.time - a.time;
                let blend = (t - a.time) / span;
                return lerp(a.value, b.value, blend);
            }
        }

        self.keys.last().map_or(first.value, |k| k.value)
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
