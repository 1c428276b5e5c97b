//! Rotation over time and the settings that feed it.
//!
//! The host evaluates `angle(t) = phase + t * angular_velocity` every frame.
//! [`RotationDriver`] is that rule as a value; [`GearTrain::sample`] evaluates
//! it without a host.

use gear_types::Rgb;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{require_finite, require_non_negative, GearError};
use crate::layout::GearTrain;

/// Per-frame rotation rule for one gear, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationDriver {
    pub phase: f64,
    pub angular_velocity: f64,
}

impl RotationDriver {
    pub fn new(phase: f64, angular_velocity: f64) -> Self {
        Self {
            phase,
            angular_velocity,
        }
    }

    pub fn angle_at(&self, t: f64) -> f64 {
        self.phase + t * self.angular_velocity
    }

    /// The rule as a host expression driving `<target>.rotateY` from `time`.
    pub fn expression(&self, target: &str) -> String {
        format!(
            "{target}.rotateY = {} + time * ({})",
            self.phase, self.angular_velocity
        )
    }
}

/// Angles of every gear at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainSample {
    pub time: f64,
    pub angles: Vec<f64>,
}

impl GearTrain {
    /// Evaluate every gear at `steps + 1` evenly spaced times over `[0, duration]`.
    pub fn sample(&self, duration: f64, steps: u32) -> Result<Vec<TrainSample>, GearError> {
        let duration = require_non_negative("duration", duration)?;
        if steps == 0 {
            return Err(GearError::invalid("steps", 0.0));
        }
        let drivers: Vec<RotationDriver> = self.entries().iter().map(|e| e.driver()).collect();
        Ok((0..=steps)
            .map(|k| {
                let time = duration * f64::from(k) / f64::from(steps);
                TrainSample {
                    time,
                    angles: drivers.iter().map(|d| d.angle_at(time)).collect(),
                }
            })
            .collect())
    }
}

/// User-facing animation settings.
///
/// Defaults match the initial values of the settings dialog the gears were
/// first driven from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationSettings {
    /// Degrees per unit time for the first gear; neighbours alternate sign.
    pub rotation_speed: f64,
    /// Length of the animation in time units.
    pub duration: f64,
    /// Colour applied to every gear.
    pub color: Rgb,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            rotation_speed: 10.0,
            duration: 10.0,
            color: Rgb::default(),
        }
    }
}

/// Failure to load [`AnimationSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] GearError),
}

impl AnimationSettings {
    pub fn validate(&self) -> Result<(), GearError> {
        require_finite("rotation_speed", self.rotation_speed)?;
        require_non_negative("duration", self.duration)?;
        if let Some((channel, value)) = self.color.out_of_range_channel() {
            let field = match channel {
                "r" => "color.r",
                "g" => "color.g",
                _ => "color.b",
            };
            return Err(GearError::invalid(field, value));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }
}
