//! Surface simulation configuration.
//!
//! All tunables are load-time configuration; nothing here is mutated once the
//! simulation is running.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default tunables, matching a small pool with light, quickly settling
/// ripples.
pub mod defaults {
    /// Horizontal distance between adjacent waterline points.
    ///
    /// Smaller spacing gives a smoother waterline at the cost of more points.
    pub const SPACING: f32 = 0.45;

    /// Resting height of the waterline in surface-local space.
    pub const BASELINE: f32 = 0.0;

    /// Hard cap on the displacement an impulse may write.
    pub const MAX_AMPLITUDE: f32 = 0.5;

    /// Displacement below which a ripple stops propagating.
    pub const MIN_AMPLITUDE: f32 = 0.05;

    /// Hooke constant pulling a vertex back toward the baseline.
    /// Larger values snap back faster.
    pub const SPRING_CONSTANT: f32 = 0.09;

    /// Per-tick velocity decay factor. Must stay within `[0, 1]`.
    pub const DAMPING: f32 = 0.9;

    /// Converts a body's vertical velocity into a height impulse.
    pub const IMPULSE_GAIN: f32 = 0.05;

    /// Amplitude multiplier applied at each propagation step.
    pub const DECAY_RATE: f32 = 0.65;

    /// Seconds between propagation steps to one more vertex per side.
    pub const STEP_DELAY: f32 = 0.08;

    /// Tangent handle length of waterline points, as a fraction of spacing.
    pub const HANDLE_SCALE: f32 = 0.4;

    /// Edge height attribute stamped on waterline points.
    pub const POINT_HEIGHT: f32 = 0.1;
}

/// Load-time tunables for the water surface simulation.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Resource)]
pub struct SurfaceConfig {
    /// Horizontal distance between adjacent waterline points.
    pub spacing: f32,
    /// Resting height of the waterline in surface-local space.
    pub baseline: f32,
    /// Hard cap on the displacement an impulse may write.
    pub max_amplitude: f32,
    /// Displacement below which a ripple stops propagating.
    pub min_amplitude: f32,
    /// Hooke constant pulling a vertex back toward the baseline.
    pub spring_constant: f32,
    /// Per-tick velocity decay factor, within `[0, 1]`.
    pub damping: f32,
    /// Converts a body's vertical velocity into a height impulse.
    pub impulse_gain: f32,
    /// Amplitude multiplier applied at each propagation step.
    pub decay_rate: f32,
    /// Seconds between propagation steps to one more vertex per side.
    pub step_delay: f32,
    /// Tangent handle length of waterline points, as a fraction of spacing.
    pub handle_scale: f32,
    /// Edge height attribute stamped on waterline points.
    pub point_height: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            spacing: defaults::SPACING,
            baseline: defaults::BASELINE,
            max_amplitude: defaults::MAX_AMPLITUDE,
            min_amplitude: defaults::MIN_AMPLITUDE,
            spring_constant: defaults::SPRING_CONSTANT,
            damping: defaults::DAMPING,
            impulse_gain: defaults::IMPULSE_GAIN,
            decay_rate: defaults::DECAY_RATE,
            step_delay: defaults::STEP_DELAY,
            handle_scale: defaults::HANDLE_SCALE,
            point_height: defaults::POINT_HEIGHT,
        }
    }
}

/// Configuration values the simulation refuses to run with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// `spacing` must be strictly positive or the vertex count is undefined.
    NonPositiveSpacing(f32),
    /// `damping` outside `[0, 1]` makes the integrator diverge.
    DampingOutOfRange(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveSpacing(spacing) => {
                write!(f, "spacing must be positive, got {spacing}")
            }
            Self::DampingOutOfRange(damping) => {
                write!(f, "damping must be within [0, 1], got {damping}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl SurfaceConfig {
    /// Checks the tunables that can destabilise the simulation.
    ///
    /// Invalid values are rejected here, at load time; past this point the
    /// simulation runs indefinitely without raising errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spacing <= 0.0 {
            return Err(ConfigError::NonPositiveSpacing(self.spacing));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(ConfigError::DampingOutOfRange(self.damping));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(SurfaceConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_non_positive_spacing() {
        let mut config = SurfaceConfig::default();
        config.spacing = 0.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveSpacing(0.0))
        );

        config.spacing = -0.45;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveSpacing(-0.45))
        );
    }

    #[test]
    fn test_rejects_damping_out_of_range() {
        let mut config = SurfaceConfig::default();
        config.damping = 1.2;
        assert_eq!(config.validate(), Err(ConfigError::DampingOutOfRange(1.2)));

        config.damping = -0.1;
        assert_eq!(
            config.validate(),
            Err(ConfigError::DampingOutOfRange(-0.1))
        );
    }

    #[test]
    fn test_boundary_damping_values_are_valid() {
        let mut config = SurfaceConfig::default();
        config.damping = 0.0;
        assert_eq!(config.validate(), Ok(()));
        config.damping = 1.0;
        assert_eq!(config.validate(), Ok(()));
    }
}
