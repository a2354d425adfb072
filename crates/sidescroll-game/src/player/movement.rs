//! Movement configuration and constants

use glam::Vec2;
use rapier2d::geometry::Group;
use serde::{Deserialize, Serialize};
use sidescroll_physics::layers;

/// Movement configuration
///
/// Immutable per session: loaded once at startup and handed to the
/// player controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementConfig {
    /// Horizontal speed in meters per second
    pub movement_speed: f32,
    /// Upward jump impulse
    pub jump_force: f32,
    /// Backward launch impulse
    pub launch_force: f32,
    /// Fraction of movement speed available while airborne
    pub air_control: f32,
    /// Half extents of the ground probe box
    pub ground_box_half_extents: Vec2,
    /// How far below the body center the ground probe reaches
    pub ground_check_distance: f32,
    /// Collision layers the ground probe tests against
    #[serde(skip, default = "default_ground_layers")]
    pub ground_layers: Group,
    /// Minimum input magnitude for the animator to report movement
    pub movement_threshold: f32,
}

fn default_ground_layers() -> Group {
    layers::GROUND
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            movement_speed: 5.0,
            jump_force: 10.0,
            launch_force: 15.0,
            air_control: 0.7,
            ground_box_half_extents: Vec2::new(0.3, 0.05),
            ground_check_distance: 1.2,
            ground_layers: default_ground_layers(),
            movement_threshold: 0.1,
        }
    }
}

impl MovementConfig {
    /// Get the speed multiplier based on grounded state
    pub fn speed_factor(&self, grounded: bool) -> f32 {
        if grounded {
            1.0
        } else {
            self.air_control
        }
    }

    /// Check the config for values that would break the controller
    pub fn validate(&self) -> Result<(), MovementConfigError> {
        for (field, value) in [
            ("movement_speed", self.movement_speed),
            ("jump_force", self.jump_force),
            ("launch_force", self.launch_force),
            ("ground_check_distance", self.ground_check_distance),
        ] {
            if value <= 0.0 {
                return Err(MovementConfigError::NonPositive { field, value });
            }
        }
        if !(0.0..=1.0).contains(&self.air_control) {
            return Err(MovementConfigError::AirControlOutOfRange(self.air_control));
        }
        if self.movement_threshold < 0.0 {
            return Err(MovementConfigError::NonPositive {
                field: "movement_threshold",
                value: self.movement_threshold,
            });
        }
        Ok(())
    }
}

/// Errors produced by [`MovementConfig::validate`]
#[derive(Debug, Clone, thiserror::Error)]
pub enum MovementConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("air_control must be within [0, 1], got {0}")]
    AirControlOutOfRange(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_factor() {
        let config = MovementConfig::default();
        assert_eq!(config.speed_factor(true), 1.0);
        assert_eq!(config.speed_factor(false), 0.7);
    }

    #[test]
    fn test_validate_default() {
        assert!(MovementConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = MovementConfig::default();
        config.movement_speed = 0.0;
        assert!(config.validate().is_err());

        let mut config = MovementConfig::default();
        config.air_control = 1.5;
        assert!(matches!(
            config.validate(),
            Err(MovementConfigError::AirControlOutOfRange(_))
        ));
    }
}
