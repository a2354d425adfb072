//! Animator parameter mirroring
//!
//! The animation state machine is owned by the host; the controller
//! only pushes derived values into it each frame through the
//! [`AnimatorSink`] seam.

/// Animator parameter names
pub mod params {
    /// Bool: the character is actively moving
    pub const IS_MOVING: &str = "is_moving";
    /// Bool: the character is standing on ground
    pub const GROUNDED: &str = "grounded";
    /// Float: input magnitude in [0, 1]
    pub const MOVE_SPEED: &str = "move_speed";
    /// Trigger: a jump just started
    pub const JUMP: &str = "jump";
}

/// Residual horizontal velocity below this never counts as moving
pub const VELOCITY_EPSILON: f32 = 0.1;

/// Sink for named animator parameters
pub trait AnimatorSink {
    fn set_bool(&mut self, param: &'static str, value: bool);
    fn set_float(&mut self, param: &'static str, value: f32);
    fn set_trigger(&mut self, param: &'static str);
}

/// Animator sink that drops everything (hosts without an animator)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAnimator;

impl AnimatorSink for NullAnimator {
    fn set_bool(&mut self, _param: &'static str, _value: bool) {}
    fn set_float(&mut self, _param: &'static str, _value: f32) {}
    fn set_trigger(&mut self, _param: &'static str) {}
}

/// Per-frame values mirrored into the animator
#[derive(Debug, Clone, Copy)]
pub struct AnimatorFrame {
    /// Horizontal input axis in [-1, 1]
    pub axis: f32,
    /// Grounded state for this frame
    pub grounded: bool,
    /// Current horizontal velocity
    pub horizontal_velocity: f32,
    /// Whether a jump started since the last frame
    pub jump_started: bool,
}

impl AnimatorFrame {
    /// Push this frame's values into the animator
    ///
    /// `is_moving` requires both live input above `movement_threshold`
    /// and actual horizontal velocity above [`VELOCITY_EPSILON`]:
    /// residual sliding without input is not "moving", and pushing
    /// against a wall with no displacement is not either.
    pub fn push(&self, movement_threshold: f32, sink: &mut dyn AnimatorSink) {
        let moving = self.axis.abs() > movement_threshold
            && self.horizontal_velocity.abs() > VELOCITY_EPSILON;

        sink.set_bool(params::IS_MOVING, moving);
        sink.set_bool(params::GROUNDED, self.grounded);
        sink.set_float(params::MOVE_SPEED, self.axis.abs());
        if self.jump_started {
            sink.set_trigger(params::JUMP);
        }
    }
}
