//! Player controller module
//!
//! Provides side-scrolling player movement with physics integration,
//! facing, and animator mirroring.

pub mod animation;
mod controller;
mod facing;
mod movement;

pub use animation::{AnimatorFrame, AnimatorSink, NullAnimator};
pub use controller::PlayerController;
pub use facing::{Facing, FacingTracker};
pub use movement::{MovementConfig, MovementConfigError};
