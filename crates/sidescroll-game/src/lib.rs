//! Sidescroll Game - character control layer
//!
//! Ties the input layer, the physics character body, and the external
//! animation/effect seams together into the player controller.

pub mod effects;
pub mod input;
pub mod player;

pub use effects::{EffectId, EffectSpawner, LaunchVfx, NullEffectSpawner};
pub use input::{InputAction, InputBindings, InputHandler, InputState};
pub use player::{MovementConfig, PlayerController};
