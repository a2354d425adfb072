//! One-shot visual effect spawning
//!
//! Effects are fire-and-forget: the controller asks the host to
//! instantiate a template at a world position and never tracks the
//! effect afterwards.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identifier of an effect template registered with the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectId(pub u64);

/// Instantiates effect templates at world positions
pub trait EffectSpawner {
    /// Spawn a one-shot effect. The host owns its lifecycle.
    fn spawn(&mut self, effect: EffectId, position: Vec2);
}

/// Effect spawner that drops everything (hosts without VFX)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEffectSpawner;

impl EffectSpawner for NullEffectSpawner {
    fn spawn(&mut self, _effect: EffectId, _position: Vec2) {}
}

/// Launch effect setup: a template plus an anchor offset
///
/// Both are optional; the effect only spawns when both are assigned.
/// Leaving either unset is a valid configuration, not a fault.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaunchVfx {
    /// Effect template to instantiate
    pub template: Option<EffectId>,
    /// Spawn anchor, as an offset from the body center
    pub anchor: Option<Vec2>,
}

impl LaunchVfx {
    /// Spawn the effect anchored to `origin`, if fully configured
    pub fn spawn_at(&self, origin: Vec2, spawner: &mut dyn EffectSpawner) {
        if let (Some(template), Some(anchor)) = (self.template, self.anchor) {
            spawner.spawn(template, origin + anchor);
        }
    }
}
