//! Character body: a dynamic rigid body driven by the player controller
//!
//! The character is gravity/impulse driven, so this wraps a dynamic body
//! with locked rotation rather than a kinematic controller. The player
//! controller assigns horizontal velocity directly and applies impulses
//! for jumps and launches; vertical velocity is otherwise owned by the
//! simulation.

use glam::Vec2;
use rapier2d::prelude::*;

use crate::layers;

/// Character body configuration
#[derive(Debug, Clone)]
pub struct CharacterBodyConfig {
    /// Capsule height (default: 1.8m)
    pub height: f32,
    /// Capsule radius (default: 0.35m)
    pub radius: f32,
    /// Gravity multiplier applied to the body (1.0 = world gravity)
    pub gravity_scale: f32,
    /// Collision groups for the character collider
    pub groups: InteractionGroups,
}

impl Default for CharacterBodyConfig {
    fn default() -> Self {
        Self {
            height: 1.8,
            radius: 0.35,
            gravity_scale: 1.0,
            groups: InteractionGroups::new(layers::CHARACTER, Group::ALL),
        }
    }
}

/// A dynamic character body living in the physics world
///
/// `position` is the body center. The body exists in the world between
/// `spawn` and `despawn`; all accessors are no-ops / zero while despawned.
pub struct CharacterBody {
    /// Configuration
    pub config: CharacterBodyConfig,
    /// The rigid body handle, present while spawned
    pub body_handle: Option<RigidBodyHandle>,
    /// The collider handle, present while spawned
    pub collider_handle: Option<ColliderHandle>,
}

impl CharacterBody {
    /// Create a new character body with default config
    pub fn new() -> Self {
        Self::with_config(CharacterBodyConfig::default())
    }

    /// Create a new character body with custom config
    pub fn with_config(config: CharacterBodyConfig) -> Self {
        Self {
            config,
            body_handle: None,
            collider_handle: None,
        }
    }

    /// Spawn the character in the physics world at a position (body center)
    pub fn spawn(&mut self, physics: &mut crate::PhysicsWorld, position: Vec2) -> RigidBodyHandle {
        // Respawning moves the existing body instead of leaking a second one
        self.despawn(physics);

        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, position.y])
            .lock_rotations()
            .gravity_scale(self.config.gravity_scale)
            .ccd_enabled(true)
            .build();

        let half_height = (self.config.height - 2.0 * self.config.radius) / 2.0;
        let collider = ColliderBuilder::capsule_y(half_height.max(0.01), self.config.radius)
            .friction(0.0) // Smooth sliding against walls
            .restitution(0.0)
            .collision_groups(self.config.groups)
            .build();

        let (body_handle, collider_handle) = physics.add_dynamic_body(rigid_body, collider);
        self.body_handle = Some(body_handle);
        self.collider_handle = Some(collider_handle);
        body_handle
    }

    /// Remove the character from the physics world
    ///
    /// Idempotent: despawning an already-despawned body does nothing.
    pub fn despawn(&mut self, physics: &mut crate::PhysicsWorld) {
        if let Some(handle) = self.body_handle.take() {
            physics.remove_rigid_body(handle);
        }
        self.collider_handle = None;
    }

    /// Whether the body currently exists in the physics world
    pub fn is_spawned(&self) -> bool {
        self.body_handle.is_some()
    }

    /// Get the body center position
    pub fn position(&self, physics: &crate::PhysicsWorld) -> Vec2 {
        self.body_handle
            .and_then(|h| physics.get_rigid_body(h))
            .map(|rb| Vec2::new(rb.translation().x, rb.translation().y))
            .unwrap_or(Vec2::ZERO)
    }

    /// Get the current linear velocity
    pub fn linvel(&self, physics: &crate::PhysicsWorld) -> Vec2 {
        self.body_handle
            .and_then(|h| physics.get_rigid_body(h))
            .map(|rb| Vec2::new(rb.linvel().x, rb.linvel().y))
            .unwrap_or(Vec2::ZERO)
    }

    /// Set the linear velocity directly
    pub fn set_linvel(&self, physics: &mut crate::PhysicsWorld, velocity: Vec2) {
        if let Some(rb) = self.body_handle.and_then(|h| physics.get_rigid_body_mut(h)) {
            rb.set_linvel(vector![velocity.x, velocity.y], true);
        }
    }

    /// Assign horizontal velocity, leaving vertical velocity untouched
    pub fn set_horizontal_velocity(&self, physics: &mut crate::PhysicsWorld, vx: f32) {
        if let Some(rb) = self.body_handle.and_then(|h| physics.get_rigid_body_mut(h)) {
            let vy = rb.linvel().y;
            rb.set_linvel(vector![vx, vy], true);
        }
    }

    /// Apply an instantaneous impulse to the body
    pub fn apply_impulse(&self, physics: &mut crate::PhysicsWorld, impulse: Vec2) {
        if let Some(rb) = self.body_handle.and_then(|h| physics.get_rigid_body_mut(h)) {
            rb.apply_impulse(vector![impulse.x, impulse.y], true);
        }
    }

    /// Probe for ground below the body
    ///
    /// Sweeps a box of `half_extents` from the body center straight down
    /// for `distance`, restricted to `ground_layers`, ignoring the
    /// character's own collider. Pure query; the result is never cached.
    pub fn probe_ground(
        &self,
        physics: &crate::PhysicsWorld,
        half_extents: Vec2,
        distance: f32,
        ground_layers: Group,
    ) -> bool {
        let Some(body_handle) = self.body_handle else {
            return false;
        };

        let filter = QueryFilter::default()
            .exclude_rigid_body(body_handle)
            .groups(InteractionGroups::new(Group::ALL, ground_layers));

        physics
            .boxcast(
                self.position(physics),
                half_extents,
                Vec2::new(0.0, -1.0),
                distance,
                filter,
            )
            .is_some()
    }
}

impl Default for CharacterBody {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PhysicsWorld;

    fn world_with_ground() -> PhysicsWorld {
        let mut physics = PhysicsWorld::new();
        physics.add_ground_box(Vec2::new(0.0, -0.5), Vec2::new(50.0, 0.5));
        physics
    }

    #[test]
    fn test_spawn_despawn_idempotent() {
        let mut physics = world_with_ground();
        let mut body = CharacterBody::new();

        body.spawn(&mut physics, Vec2::new(0.0, 1.0));
        assert!(body.is_spawned());

        body.despawn(&mut physics);
        assert!(!body.is_spawned());
        // Second despawn is a no-op
        body.despawn(&mut physics);
        assert!(!body.is_spawned());
        assert_eq!(body.position(&physics), Vec2::ZERO);
    }

    #[test]
    fn test_horizontal_velocity_preserves_vertical() {
        let mut physics = world_with_ground();
        let mut body = CharacterBody::new();
        body.spawn(&mut physics, Vec2::new(0.0, 5.0));

        body.set_linvel(&mut physics, Vec2::new(0.0, -3.0));
        body.set_horizontal_velocity(&mut physics, 4.0);

        let vel = body.linvel(&physics);
        assert_eq!(vel.x, 4.0);
        assert_eq!(vel.y, -3.0);
    }

    #[test]
    fn test_probe_ground_near_and_far() {
        let mut physics = world_with_ground();
        let mut body = CharacterBody::new();
        // Body center 0.9 above the feet; ground surface at y=0
        body.spawn(&mut physics, Vec2::new(0.0, 0.9));
        physics.step();

        let probe = Vec2::new(0.3, 0.05);
        assert!(body.probe_ground(&physics, probe, 1.2, layers::GROUND));

        // High in the air the probe misses
        let mut airborne = CharacterBody::new();
        airborne.spawn(&mut physics, Vec2::new(5.0, 10.0));
        assert!(!airborne.probe_ground(&physics, probe, 1.2, layers::GROUND));
    }

    #[test]
    fn test_body_falls_under_gravity() {
        let mut physics = world_with_ground();
        let mut body = CharacterBody::new();
        body.spawn(&mut physics, Vec2::new(0.0, 5.0));

        for _ in 0..30 {
            physics.step();
        }
        assert!(body.linvel(&physics).y < 0.0);
        assert!(body.position(&physics).y < 5.0);
    }

    #[test]
    fn test_impulse_changes_velocity() {
        let mut physics = world_with_ground();
        let mut body = CharacterBody::new();
        body.spawn(&mut physics, Vec2::new(0.0, 0.9));

        body.apply_impulse(&mut physics, Vec2::new(0.0, 10.0));
        assert!(body.linvel(&physics).y > 0.0);
    }
}
