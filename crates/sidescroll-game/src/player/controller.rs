//! Player controller: input-driven 2D platformer movement
//!
//! The host drives two callbacks: `update` once per rendered frame
//! (input sampling, facing, animator sync) and `fixed_update` once per
//! physics step (movement integration, impulses). Edge-triggered
//! actions are queued by `update` and consumed exactly once by the
//! next `fixed_update`.

use glam::Vec2;
use sidescroll_physics::{CharacterBody, PhysicsWorld};
use tracing::{debug, trace};

use crate::effects::{EffectSpawner, LaunchVfx};
use crate::input::{InputAction, InputState};

use super::animation::{AnimatorFrame, AnimatorSink};
use super::facing::{Facing, FacingTracker};
use super::MovementConfig;

/// Player controller handling input, movement, and physics
pub struct PlayerController {
    /// Movement configuration
    pub config: MovementConfig,
    /// Physics character body
    pub body: CharacterBody,
    /// Launch effect setup
    pub vfx: LaunchVfx,
    /// Facing tracker
    facing: FacingTracker,
    /// Horizontal axis sampled this frame, in [-1, 1]
    axis: f32,
    /// A jump edge is waiting for the next fixed step
    jump_queued: bool,
    /// A launch edge is waiting for the next fixed step
    launch_queued: bool,
    /// A jump started; the animator trigger has not fired yet
    jump_started: bool,
    /// Position at the previous frame, for speed telemetry
    last_position: Vec2,
    /// Measured speed over the last frame (telemetry only)
    current_speed: f32,
}

impl PlayerController {
    /// Create a new player controller
    pub fn new() -> Self {
        Self::with_config(MovementConfig::default())
    }

    /// Create a player controller with custom config
    pub fn with_config(config: MovementConfig) -> Self {
        Self {
            config,
            body: CharacterBody::new(),
            vfx: LaunchVfx::default(),
            facing: FacingTracker::new(),
            axis: 0.0,
            jump_queued: false,
            launch_queued: false,
            jump_started: false,
            last_position: Vec2::ZERO,
            current_speed: 0.0,
        }
    }

    /// Spawn the player in the world at a position (body center)
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, position: Vec2) {
        self.body.spawn(physics, position);
        self.facing = FacingTracker::new();
        self.axis = 0.0;
        self.jump_queued = false;
        self.launch_queued = false;
        self.jump_started = false;
        self.last_position = position;
        self.current_speed = 0.0;
    }

    /// Remove the player from the world
    ///
    /// Idempotent; pending edges are dropped with the body.
    pub fn despawn(&mut self, physics: &mut PhysicsWorld) {
        self.body.despawn(physics);
        self.jump_queued = false;
        self.launch_queued = false;
        self.jump_started = false;
    }

    /// Get the player's current position (body center)
    pub fn position(&self, physics: &PhysicsWorld) -> Vec2 {
        self.body.position(physics)
    }

    /// Check if the player is standing on ground
    ///
    /// Pure query, recomputed on every call; movement blending and the
    /// jump gate each query it at their own point in the step.
    pub fn is_grounded(&self, physics: &PhysicsWorld) -> bool {
        self.body.probe_ground(
            physics,
            self.config.ground_box_half_extents,
            self.config.ground_check_distance,
            self.config.ground_layers,
        )
    }

    /// The current facing
    pub fn facing(&self) -> Facing {
        self.facing.facing()
    }

    /// Whether the player faces left
    pub fn is_facing_left(&self) -> bool {
        self.facing.is_facing_left()
    }

    /// Sprite horizontal-mirror flag for the renderer
    pub fn flip_x(&self) -> bool {
        self.facing.flip_x()
    }

    /// Measured speed over the last frame (telemetry only)
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    /// Queue a jump for the next fixed step
    pub fn trigger_jump(&mut self) {
        self.jump_queued = true;
    }

    /// Queue a backward launch for the next fixed step
    pub fn trigger_launch(&mut self) {
        self.launch_queued = true;
    }

    /// Per-frame update: sample input, track facing, record telemetry
    pub fn update(&mut self, physics: &PhysicsWorld, input: &InputState, dt: f32) {
        self.axis = input.horizontal_axis().clamp(-1.0, 1.0);
        self.facing.observe(self.axis);

        if input.is_just_pressed(InputAction::Jump) {
            self.trigger_jump();
        }
        if input.is_just_pressed(InputAction::Interact) {
            self.trigger_launch();
        }

        let position = self.body.position(physics);
        if dt > 0.0 {
            self.current_speed = position.distance(self.last_position) / dt;
            trace!(speed = self.current_speed, "player speed");
        }
        self.last_position = position;
    }

    /// Fixed-step update: movement integration, then queued impulses
    pub fn fixed_update(&mut self, physics: &mut PhysicsWorld, effects: &mut dyn EffectSpawner) {
        if !self.body.is_spawned() {
            return;
        }

        // Movement integration runs before any impulse this step, so
        // impulses applied below are not overwritten within the step.
        let grounded = self.is_grounded(physics);
        let vx = self.axis * self.config.movement_speed * self.config.speed_factor(grounded);
        self.body.set_horizontal_velocity(physics, vx);

        if std::mem::take(&mut self.jump_queued) {
            // Grounded is requeried at the moment the edge is consumed
            if self.is_grounded(physics) {
                self.body
                    .apply_impulse(physics, Vec2::new(0.0, self.config.jump_force));
                self.jump_started = true;
                debug!("jump");
            }
        }

        if std::mem::take(&mut self.launch_queued) {
            // Launch fires opposite facing, grounded or not
            let direction = -self.facing.facing().direction();
            self.body.apply_impulse(
                physics,
                Vec2::new(direction * self.config.launch_force, 0.0),
            );
            self.vfx.spawn_at(self.body.position(physics), effects);
            debug!(direction, "launch");
        }
    }

    /// Push this frame's derived values into the animator
    pub fn sync_animator(&mut self, physics: &PhysicsWorld, sink: &mut dyn AnimatorSink) {
        let frame = AnimatorFrame {
            axis: self.axis,
            grounded: self.is_grounded(physics),
            horizontal_velocity: self.body.linvel(physics).x,
            jump_started: std::mem::take(&mut self.jump_started),
        };
        frame.push(self.config.movement_threshold, sink);
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{EffectId, NullEffectSpawner};
    use crate::player::animation::params;

    #[derive(Default)]
    struct RecordingSpawner {
        spawned: Vec<(EffectId, Vec2)>,
    }

    impl EffectSpawner for RecordingSpawner {
        fn spawn(&mut self, effect: EffectId, position: Vec2) {
            self.spawned.push((effect, position));
        }
    }

    #[derive(Default)]
    struct RecordingAnimator {
        bools: Vec<(&'static str, bool)>,
        triggers: Vec<&'static str>,
    }

    impl AnimatorSink for RecordingAnimator {
        fn set_bool(&mut self, param: &'static str, value: bool) {
            self.bools.push((param, value));
        }
        fn set_float(&mut self, _param: &'static str, _value: f32) {}
        fn set_trigger(&mut self, param: &'static str) {
            self.triggers.push(param);
        }
    }

    const DT: f32 = 1.0 / 60.0;

    /// Player resting on ground, ground surface at y=0
    fn grounded_setup() -> (PhysicsWorld, PlayerController) {
        let mut physics = PhysicsWorld::new();
        physics.add_ground_box(Vec2::new(0.0, -0.5), Vec2::new(50.0, 0.5));
        let mut player = PlayerController::new();
        player.spawn(&mut physics, Vec2::new(0.0, 0.9));
        (physics, player)
    }

    /// Player high in the air, far from any ground
    fn airborne_setup() -> (PhysicsWorld, PlayerController) {
        let mut physics = PhysicsWorld::new();
        physics.add_ground_box(Vec2::new(0.0, -0.5), Vec2::new(50.0, 0.5));
        let mut player = PlayerController::new();
        player.spawn(&mut physics, Vec2::new(0.0, 10.0));
        (physics, player)
    }

    fn input_holding(action: InputAction) -> InputState {
        let mut input = InputState::new();
        input.held.insert(action);
        input
    }

    fn input_pressing(action: InputAction) -> InputState {
        let mut input = input_holding(action);
        input.just_pressed.insert(action);
        input
    }

    #[test]
    fn test_grounded_movement_velocity() {
        let (mut physics, mut player) = grounded_setup();
        assert!(player.is_grounded(&physics));

        let input = input_holding(InputAction::MoveRight);
        player.update(&physics, &input, DT);
        player.fixed_update(&mut physics, &mut NullEffectSpawner);

        let vel = player.body.linvel(&physics);
        assert_eq!(vel.x, player.config.movement_speed);
    }

    #[test]
    fn test_air_control_velocity() {
        let (mut physics, mut player) = airborne_setup();
        assert!(!player.is_grounded(&physics));

        let input = input_holding(InputAction::MoveRight);
        player.update(&physics, &input, DT);
        player.fixed_update(&mut physics, &mut NullEffectSpawner);

        let vel = player.body.linvel(&physics);
        let expected = player.config.movement_speed * player.config.air_control;
        assert!((vel.x - expected).abs() < 1e-6);
    }

    #[test]
    fn test_vertical_velocity_untouched() {
        let (mut physics, mut player) = airborne_setup();
        player.body.set_linvel(&mut physics, Vec2::new(0.0, -3.0));

        let input = input_holding(InputAction::MoveLeft);
        player.update(&physics, &input, DT);
        player.fixed_update(&mut physics, &mut NullEffectSpawner);

        let vel = player.body.linvel(&physics);
        assert!(vel.x < 0.0);
        assert_eq!(vel.y, -3.0);
    }

    #[test]
    fn test_movement_integration_idempotent() {
        let (mut physics, mut player) = grounded_setup();
        let input = input_holding(InputAction::MoveRight);
        player.update(&physics, &input, DT);

        player.fixed_update(&mut physics, &mut NullEffectSpawner);
        let first = player.body.linvel(&physics);
        player.fixed_update(&mut physics, &mut NullEffectSpawner);
        let second = player.body.linvel(&physics);
        assert_eq!(first, second);
    }

    #[test]
    fn test_jump_when_grounded() {
        let (mut physics, mut player) = grounded_setup();

        let input = input_pressing(InputAction::Jump);
        player.update(&physics, &input, DT);
        player.fixed_update(&mut physics, &mut NullEffectSpawner);

        assert!(player.body.linvel(&physics).y > 0.0);
    }

    #[test]
    fn test_no_jump_while_airborne() {
        let (mut physics, mut player) = airborne_setup();

        let input = input_pressing(InputAction::Jump);
        player.update(&physics, &input, DT);
        player.fixed_update(&mut physics, &mut NullEffectSpawner);

        assert_eq!(player.body.linvel(&physics).y, 0.0);
    }

    #[test]
    fn test_jump_edge_consumed_once() {
        let (mut physics, mut player) = grounded_setup();

        let input = input_pressing(InputAction::Jump);
        player.update(&physics, &input, DT);
        player.fixed_update(&mut physics, &mut NullEffectSpawner);
        let vy_after_jump = player.body.linvel(&physics).y;
        assert!(vy_after_jump > 0.0);

        // Same edge must not fire again on the next fixed step
        player.fixed_update(&mut physics, &mut NullEffectSpawner);
        assert_eq!(player.body.linvel(&physics).y, vy_after_jump);
    }

    #[test]
    fn test_launch_opposite_facing_right() {
        let (mut physics, mut player) = grounded_setup();

        let input = input_pressing(InputAction::Interact);
        player.update(&physics, &input, DT);
        player.fixed_update(&mut physics, &mut NullEffectSpawner);

        // Facing right by default, so the launch pushes left
        assert!(player.body.linvel(&physics).x < 0.0);
    }

    #[test]
    fn test_launch_opposite_facing_left() {
        let (mut physics, mut player) = grounded_setup();

        // Face left first
        let input = input_holding(InputAction::MoveLeft);
        player.update(&physics, &input, DT);
        assert!(player.is_facing_left());

        let mut input = InputState::new();
        input.just_pressed.insert(InputAction::Interact);
        player.update(&physics, &input, DT);
        player.fixed_update(&mut physics, &mut NullEffectSpawner);

        assert!(player.body.linvel(&physics).x > 0.0);
    }

    #[test]
    fn test_launch_fires_while_airborne() {
        let (mut physics, mut player) = airborne_setup();

        let input = input_pressing(InputAction::Interact);
        player.update(&physics, &input, DT);
        player.fixed_update(&mut physics, &mut NullEffectSpawner);

        assert!(player.body.linvel(&physics).x < 0.0);
    }

    #[test]
    fn test_launch_spawns_configured_vfx() {
        let (mut physics, mut player) = grounded_setup();
        player.vfx = LaunchVfx {
            template: Some(EffectId(3)),
            anchor: Some(Vec2::new(0.0, 0.5)),
        };

        let input = input_pressing(InputAction::Interact);
        player.update(&physics, &input, DT);
        let mut spawner = RecordingSpawner::default();
        player.fixed_update(&mut physics, &mut spawner);

        assert_eq!(spawner.spawned.len(), 1);
        assert_eq!(spawner.spawned[0].0, EffectId(3));
    }

    #[test]
    fn test_launch_without_template_spawns_nothing() {
        let (mut physics, mut player) = grounded_setup();
        player.vfx = LaunchVfx {
            template: None,
            anchor: Some(Vec2::ZERO),
        };

        let input = input_pressing(InputAction::Interact);
        player.update(&physics, &input, DT);
        let mut spawner = RecordingSpawner::default();
        player.fixed_update(&mut physics, &mut spawner);

        // Launch impulse still applies, only the effect is skipped
        assert!(spawner.spawned.is_empty());
        assert!(player.body.linvel(&physics).x < 0.0);
    }

    #[test]
    fn test_animator_jump_trigger_fires_once() {
        let (mut physics, mut player) = grounded_setup();

        let input = input_pressing(InputAction::Jump);
        player.update(&physics, &input, DT);
        player.fixed_update(&mut physics, &mut NullEffectSpawner);

        let mut animator = RecordingAnimator::default();
        player.sync_animator(&physics, &mut animator);
        assert_eq!(animator.triggers, vec![params::JUMP]);

        let mut animator = RecordingAnimator::default();
        player.sync_animator(&physics, &mut animator);
        assert!(animator.triggers.is_empty());
    }

    #[test]
    fn test_despawn_is_idempotent_and_quiesces() {
        let (mut physics, mut player) = grounded_setup();

        player.despawn(&mut physics);
        player.despawn(&mut physics);
        assert!(!player.body.is_spawned());

        // Updates against a despawned body are no-ops
        let input = input_pressing(InputAction::Jump);
        player.update(&physics, &input, DT);
        player.fixed_update(&mut physics, &mut NullEffectSpawner);
        assert_eq!(player.body.linvel(&physics), Vec2::ZERO);
    }
}
