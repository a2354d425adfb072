//! Sidescroll - headless character controller demo
//!
//! Runs the player controller through a scripted input sequence against
//! a flat ground strip and logs what the character does. The renderer
//! and animator are external systems; here they are stand-ins backed by
//! tracing output.

mod settings;

use anyhow::Result;
use glam::Vec2;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

use sidescroll_core::{GameTime, TimeConfig};
use sidescroll_game::player::AnimatorSink;
use sidescroll_game::{EffectId, EffectSpawner, InputHandler, LaunchVfx, MovementConfig, PlayerController};
use sidescroll_physics::{PhysicsConfig, PhysicsWorld};

use settings::GameSettings;

/// Animator stand-in that logs parameter changes
#[derive(Debug, Default)]
struct TracingAnimator;

impl AnimatorSink for TracingAnimator {
    fn set_bool(&mut self, param: &'static str, value: bool) {
        debug!(param, value, "animator bool");
    }

    fn set_float(&mut self, param: &'static str, value: f32) {
        debug!(param, value, "animator float");
    }

    fn set_trigger(&mut self, param: &'static str) {
        info!(param, "animator trigger");
    }
}

/// Effect spawner stand-in that logs spawn requests
#[derive(Debug, Default)]
struct TracingEffects;

impl EffectSpawner for TracingEffects {
    fn spawn(&mut self, effect: EffectId, position: Vec2) {
        info!(effect = effect.0, x = position.x, y = position.y, "spawned effect");
    }
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    info!("Starting sidescroll demo...");

    let settings = GameSettings::load();
    let movement = match settings.movement.validate() {
        Ok(()) => settings.movement.clone(),
        Err(e) => {
            warn!("Invalid movement settings: {}, using defaults", e);
            MovementConfig::default()
        }
    };

    let mut time = GameTime::new(TimeConfig {
        time_scale: settings.gameplay.time_scale,
        fixed_timestep: settings.gameplay.fixed_timestep,
        ..TimeConfig::default()
    });

    let mut physics = PhysicsWorld::with_config(PhysicsConfig {
        timestep: settings.gameplay.fixed_timestep,
        ..PhysicsConfig::default()
    });
    physics.add_ground_box(Vec2::new(0.0, -0.5), Vec2::new(100.0, 0.5));

    let mut player = PlayerController::with_config(movement);
    player.vfx = LaunchVfx {
        template: Some(EffectId(1)),
        anchor: Some(Vec2::new(-0.4, 0.2)),
    };
    player.spawn(&mut physics, Vec2::new(0.0, 0.9));

    let mut input = InputHandler::new();
    let mut animator = TracingAnimator;
    let mut effects = TracingEffects;

    // Scripted session: run right, jump, turn around, launch backwards
    let script: &[(u64, KeyCode, ElementState)] = &[
        (10, KeyCode::KeyD, ElementState::Pressed),
        (60, KeyCode::Space, ElementState::Pressed),
        (63, KeyCode::Space, ElementState::Released),
        (130, KeyCode::KeyD, ElementState::Released),
        (140, KeyCode::KeyA, ElementState::Pressed),
        (200, KeyCode::KeyA, ElementState::Released),
        (220, KeyCode::KeyE, ElementState::Pressed),
        (223, KeyCode::KeyE, ElementState::Released),
    ];

    const DT: f32 = 1.0 / 60.0;
    for frame in 0..360u64 {
        for (at, key, state) in script {
            if *at == frame {
                input.handle_keyboard(PhysicalKey::Code(*key), *state);
            }
        }

        time.update(DT);
        player.update(&physics, &input.state, time.delta_time);
        for _ in 0..time.fixed_steps() {
            player.fixed_update(&mut physics, &mut effects);
            physics.step();
        }
        player.sync_animator(&physics, &mut animator);
        input.end_frame();

        if frame % 30 == 0 {
            let pos = player.position(&physics);
            info!(
                frame,
                x = pos.x,
                y = pos.y,
                grounded = player.is_grounded(&physics),
                flip_x = player.flip_x(),
                speed = player.current_speed(),
                "tick"
            );
        }
    }

    player.despawn(&mut physics);
    info!("Demo complete");

    if let Err(e) = settings.save() {
        warn!("Failed to persist settings: {}", e);
    }

    Ok(())
}
