//! Headless симуляция Omnivore
//!
//! Игрок в центре, кольцо врагов вокруг, scripted input.
//! Опционально: путь к RON config первым аргументом.

use std::f32::consts::TAU;

use bevy::prelude::*;
use omnivore_simulation::ai::AIState;
use omnivore_simulation::{
    create_headless_app_with_config, log_error, spawn_enemy, spawn_player, AnimatorParams, Health,
    PlayerInputEvent, SimulationConfig,
};

const ENEMY_COUNT: usize = 4;
const ENEMY_RING_RADIUS: f32 = 10.0;
const TICK_COUNT: u32 = 1200;

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => match SimulationConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("Config {}: {}", path, err));
                std::process::exit(1);
            }
        },
        None => SimulationConfig::default(),
    };

    println!(
        "Starting Omnivore headless simulation (seed: {}, {} Hz)",
        config.seed, config.tick_hz
    );

    let mut app = match create_headless_app_with_config(config.clone()) {
        Ok(app) => app,
        Err(err) => {
            log_error(&format!("Config: {}", err));
            std::process::exit(1);
        }
    };

    let player = {
        let mut commands = app.world_mut().commands();
        let player = spawn_player(&mut commands, &config, Vec3::ZERO);
        for i in 0..ENEMY_COUNT {
            let angle = TAU * i as f32 / ENEMY_COUNT as f32;
            let position = Vec3::new(angle.cos(), 0.0, angle.sin()) * ENEMY_RING_RADIUS;
            spawn_enemy(&mut commands, &config, position, position * 2.0);
        }
        player
    };
    app.world_mut().flush();

    let mut triggers_fired = 0;
    for tick in 0..TICK_COUNT {
        for event in scripted_input(tick) {
            app.world_mut().send_event(event);
        }

        app.update();
        triggers_fired += drain_animator_triggers(&mut app);

        if tick % 120 == 0 {
            print_summary(&mut app, player, tick);
            println!("  animator triggers so far: {}", triggers_fired);
        }
    }

    print_summary(&mut app, player, TICK_COUNT);
    println!("  animator triggers total: {}", triggers_fired);
    println!("Simulation complete!");
}

/// Scripted input: шаг вперёд, медленный поворот, атаки и рывки
fn scripted_input(tick: u32) -> Vec<PlayerInputEvent> {
    let mut events = Vec::new();

    match tick {
        0 => events.push(PlayerInputEvent::Move(Vec2::new(0.0, 0.5))),
        120 => {
            events.push(PlayerInputEvent::Move(Vec2::ZERO));
            events.push(PlayerInputEvent::Look(Vec2::new(0.3, 0.0)));
        }
        600 => events.push(PlayerInputEvent::Sprint(1.0)),
        720 => events.push(PlayerInputEvent::Sprint(0.0)),
        _ => {}
    }

    if tick > 120 && tick % 45 == 0 {
        events.push(PlayerInputEvent::LightAttack);
    }
    if tick > 120 && tick % 200 == 0 {
        events.push(PlayerInputEvent::HeavyAttack);
    }
    if tick % 300 == 150 {
        events.push(PlayerInputEvent::Dodge);
    }

    events
}

/// Хост забирает triggers каждый кадр, как animator
fn drain_animator_triggers(app: &mut App) -> usize {
    let world = app.world_mut();
    let mut animators = world.query::<&mut AnimatorParams>();
    animators
        .iter_mut(world)
        .map(|mut animator| animator.drain_triggers().len())
        .sum()
}

fn print_summary(app: &mut App, player: Entity, tick: u32) {
    let world = app.world_mut();

    if let Some(health) = world.get::<Health>(player) {
        println!("Tick {}: player HP {}/{}", tick, health.current, health.max);
    }

    let mut enemies = world.query::<(Entity, &AIState, &Health, &Transform)>();
    for (entity, state, health, transform) in enemies.iter(world) {
        println!(
            "  {:?}: {:?} behavior={:?} HP {} at ({:.1}, {:.1})",
            entity,
            state.phase(),
            state.behavior(),
            health.current,
            transform.translation.x,
            transform.translation.z
        );
    }
}
