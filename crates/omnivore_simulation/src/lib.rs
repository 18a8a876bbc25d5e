//! Omnivore Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: AI врагов (Unaware → Searching → Combat),
//! player controller, melee combo и параметры animator'а.
//!
//! Хост (движок) отвечает за рендер и input: пишет `PlayerInputEvent`,
//! читает Transform / AnimatorParams / события.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod animation;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod movement;
pub mod player;
pub mod spawn;

// Re-export базовых компонентов для удобства
pub use ai::{AIPlugin, AIStateChanged, BehaviorChanged};
pub use animation::AnimationPlugin;
pub use combat::{
    AttackEnded, CombatPlugin, ComboEnded, DamageDealt, Dead, EntityDied, MeleeHit, MeleeWeapon,
    WeaponConfig, WindupStarted,
};
pub use components::*;
pub use config::{ConfigError, SimulationConfig};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel,
    LogPrinter,
};
pub use movement::MovementPlugin;
pub use player::{PlayerInputEvent, PlayerPlugin};
pub use spawn::{spawn_enemy, spawn_player};

/// Фазы FixedUpdate тика (выполняются строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Player input → контроллер
    Input,
    /// AI: перевыбор behavior, FSM
    Decision,
    /// Swing, hits, damage, смерть
    Combat,
    /// Реакции на combat события
    Reactions,
    /// Интеграция движения, facing
    Motion,
    /// AnimatorParams
    Presentation,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Берёт `SimulationConfig` из world (или Default), RNG не перезаписывает,
/// если он уже вставлен.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationConfig>();
        let config = app.world().resource::<SimulationConfig>().clone();

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(config.seed));
        }

        app.insert_resource(Time::<Fixed>::from_hz(config.tick_hz))
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Input,
                    SimulationSet::Decision,
                    SimulationSet::Combat,
                    SimulationSet::Reactions,
                    SimulationSet::Motion,
                    SimulationSet::Presentation,
                )
                    .chain(),
            )
            .add_plugins((
                PlayerPlugin,
                AIPlugin,
                CombatPlugin,
                MovementPlugin,
                AnimationPlugin,
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт headless App с полной симуляцией (default config + seed)
pub fn create_headless_app(seed: u64) -> App {
    build_headless_app(SimulationConfig {
        seed,
        ..default()
    })
}

/// Создаёт headless App с заданным config
///
/// Config проверяется до сборки App: невалидный (например `tick_hz <= 0`)
/// возвращается как `ConfigError::Invalid`.
pub fn create_headless_app_with_config(config: SimulationConfig) -> Result<App, ConfigError> {
    config.validate()?;
    Ok(build_headless_app(config))
}

/// Каждый `App::update()` двигает время ровно на один fixed тик
/// (первый update — нулевой delta, тиков нет).
fn build_headless_app(config: SimulationConfig) -> App {
    let mut app = App::new();
    init_logger();

    let tick = Duration::from_secs_f64(1.0 / config.tick_hz);
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(tick))
        .insert_resource(DeterministicRng::new(config.seed))
        .insert_resource(config)
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
