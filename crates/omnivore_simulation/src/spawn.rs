//! Spawn helpers: игрок и враги с параметрами из SimulationConfig

use bevy::prelude::*;

use crate::ai::EnemyAgent;
use crate::components::{
    Actor, Health, NavigationAgent, Player, PlayerController, ENEMY_FACTION, PLAYER_FACTION,
};
use crate::SimulationConfig;

/// Spawn игрока
///
/// Player (Required: PlayerController, MovementController, MovementStats,
/// MeleeWeapon, AnimatorParams) + Actor (Required: Health).
pub fn spawn_player(commands: &mut Commands, config: &SimulationConfig, position: Vec3) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position),
            Actor::new(PLAYER_FACTION),
            Health::new(config.player_health),
            Player,
            PlayerController::with_sensitivity(config.look_sensitivity),
            config.player_movement,
            config.player_weapon.build(),
        ))
        .id()
}

/// Spawn врага (стартует Unaware, смотрит в `idle_look_point`)
pub fn spawn_enemy(
    commands: &mut Commands,
    config: &SimulationConfig,
    position: Vec3,
    idle_look_point: Vec3,
) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position),
            Actor::new(ENEMY_FACTION),
            Health::new(config.enemy_health),
            EnemyAgent::new(idle_look_point),
            config.enemy.clone(),
            config.enemy_movement,
            NavigationAgent {
                speed: config.enemy_movement.move_speed,
                ..default()
            },
            config.enemy_weapon.build(),
        ))
        .id()
}
