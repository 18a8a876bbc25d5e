//! Animator parameter systems (SimulationSet::Presentation)
//!
//! Пишут AnimatorParams из состояния симуляции. Triggers копятся,
//! пока хост их не заберёт.

use bevy::prelude::*;

use crate::ai::EnemyAgent;
use crate::combat::{ComboEnded, Dead, MeleeWeapon};
use crate::components::{
    planar_speed_and_direction, AnimTrigger, AnimatorParams, MovementController, NavigationAgent,
    Player, PlayerController,
};
use crate::SimulationSet;

/// Порог скорости для Walking
pub const WALK_SPEED_THRESHOLD: f32 = 0.1;

/// Система: animator врагов из навигационной скорости
pub fn update_enemy_animators(
    mut enemies: Query<
        (
            &Transform,
            &NavigationAgent,
            &EnemyAgent,
            &MeleeWeapon,
            &mut AnimatorParams,
        ),
        (Without<Player>, Without<Dead>),
    >,
) {
    for (transform, navigation, agent, weapon, mut animator) in enemies.iter_mut() {
        let local_velocity = transform.rotation.inverse() * navigation.velocity;
        let (speed, direction) = planar_speed_and_direction(local_velocity);

        animator.speed = speed;
        animator.direction = direction;
        animator.walking = speed > WALK_SPEED_THRESHOLD;
        animator.running = agent.running;
        animator.attacking = weapon.attacking();
    }
}

/// Система: animator игрока из контроллера и input
pub fn update_player_animators(
    mut players: Query<
        (
            &PlayerController,
            &MovementController,
            &MeleeWeapon,
            &mut AnimatorParams,
        ),
        (With<Player>, Without<Dead>),
    >,
) {
    for (input, controller, weapon, mut animator) in players.iter_mut() {
        animator.speed = controller.horizontal_speed();
        animator.direction = input.move_input;
        animator.walking = input.move_input != Vec2::ZERO;
        animator.running = controller.sprinting;
        animator.attacking = weapon.attacking();
    }
}

/// Система: конец combo → ComboEnd trigger
pub fn trigger_combo_end(
    mut combo_events: EventReader<ComboEnded>,
    mut animators: Query<&mut AnimatorParams>,
) {
    for event in combo_events.read() {
        if let Ok(mut animator) = animators.get_mut(event.entity) {
            animator.trigger(AnimTrigger::ComboEnd);
        }
    }
}

/// Animation Plugin
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                update_enemy_animators,
                update_player_animators,
                trigger_combo_end,
            )
                .in_set(SimulationSet::Presentation),
        );
    }
}
