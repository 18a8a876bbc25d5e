//! Damage application и смерть
//!
//! MeleeHit → Health → DamageDealt / EntityDied → Dead marker.

use bevy::prelude::*;

use crate::ai::EnemyAgent;
use crate::combat::{MeleeHit, MeleeWeapon};
use crate::components::{
    AnimTrigger, AnimatorParams, Health, MovementController, NavigationAgent, PlayerController,
};

/// Событие: урон нанесен
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
    pub target_died: bool,
}

/// Событие: entity умер (health == 0)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Компонент-маркер: entity мертв
///
/// Терминальное состояние — трупы остаются на месте, никакие системы их не двигают.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Dead;

/// Система: apply damage от MeleeHit событий
pub fn apply_damage(
    mut hit_events: EventReader<MeleeHit>,
    mut damage_dealt_events: EventWriter<DamageDealt>,
    mut entity_died_events: EventWriter<EntityDied>,
    mut targets: Query<&mut Health>,
) {
    for hit in hit_events.read() {
        let Ok(mut health) = targets.get_mut(hit.target) else {
            crate::log_warning(&format!("MeleeHit: target {:?} has no Health", hit.target));
            continue;
        };

        // Уже мертвых не добиваем (повторный EntityDied не нужен)
        if !health.is_alive() {
            continue;
        }

        health.take_damage(hit.damage);
        let died = !health.is_alive();

        damage_dealt_events.write(DamageDealt {
            attacker: hit.attacker,
            target: hit.target,
            damage: hit.damage,
            target_died: died,
        });

        crate::log(&format!(
            "💥 {:?} → {:?}: {} damage (health {}/{})",
            hit.attacker, hit.target, hit.damage, health.current, health.max
        ));

        if died {
            entity_died_events.write(EntityDied {
                entity: hit.target,
                killer: Some(hit.attacker),
            });
            crate::log_info(&format!("☠️ {:?} killed by {:?}", hit.target, hit.attacker));
        }
    }
}

/// Система: остановить мёртвых
///
/// Обнуляет движение/навигацию/swing/input сразу, Dead marker — через Commands.
/// Animator замирает в позе покоя: presentation системы мёртвых не трогают.
pub fn handle_deaths(
    mut commands: Commands,
    mut death_events: EventReader<EntityDied>,
    mut bodies: Query<(
        Option<&mut MovementController>,
        Option<&mut NavigationAgent>,
        Option<&mut MeleeWeapon>,
        Option<&mut AnimatorParams>,
        Option<&mut PlayerController>,
        Option<&mut EnemyAgent>,
    )>,
) {
    for event in death_events.read() {
        if let Ok((controller, navigation, weapon, animator, input, agent)) =
            bodies.get_mut(event.entity)
        {
            if let Some(mut controller) = controller {
                controller.halt();
            }
            if let Some(mut navigation) = navigation {
                navigation.stop();
            }
            if let Some(mut weapon) = weapon {
                weapon.interrupt();
            }
            if let Some(mut input) = input {
                input.move_input = Vec2::ZERO;
                input.look_input = Vec2::ZERO;
            }
            if let Some(mut agent) = agent {
                agent.running = false;
                agent.look_target = None;
            }
            if let Some(mut animator) = animator {
                animator.walking = false;
                animator.running = false;
                animator.direction = Vec2::ZERO;
                animator.speed = 0.0;
                animator.attacking = false;
                animator.trigger(AnimTrigger::Death);
            }
        }

        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.insert(Dead);
        }
    }
}
