//! Enemy FSM: Unaware → Searching → Combat (+ Dead).
//!
//! Вся логика тика — в `run_enemy_fsm` (без ECS), система только
//! собирает компоненты и позицию игрока.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::systems::reselection::reselect_behavior;
use crate::ai::{AIConfig, AIPhase, AIState, AIStateChanged, Behavior, BehaviorChanged, EnemyAgent};
use crate::combat::MeleeWeapon;
use crate::components::{MovementStats, NavigationAgent, Player};
use crate::DeterministicRng;

/// Что произошло за тик
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FsmOutcome {
    pub transition: Option<(AIPhase, AIPhase)>,
    pub attack_started: bool,
    /// Behavior, выбранный при входе в Combat
    pub reselected: Option<Behavior>,
}

/// Точка назначения орбиты: offset от игрока, повёрнутый вокруг вертикали
/// на `circle_angle_step × direction`.
///
/// Горизонтальная часть offset приводится к `circle_radius` (если оба ненулевые).
pub fn circle_destination(
    position: Vec3,
    player_position: Vec3,
    direction: f32,
    config: &AIConfig,
) -> Vec3 {
    let offset = position - player_position;
    let mut planar = Vec3::new(offset.x, 0.0, offset.z);

    if config.circle_radius > 0.0 && planar.length_squared() > 0.0001 {
        planar = planar.normalize() * config.circle_radius;
    }

    let rotation = Quat::from_rotation_y(config.circle_angle_step * direction);
    player_position + rotation * planar + Vec3::Y * offset.y
}

/// Один тик FSM врага.
#[allow(clippy::too_many_arguments)]
pub fn run_enemy_fsm<R: Rng + ?Sized>(
    state: &mut AIState,
    agent: &mut EnemyAgent,
    config: &AIConfig,
    stats: &MovementStats,
    navigation: &mut NavigationAgent,
    weapon: &mut MeleeWeapon,
    position: Vec3,
    player_position: Vec3,
    rng: &mut R,
) -> FsmOutcome {
    let mut outcome = FsmOutcome::default();
    let from = state.phase();
    let distance_sq = position.distance_squared(player_position);
    let alert_sq = config.alert_radius * config.alert_radius;
    let combat_sq = config.combat_radius * config.combat_radius;

    match state {
        AIState::Dead => return outcome,

        AIState::Unaware => {
            agent.look_target = Some(agent.idle_look_point);

            if distance_sq < alert_sq {
                *state = AIState::Searching;
                navigation.speed = stats.sprint_speed;
                agent.running = true;
            }
        }

        AIState::Searching => {
            // Смотрим по ходу движения
            agent.look_target = None;
            navigation.set_destination(player_position);

            if distance_sq < combat_sq {
                *state = AIState::combat();
                agent.running = false;
                outcome.reselected = reselect_behavior(state, agent, config, rng.gen::<f32>());
            }
        }

        AIState::Combat { behavior, .. } => {
            let behavior = *behavior;
            agent.look_target = Some(player_position + Vec3::Y * config.look_height);

            if weapon.attacking() {
                navigation.speed = 0.0;
            }

            match behavior {
                Behavior::Circle => {
                    navigation.speed = config.circle_speed;
                    navigation.set_destination(circle_destination(
                        position,
                        player_position,
                        agent.circle_direction,
                        config,
                    ));
                }
                Behavior::Attack => {
                    navigation.speed = stats.move_speed;
                    navigation.set_destination(player_position);

                    if distance_sq < config.melee_range_sq && !weapon.attacking() {
                        outcome.attack_started = weapon.attack(config.melee_attack_index);
                    }
                }
            }

            // Атака могла начаться в этом тике
            if weapon.attacking() {
                navigation.speed = 0.0;
            }

            if distance_sq >= combat_sq {
                // Pending перевыбор уходит вместе с Combat
                *state = AIState::Searching;
                navigation.speed = stats.sprint_speed;
                agent.running = true;
            }
        }
    }

    let to = state.phase();
    if from != to {
        outcome.transition = Some((from, to));
    }

    outcome
}

/// Система: FSM всех живых врагов
pub fn update_enemy_fsm(
    mut enemies: Query<
        (
            Entity,
            &Transform,
            &mut AIState,
            &mut EnemyAgent,
            &AIConfig,
            &MovementStats,
            &mut NavigationAgent,
            &mut MeleeWeapon,
        ),
        Without<Player>,
    >,
    players: Query<&Transform, (With<Player>, Without<EnemyAgent>)>,
    mut rng: ResMut<DeterministicRng>,
    mut state_events: EventWriter<AIStateChanged>,
    mut behavior_events: EventWriter<BehaviorChanged>,
) {
    // Нет игрока — AI стоит
    let Ok(player_transform) = players.single() else {
        return;
    };
    let player_position = player_transform.translation;

    for (entity, transform, mut state, mut agent, config, stats, mut navigation, mut weapon) in
        enemies.iter_mut()
    {
        if state.is_dead() {
            continue;
        }

        let outcome = run_enemy_fsm(
            &mut state,
            &mut agent,
            config,
            stats,
            &mut navigation,
            &mut weapon,
            transform.translation,
            player_position,
            &mut rng.rng,
        );

        if let Some((from, to)) = outcome.transition {
            crate::log(&format!("AI: {:?} {:?} → {:?}", entity, from, to));
            state_events.write(AIStateChanged { entity, from, to });
        }
        if let Some(behavior) = outcome.reselected {
            crate::log(&format!(
                "🎲 {:?} engaged with {:?} (direction {})",
                entity, behavior, agent.circle_direction
            ));
            behavior_events.write(BehaviorChanged {
                entity,
                behavior,
                circle_direction: agent.circle_direction,
            });
        }
        if outcome.attack_started {
            crate::log(&format!("⚔️ {:?} melee attack", entity));
        }
    }
}
