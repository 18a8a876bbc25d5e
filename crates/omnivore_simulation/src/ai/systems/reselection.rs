//! Behavior reselection (Circle vs Attack) while in Combat.
//!
//! Перевыбор запускается при входе в Combat и после конца combo.
//! Circle перезапускает countdown, Attack — нет: враг атакует до конца combo.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::{AIConfig, AIState, Behavior, BehaviorChanged, EnemyAgent};
use crate::combat::ComboEnded;
use crate::DeterministicRng;

/// Результат одного броска
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reselection {
    Circle,
    /// Circle в другую сторону
    CircleFlipped,
    Attack,
}

/// Бросок → тактика. `draw` ожидается в [0, 1).
pub fn choose_behavior(draw: f32, config: &AIConfig) -> Reselection {
    if draw < config.circle_threshold {
        Reselection::Circle
    } else if draw < config.flip_threshold {
        Reselection::CircleFlipped
    } else {
        Reselection::Attack
    }
}

/// Применить бросок к агенту.
///
/// Возвращает новый behavior, или None если агент уже не в Combat
/// (запоздалый перевыбор игнорируется).
pub fn reselect_behavior(
    state: &mut AIState,
    agent: &mut EnemyAgent,
    config: &AIConfig,
    draw: f32,
) -> Option<Behavior> {
    let AIState::Combat {
        behavior,
        reselect_in,
    } = state
    else {
        return None;
    };

    match choose_behavior(draw, config) {
        Reselection::Circle => {
            *behavior = Behavior::Circle;
            *reselect_in = Some(config.reselect_interval);
        }
        Reselection::CircleFlipped => {
            agent.flip_circle_direction();
            *behavior = Behavior::Circle;
            *reselect_in = Some(config.reselect_interval);
        }
        Reselection::Attack => {
            *behavior = Behavior::Attack;
            *reselect_in = None;
        }
    }

    Some(*behavior)
}

/// Отсчитать countdown; по истечении — новый бросок.
pub fn tick_reselection<R: Rng + ?Sized>(
    state: &mut AIState,
    agent: &mut EnemyAgent,
    config: &AIConfig,
    delta: f32,
    rng: &mut R,
) -> Option<Behavior> {
    let expired = match state {
        AIState::Combat {
            reselect_in: Some(remaining),
            ..
        } => {
            *remaining -= delta;
            *remaining <= 0.0
        }
        _ => false,
    };

    if !expired {
        return None;
    }

    reselect_behavior(state, agent, config, rng.gen::<f32>())
}

/// System: countdown перевыбора (до FSM, в Decision фазе)
pub fn tick_reselection_timers(
    mut agents: Query<(Entity, &mut AIState, &mut EnemyAgent, &AIConfig)>,
    time: Res<Time<Fixed>>,
    mut rng: ResMut<DeterministicRng>,
    mut behavior_events: EventWriter<BehaviorChanged>,
) {
    let delta = time.delta_secs();

    for (entity, mut state, mut agent, config) in agents.iter_mut() {
        if let Some(behavior) = tick_reselection(&mut state, &mut agent, config, delta, &mut rng.rng) {
            crate::log(&format!(
                "🎲 {:?} reselected {:?} (direction {})",
                entity, behavior, agent.circle_direction
            ));
            behavior_events.write(BehaviorChanged {
                entity,
                behavior,
                circle_direction: agent.circle_direction,
            });
        }
    }
}

/// System: конец combo → новый перевыбор (заменяет pending countdown)
pub fn restart_reselection_on_combo_end(
    mut combo_events: EventReader<ComboEnded>,
    mut agents: Query<(&mut AIState, &mut EnemyAgent, &AIConfig)>,
    mut rng: ResMut<DeterministicRng>,
    mut behavior_events: EventWriter<BehaviorChanged>,
) {
    for event in combo_events.read() {
        let Ok((mut state, mut agent, config)) = agents.get_mut(event.entity) else {
            continue;
        };

        let draw = rng.rng.gen::<f32>();
        if let Some(behavior) = reselect_behavior(&mut state, &mut agent, config, draw) {
            crate::log(&format!(
                "🎲 {:?} combo ended → {:?} (direction {})",
                event.entity, behavior, agent.circle_direction
            ));
            behavior_events.write(BehaviorChanged {
                entity: event.entity,
                behavior,
                circle_direction: agent.circle_direction,
            });
        }
    }
}
