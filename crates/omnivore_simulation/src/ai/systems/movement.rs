//! AI facing systems.

use bevy::prelude::*;

use crate::ai::{AIState, EnemyAgent};
use crate::components::NavigationAgent;

/// Горизонтальный yaw к точке (None — слишком близко, не крутимся)
pub fn facing_toward(position: Vec3, target: Vec3) -> Option<Vec3> {
    let flat = Vec3::new(target.x, position.y, target.z);
    if flat.distance_squared(position) < 0.0001 {
        return None;
    }
    Some(flat)
}

/// Система: враг смотрит на look_target, иначе по ходу движения
///
/// Вертикальная составляющая игнорируется (без наклона корпуса).
pub fn face_look_targets(
    mut agents: Query<(&AIState, &EnemyAgent, &NavigationAgent, &mut Transform)>,
) {
    for (state, agent, navigation, mut transform) in agents.iter_mut() {
        if state.is_dead() {
            continue;
        }

        let position = transform.translation;
        let target = match agent.look_target {
            Some(point) => point,
            None => position + navigation.velocity,
        };

        if let Some(flat) = facing_toward(position, target) {
            transform.look_at(flat, Vec3::Y);
        }
    }
}
