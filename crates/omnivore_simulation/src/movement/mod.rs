//! Movement domain — kinematic controller и навигация
//!
//! Содержит:
//! - integrate_movement: MovementController (player) → Transform
//! - steer_navigation_agents: NavigationAgent (AI) → Transform
//!
//! Физики нет: движение только по горизонтали, без коллизий.

use bevy::prelude::*;

use crate::combat::Dead;
use crate::components::{MovementController, MovementStats, NavigationAgent};
use crate::SimulationSet;

/// Мировая скорость контроллера за тик.
///
/// Продвигает таймер рывка; рывок, который закончился в этом тике,
/// снимается сразу.
pub fn controller_velocity(
    controller: &mut MovementController,
    stats: &MovementStats,
    rotation: Quat,
    delta: f32,
) -> Vec3 {
    let local = if let Some(dash) = controller.dash.as_mut() {
        let velocity = dash.direction * stats.dash_speed;
        dash.remaining -= delta;
        if dash.remaining <= 0.0 {
            controller.dash = None;
        }
        velocity
    } else {
        let speed = if controller.sprinting {
            stats.sprint_speed
        } else {
            stats.move_speed
        };
        controller.direction.clamp_length_max(1.0) * speed
    };

    let world = rotation * local;
    Vec3::new(world.x, 0.0, world.z)
}

/// Система: интеграция kinematic контроллера
pub fn integrate_movement(
    mut movers: Query<(&mut Transform, &mut MovementController, &MovementStats), Without<Dead>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut transform, mut controller, stats) in movers.iter_mut() {
        let velocity = controller_velocity(&mut controller, stats, transform.rotation, delta);
        controller.velocity = velocity;
        transform.translation += velocity * delta;
    }
}

/// Система: прямолинейное ведение к destination
pub fn steer_navigation_agents(
    mut agents: Query<(&mut Transform, &mut NavigationAgent), Without<Dead>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut transform, mut navigation) in agents.iter_mut() {
        let velocity = navigation.desired_velocity(transform.translation);
        navigation.velocity = velocity;
        transform.translation += velocity * delta;
    }
}

/// Movement Plugin (SimulationSet::Motion)
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (integrate_movement, steer_navigation_agents).in_set(SimulationSet::Motion),
        );
    }
}
