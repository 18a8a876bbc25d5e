//! Movement компоненты: скорости, kinematic controller, навигация

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Скоростные характеристики актора (метры/сек)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct MovementStats {
    pub move_speed: f32,
    pub sprint_speed: f32,
    pub dash_speed: f32,
    /// Длительность рывка (секунды)
    pub dash_duration: f32,
}

impl Default for MovementStats {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            sprint_speed: 6.0,
            dash_speed: 12.0,
            dash_duration: 0.2,
        }
    }
}

/// Активный рывок (dodge)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Dash {
    /// Направление в локальных координатах актора (normalized)
    pub direction: Vec3,
    /// Оставшееся время рывка (секунды)
    pub remaining: f32,
}

/// Kinematic controller для player-controlled акторов
///
/// Пишется input системами (`move_local`, `dash`, `sprinting`),
/// интегрируется `integrate_movement` в Motion фазе.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct MovementController {
    /// Желаемое направление в локальных координатах (x — вправо, -z — вперёд)
    pub direction: Vec3,
    pub sprinting: bool,
    pub dash: Option<Dash>,
    /// Мировая скорость, посчитанная на последнем тике
    pub velocity: Vec3,
}

impl MovementController {
    pub fn move_local(&mut self, direction: Vec3) {
        self.direction = direction;
    }

    pub fn is_dashing(&self) -> bool {
        self.dash.is_some()
    }

    /// Начать рывок. Возвращает false если рывок уже идёт.
    ///
    /// Нулевое направление → рывок назад (+Z локально).
    pub fn dash(&mut self, direction: Vec3, stats: &MovementStats) -> bool {
        if self.is_dashing() {
            return false;
        }

        let direction = if direction.length_squared() > 0.0001 {
            direction.normalize()
        } else {
            Vec3::Z
        };

        self.dash = Some(Dash {
            direction,
            remaining: stats.dash_duration,
        });
        true
    }

    /// Остановиться немедленно (смерть)
    pub fn halt(&mut self) {
        self.direction = Vec3::ZERO;
        self.sprinting = false;
        self.dash = None;
        self.velocity = Vec3::ZERO;
    }

    /// Горизонтальная скорость (для animator)
    pub fn horizontal_speed(&self) -> f32 {
        Vec2::new(self.velocity.x, self.velocity.z).length()
    }
}

/// Навигационный агент (прямолинейное ведение к destination)
///
/// AI пишет destination + speed, `steer_navigation_agents` двигает Transform.
/// Pathfinding нет: хост может подменять destination промежуточными точками.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct NavigationAgent {
    pub destination: Option<Vec3>,
    pub speed: f32,
    /// Ближе этого расстояния к destination — стоим
    pub stopping_distance: f32,
    /// Мировая скорость, посчитанная на последнем тике
    pub velocity: Vec3,
}

impl Default for NavigationAgent {
    fn default() -> Self {
        Self {
            destination: None,
            speed: 0.0,
            stopping_distance: 0.5,
            velocity: Vec3::ZERO,
        }
    }
}

impl NavigationAgent {
    pub fn set_destination(&mut self, destination: Vec3) {
        self.destination = Some(destination);
    }

    pub fn stop(&mut self) {
        self.destination = None;
        self.speed = 0.0;
        self.velocity = Vec3::ZERO;
    }

    /// Скорость движения к destination из текущей позиции (только XZ)
    pub fn desired_velocity(&self, position: Vec3) -> Vec3 {
        let Some(destination) = self.destination else {
            return Vec3::ZERO;
        };

        let to_target = Vec3::new(destination.x - position.x, 0.0, destination.z - position.z);
        if to_target.length() <= self.stopping_distance {
            return Vec3::ZERO;
        }

        to_target.normalize_or_zero() * self.speed
    }
}
