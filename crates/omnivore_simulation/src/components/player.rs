//! Player control components
//!
//! Отмечает entity которым управляет игрок через input (в отличие от AI).

use bevy::prelude::*;

use crate::combat::MeleeWeapon;
use crate::components::{AnimatorParams, MovementController, MovementStats};

/// Marker component для player-controlled entity
///
/// - AI systems ищут игрока через `With<Player>`
/// - Input systems используют `With<Player>` filter
///
/// В single-player режиме только один entity имеет этот компонент.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(PlayerController, MovementController, MovementStats, MeleeWeapon, AnimatorParams)]
pub struct Player;

/// Последние значения непрерывного input + чувствительность обзора
///
/// Дискретные действия (sprint/dodge/attack) сюда не попадают —
/// они сразу пробрасываются в MovementController/MeleeWeapon.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PlayerController {
    /// Радианы поворота в секунду на единицу look input
    pub look_sensitivity: f32,
    /// x — вправо, y — вперёд
    pub move_input: Vec2,
    /// x — поворот вправо
    pub look_input: Vec2,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self {
            look_sensitivity: 2.0,
            move_input: Vec2::ZERO,
            look_input: Vec2::ZERO,
        }
    }
}

impl PlayerController {
    pub fn with_sensitivity(look_sensitivity: f32) -> Self {
        Self {
            look_sensitivity,
            ..default()
        }
    }

    /// Move input в локальных координатах актора (вперёд = -Z)
    pub fn local_move_direction(&self) -> Vec3 {
        Vec3::new(self.move_input.x, 0.0, -self.move_input.y)
    }

    /// Поворот вокруг вертикальной оси за тик (положительный look x — вправо)
    pub fn yaw_delta(&self, delta: f32) -> f32 {
        -self.look_input.x * self.look_sensitivity * delta
    }
}
