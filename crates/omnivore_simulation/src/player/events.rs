//! Player input events
//!
//! Хост (input backend) пишет их до FixedUpdate; `process_player_input` читает в Input фазе.

use bevy::prelude::*;

/// Одно действие игрока
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PlayerInputEvent {
    /// Стики движения: x — вправо, y — вперёд. Значение держится до следующего Move.
    Move(Vec2),
    /// Обзор: x — поворот вправо. Держится до следующего Look.
    Look(Vec2),
    /// > 0 — sprint включен
    Sprint(f32),
    Dodge,
    LightAttack,
    HeavyAttack,
}
