//! Animator parameter block
//!
//! Симуляция не анимирует — она только пишет параметры,
//! которые хост (renderer/animation layer) читает каждый кадр.

use bevy::prelude::*;

/// One-shot animator triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AnimTrigger {
    Death,
    Dodge,
    LightAttack,
    Shoot,
    ComboEnd,
}

/// Параметры animator'а (Walking, Running, DirectionX/Y, Speed, Attacking + triggers)
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AnimatorParams {
    pub walking: bool,
    pub running: bool,
    /// DirectionX / DirectionY (локальное направление движения)
    pub direction: Vec2,
    pub speed: f32,
    pub attacking: bool,
    /// Накопленные triggers, хост забирает через `drain_triggers`
    pub triggers: Vec<AnimTrigger>,
}

impl AnimatorParams {
    pub fn trigger(&mut self, trigger: AnimTrigger) {
        self.triggers.push(trigger);
    }

    pub fn drain_triggers(&mut self) -> Vec<AnimTrigger> {
        std::mem::take(&mut self.triggers)
    }

    pub fn has_trigger(&self, trigger: AnimTrigger) -> bool {
        self.triggers.contains(&trigger)
    }
}

/// Локальное направление движения для animator'а
///
/// Возвращает (speed, direction). При нулевой скорости direction = Vec2::ZERO
/// (без деления на ноль).
pub fn planar_speed_and_direction(local_velocity: Vec3) -> (f32, Vec2) {
    let planar = Vec2::new(local_velocity.x, local_velocity.z);
    let speed = planar.length();

    if speed > 0.0 {
        (speed, planar / speed)
    } else {
        (0.0, Vec2::ZERO)
    }
}
