//! FSM AI components (state machine, config, enemy agent).

use std::f32::consts::PI;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::MeleeWeapon;
use crate::components::{AnimatorParams, MovementStats, NavigationAgent};

/// Тактика врага внутри Combat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum Behavior {
    /// Идём на игрока и бьём в упор
    #[default]
    Attack,
    /// Кружим вокруг игрока
    Circle,
}

/// AI FSM состояния
///
/// Behavior существует только внутри Combat, вместе с таймером перевыбора:
/// выход из Combat автоматически отменяет pending перевыбор.
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub enum AIState {
    /// Не заметил игрока, смотрит в idle точку
    #[default]
    Unaware,

    /// Бежит к последней позиции игрока
    Searching,

    /// Бой с игроком
    Combat {
        behavior: Behavior,
        /// Секунды до следующего перевыбора behavior (None — не запланирован)
        reselect_in: Option<f32>,
    },

    /// Актор мертв, AI отключен (терминальное)
    Dead,
}

/// Fieldless проекция AIState (для событий и логов)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AIPhase {
    Unaware,
    Searching,
    Combat,
    Dead,
}

impl AIState {
    /// Свежий Combat: Attack, перевыбор ещё не запущен
    pub fn combat() -> Self {
        Self::Combat {
            behavior: Behavior::Attack,
            reselect_in: None,
        }
    }

    pub fn phase(&self) -> AIPhase {
        match self {
            AIState::Unaware => AIPhase::Unaware,
            AIState::Searching => AIPhase::Searching,
            AIState::Combat { .. } => AIPhase::Combat,
            AIState::Dead => AIPhase::Dead,
        }
    }

    /// Behavior (только в Combat)
    pub fn behavior(&self) -> Option<Behavior> {
        match self {
            AIState::Combat { behavior, .. } => Some(*behavior),
            _ => None,
        }
    }

    pub fn is_dead(&self) -> bool {
        matches!(self, AIState::Dead)
    }

    pub fn reselection_pending(&self) -> bool {
        matches!(
            self,
            AIState::Combat {
                reselect_in: Some(_),
                ..
            }
        )
    }
}

/// Параметры AI врага
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct AIConfig {
    /// Unaware → Searching ближе этого радиуса
    pub alert_radius: f32,
    /// Searching ↔ Combat граница
    pub combat_radius: f32,
    /// Радиус орбиты при Circle (0 — сохранять текущую дистанцию)
    pub circle_radius: f32,
    pub circle_speed: f32,
    /// Угловой шаг орбиты (радианы)
    pub circle_angle_step: f32,
    /// Квадрат дистанции удара
    pub melee_range_sq: f32,
    /// Attack index для MeleeWeapon::attack
    pub melee_attack_index: usize,
    /// Секунды между перевыборами behavior при Circle
    pub reselect_interval: f32,
    /// draw < circle_threshold → Circle
    pub circle_threshold: f32,
    /// draw < flip_threshold → Circle со сменой направления, иначе Attack
    pub flip_threshold: f32,
    /// Высота точки взгляда над позицией игрока
    pub look_height: f32,
}

impl Default for AIConfig {
    fn default() -> Self {
        Self {
            alert_radius: 12.0,
            combat_radius: 6.0,
            circle_radius: 4.0,
            circle_speed: 2.0,
            circle_angle_step: PI / 5.0,
            melee_range_sq: 2.0,
            melee_attack_index: 0,
            reselect_interval: 2.5,
            circle_threshold: 0.5,
            flip_threshold: 0.75,
            look_height: 1.0,
        }
    }
}

/// Враг под управлением AI
///
/// Required Components подтягивают FSM, навигацию, оружие и animator.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
#[require(AIState, AIConfig, NavigationAgent, MovementStats, MeleeWeapon, AnimatorParams)]
pub struct EnemyAgent {
    /// Направление орбиты: +1 или -1
    pub circle_direction: f32,
    /// Куда смотреть пока Unaware
    pub idle_look_point: Vec3,
    /// Текущая точка взгляда (None — смотреть по ходу движения)
    pub look_target: Option<Vec3>,
    /// Бежит (Searching) — для animator
    pub running: bool,
}

impl Default for EnemyAgent {
    fn default() -> Self {
        Self {
            circle_direction: 1.0,
            idle_look_point: Vec3::ZERO,
            look_target: None,
            running: false,
        }
    }
}

impl EnemyAgent {
    pub fn new(idle_look_point: Vec3) -> Self {
        Self {
            idle_look_point,
            ..default()
        }
    }

    pub fn flip_circle_direction(&mut self) {
        self.circle_direction = -self.circle_direction;
    }
}
