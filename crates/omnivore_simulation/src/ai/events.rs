//! AI Events — переходы FSM и перевыбор behavior
//!
//! Только для наблюдения (логи, хост, тесты): сами системы AI их не читают.

use bevy::prelude::*;

use crate::ai::{AIPhase, Behavior};

/// FSM перешла в другое состояние
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AIStateChanged {
    pub entity: Entity,
    pub from: AIPhase,
    pub to: AIPhase,
}

/// Перевыбор behavior в Combat
#[derive(Event, Debug, Clone, PartialEq)]
pub struct BehaviorChanged {
    pub entity: Entity,
    pub behavior: Behavior,
    pub circle_direction: f32,
}
