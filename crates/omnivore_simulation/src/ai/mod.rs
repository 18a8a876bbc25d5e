//! AI decision-making module
//!
//! FSM врага: Unaware → Searching → Combat, плюс терминальный Dead.
//! В Combat враг переключается между Attack и Circle по таймеру и по концу combo.

use bevy::prelude::*;

use crate::SimulationSet;

pub mod components;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use components::{AIConfig, AIPhase, AIState, Behavior, EnemyAgent};
pub use events::{AIStateChanged, BehaviorChanged};
pub use systems::{
    choose_behavior, circle_destination, disable_ai_on_death, face_look_targets,
    reselect_behavior, restart_reselection_on_combo_end, run_enemy_fsm, tick_reselection,
    tick_reselection_timers, update_enemy_fsm, FsmOutcome, Reselection,
};

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. tick_reselection_timers — countdown перевыбора (Decision)
/// 2. update_enemy_fsm — переходы FSM, навигация, атака (Decision)
/// 3. disable_ai_on_death, restart_reselection_on_combo_end — реакции на combat события
/// 4. face_look_targets — поворот к точке взгляда (Motion, после навигации)
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AIStateChanged>()
            .add_event::<BehaviorChanged>();

        app.add_systems(
            FixedUpdate,
            (
                (tick_reselection_timers, update_enemy_fsm)
                    .chain()
                    .in_set(SimulationSet::Decision),
                (disable_ai_on_death, restart_reselection_on_combo_end)
                    .chain()
                    .in_set(SimulationSet::Reactions),
                face_look_targets
                    .in_set(SimulationSet::Motion)
                    .after(crate::movement::steer_navigation_agents),
            ),
        );
    }
}
