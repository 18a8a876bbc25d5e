//! AI reaction systems (death).

use bevy::prelude::*;

use crate::ai::{AIPhase, AIState, AIStateChanged};
use crate::combat::EntityDied;

/// System: смерть → AI в Dead state
///
/// Dead терминальный: FSM, перевыбор и facing больше не трогают агента.
pub fn disable_ai_on_death(
    mut death_events: EventReader<EntityDied>,
    mut agents: Query<&mut AIState>,
    mut state_events: EventWriter<AIStateChanged>,
) {
    for event in death_events.read() {
        let Ok(mut state) = agents.get_mut(event.entity) else {
            continue;
        };
        if state.is_dead() {
            continue;
        }

        let from = state.phase();
        *state = AIState::Dead;
        crate::log(&format!("💀 {:?} died → AI disabled", event.entity));
        state_events.write(AIStateChanged {
            entity: event.entity,
            from,
            to: AIPhase::Dead,
        });
    }
}
