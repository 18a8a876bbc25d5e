//! AI компоненты: state machine, config, agent

// AIState/AIConfig/EnemyAgent живут в crate::ai::components,
// здесь re-export для единообразия импорта.
pub use crate::ai::{AIConfig, AIPhase, AIState, Behavior, EnemyAgent};
