//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (faction, health)
//! - movement: скорости, kinematic controller, навигация
//! - ai: искусственный интеллект (AIState, AIConfig, EnemyAgent)
//! - player: player control (Player, PlayerController)
//! - animation: параметры animator'а для хоста

pub mod actor;
pub mod ai;
pub mod animation;
pub mod movement;
pub mod player;

// Re-exports для удобного импорта
pub use actor::*;
pub use ai::*;
pub use animation::*;
pub use movement::*;
pub use player::*;
