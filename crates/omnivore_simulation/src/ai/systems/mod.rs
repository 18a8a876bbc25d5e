//! AI systems (FSM, reselection, facing, reactions)

pub mod fsm;
pub mod movement;
pub mod reactions;
pub mod reselection;

#[cfg(test)]
mod fsm_tests;

pub use fsm::*;
pub use movement::*;
pub use reactions::*;
pub use reselection::*;
