//! Combat module
//!
//! ECS ответственность:
//! - Melee weapon: swing phases, combo chains, hit window
//! - Hit detection: reach + facing (без физики)
//! - Damage: Health, DamageDealt, EntityDied, Dead
//!
//! AI и player input только вызывают `MeleeWeapon::attack` — всё остальное здесь.

use bevy::prelude::*;

use crate::SimulationSet;

pub mod damage;
pub mod melee;


// Re-export основных типов
pub use damage::{apply_damage, handle_deaths, DamageDealt, Dead, EntityDied};
pub use melee::{
    calculate_damage, detect_melee_hits, update_melee_weapons, AttackEnded, Combo, ComboAttack,
    ComboChain, ComboEnded, MeleeHit, MeleeWeapon, Swing, SwingPhase, WeaponConfig, WeaponSignal,
    WeaponStats, WindupStarted,
};

/// Combat Plugin
///
/// Порядок выполнения (SimulationSet::Combat):
/// 1. update_melee_weapons — фазы swing, combo window, события
/// 2. detect_melee_hits — MeleeHit для целей в радиусе
/// 3. apply_damage — Health, DamageDealt, EntityDied
/// 4. handle_deaths — Dead marker, остановка движения
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WindupStarted>()
            .add_event::<AttackEnded>()
            .add_event::<ComboEnded>()
            .add_event::<MeleeHit>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>();

        app.add_systems(
            FixedUpdate,
            (
                update_melee_weapons,
                detect_melee_hits,
                apply_damage,
                handle_deaths,
            )
                .chain()
                .in_set(SimulationSet::Combat),
        );
    }
}
