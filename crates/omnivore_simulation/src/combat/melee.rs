//! Melee weapon: combos, swing phases, hit detection.
//!
//! A swing goes Windup → Active → Recovery. Calling `attack` again within
//! `combo_window` after a swing continues the chain; finishing the last step
//! (or letting the window expire) ends the combo.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::Dead;
use crate::components::{Actor, Health};

// ============================================================================
// Weapon data
// ============================================================================

/// Базовые характеристики оружия.
#[derive(Clone, Copy, Debug, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponStats {
    pub base_damage: u32,
    /// Hit distance from the wielder (meters)
    pub reach: f32,
}

impl Default for WeaponStats {
    fn default() -> Self {
        Self {
            base_damage: 10,
            reach: 1.6,
        }
    }
}

/// One attack of a combo chain.
#[derive(Clone, Debug, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboAttack {
    pub damage_mult: f32,
    pub windup: f32,
    pub active: f32,
    pub recovery: f32,
}

impl Default for ComboAttack {
    fn default() -> Self {
        Self {
            damage_mult: 1.0,
            windup: 0.3,
            active: 0.2,
            recovery: 0.3,
        }
    }
}

impl ComboAttack {
    pub fn new(damage_mult: f32, windup: f32, active: f32, recovery: f32) -> Self {
        Self {
            damage_mult,
            windup,
            active,
            recovery,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Reflect, Serialize, Deserialize)]
pub struct Combo {
    pub attacks: Vec<ComboAttack>,
}

/// Serializable weapon preset (config → `MeleeWeapon`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub stats: WeaponStats,
    /// Index = attack index passed to `MeleeWeapon::attack`
    pub combos: Vec<Combo>,
    pub combo_window: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            stats: WeaponStats::default(),
            combos: vec![
                // 0: light chain
                Combo {
                    attacks: vec![
                        ComboAttack::new(1.0, 0.25, 0.15, 0.25),
                        ComboAttack::new(1.2, 0.25, 0.15, 0.3),
                        ComboAttack::new(1.5, 0.35, 0.2, 0.45),
                    ],
                },
                // 1: heavy single hit
                Combo {
                    attacks: vec![ComboAttack::new(2.5, 0.6, 0.25, 0.6)],
                },
            ],
            combo_window: 0.5,
        }
    }
}

impl WeaponConfig {
    pub fn build(&self) -> MeleeWeapon {
        MeleeWeapon {
            stats: self.stats,
            combos: self.combos.clone(),
            combo_window: self.combo_window,
            swing: None,
            chain: None,
            signals: Vec::new(),
        }
    }
}

// ============================================================================
// Swing state
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub enum SwingPhase {
    Windup,
    /// Hit window
    Active,
    Recovery,
}

#[derive(Clone, Debug, Reflect)]
pub struct Swing {
    pub combo: usize,
    pub step: usize,
    pub phase: SwingPhase,
    /// Time remaining in current phase (seconds)
    pub phase_timer: f32,
    /// Entities already hit during this swing (prevents double-hits)
    pub hit_entities: Vec<Entity>,
}

/// Open combo window after a finished swing.
#[derive(Clone, Debug, Reflect)]
pub struct ComboChain {
    pub combo: usize,
    pub next_step: usize,
    pub window_remaining: f32,
}

/// Things that happened to the weapon since the last drain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub enum WeaponSignal {
    WindupStarted { combo: usize, step: usize },
    AttackEnded { combo: usize, step: usize },
    ComboEnded { combo: usize },
}

/// Melee weapon + combo state of an actor.
#[derive(Component, Clone, Debug, Reflect)]
#[reflect(Component)]
pub struct MeleeWeapon {
    pub stats: WeaponStats,
    pub combos: Vec<Combo>,
    pub combo_window: f32,
    pub swing: Option<Swing>,
    pub chain: Option<ComboChain>,
    signals: Vec<WeaponSignal>,
}

impl Default for MeleeWeapon {
    fn default() -> Self {
        WeaponConfig::default().build()
    }
}

impl MeleeWeapon {
    /// Swing in progress (any phase).
    pub fn attacking(&self) -> bool {
        self.swing.is_some()
    }

    pub fn is_hit_window(&self) -> bool {
        matches!(
            self.swing,
            Some(Swing {
                phase: SwingPhase::Active,
                ..
            })
        )
    }

    pub fn active_attack(&self) -> Option<&ComboAttack> {
        let swing = self.swing.as_ref()?;
        self.combos.get(swing.combo)?.attacks.get(swing.step)
    }

    /// Damage of the current swing: base_damage × damage_mult.
    pub fn active_damage(&self) -> Option<u32> {
        self.active_attack()
            .map(|attack| calculate_damage(self.stats.base_damage, attack.damage_mult))
    }

    /// Start a swing of combo `attack_index`.
    ///
    /// Returns false if already swinging or the combo doesn't exist.
    pub fn attack(&mut self, attack_index: usize) -> bool {
        if self.swing.is_some() {
            return false;
        }

        let Some(combo) = self.combos.get(attack_index) else {
            return false;
        };
        let chain_len = combo.attacks.len();
        if chain_len == 0 {
            return false;
        }

        let step = match self.chain.take() {
            Some(chain) if chain.combo == attack_index && chain.next_step < chain_len => {
                chain.next_step
            }
            Some(chain) => {
                // Другая цепочка — старая закончилась
                if chain.combo != attack_index {
                    self.signals.push(WeaponSignal::ComboEnded { combo: chain.combo });
                }
                0
            }
            None => 0,
        };

        let windup = combo.attacks[step].windup;

        self.swing = Some(Swing {
            combo: attack_index,
            step,
            phase: SwingPhase::Windup,
            phase_timer: windup,
            hit_entities: Vec::new(),
        });
        self.signals.push(WeaponSignal::WindupStarted {
            combo: attack_index,
            step,
        });

        true
    }

    /// Remember a hit target. Returns false if it was already hit this swing.
    pub fn register_hit(&mut self, target: Entity) -> bool {
        let Some(swing) = self.swing.as_mut() else {
            return false;
        };
        if swing.hit_entities.contains(&target) {
            return false;
        }
        swing.hit_entities.push(target);
        true
    }

    /// Advance swing phases and the combo window.
    pub fn tick(&mut self, delta: f32) {
        let Some(swing) = self.swing.as_mut() else {
            if let Some(chain) = self.chain.as_mut() {
                chain.window_remaining -= delta;
                if chain.window_remaining <= 0.0 {
                    let combo = chain.combo;
                    self.chain = None;
                    self.signals.push(WeaponSignal::ComboEnded { combo });
                }
            }
            return;
        };

        let Some(attack) = self
            .combos
            .get(swing.combo)
            .and_then(|combo| combo.attacks.get(swing.step))
        else {
            // Список combo изменился во время swing — обрываем swing
            self.swing = None;
            return;
        };

        swing.phase_timer -= delta;
        let mut finished = false;
        while swing.phase_timer <= 0.0 {
            match swing.phase {
                SwingPhase::Windup => {
                    swing.phase = SwingPhase::Active;
                    swing.phase_timer += attack.active;
                }
                SwingPhase::Active => {
                    swing.phase = SwingPhase::Recovery;
                    swing.phase_timer += attack.recovery;
                }
                SwingPhase::Recovery => {
                    finished = true;
                    break;
                }
            }
        }

        if !finished {
            return;
        }

        let (combo, step) = (swing.combo, swing.step);
        self.swing = None;
        self.signals.push(WeaponSignal::AttackEnded { combo, step });

        let chain_len = self.combos.get(combo).map_or(0, |c| c.attacks.len());
        if step + 1 >= chain_len {
            self.chain = None;
            self.signals.push(WeaponSignal::ComboEnded { combo });
        } else {
            self.chain = Some(ComboChain {
                combo,
                next_step: step + 1,
                window_remaining: self.combo_window,
            });
        }
    }

    /// Drop swing and chain without signals (death).
    pub fn interrupt(&mut self) {
        self.swing = None;
        self.chain = None;
    }

    pub fn drain_signals(&mut self) -> Vec<WeaponSignal> {
        std::mem::take(&mut self.signals)
    }
}

/// Final damage: base × mult, rounded.
pub fn calculate_damage(base_damage: u32, damage_mult: f32) -> u32 {
    (base_damage as f32 * damage_mult.max(0.0)).round() as u32
}

// ============================================================================
// Events
// ============================================================================

#[derive(Event, Debug, Clone, PartialEq)]
pub struct WindupStarted {
    pub entity: Entity,
    pub combo: usize,
    pub step: usize,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct AttackEnded {
    pub entity: Entity,
    pub combo: usize,
    pub step: usize,
}

/// Combo chain finished (last step done or window expired).
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ComboEnded {
    pub entity: Entity,
    pub combo: usize,
}

/// A swing connected with a hostile actor.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct MeleeHit {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
}

// ============================================================================
// Systems
// ============================================================================

/// System: tick weapons and publish their signals as events.
pub fn update_melee_weapons(
    mut weapons: Query<(Entity, &mut MeleeWeapon), Without<Dead>>,
    time: Res<Time<Fixed>>,
    mut windup_events: EventWriter<WindupStarted>,
    mut attack_end_events: EventWriter<AttackEnded>,
    mut combo_end_events: EventWriter<ComboEnded>,
) {
    let delta = time.delta_secs();

    for (entity, mut weapon) in weapons.iter_mut() {
        weapon.tick(delta);

        for signal in weapon.drain_signals() {
            match signal {
                WeaponSignal::WindupStarted { combo, step } => {
                    crate::log(&format!(
                        "⚔️ {:?} windup (combo {}, step {})",
                        entity, combo, step
                    ));
                    windup_events.write(WindupStarted {
                        entity,
                        combo,
                        step,
                    });
                }
                WeaponSignal::AttackEnded { combo, step } => {
                    attack_end_events.write(AttackEnded {
                        entity,
                        combo,
                        step,
                    });
                }
                WeaponSignal::ComboEnded { combo } => {
                    crate::log(&format!("✅ {:?} combo {} ended", entity, combo));
                    combo_end_events.write(ComboEnded { entity, combo });
                }
            }
        }
    }
}

/// System: hostile actors within reach and in front get hit once per swing.
pub fn detect_melee_hits(
    mut attackers: Query<(Entity, &Transform, &Actor, &mut MeleeWeapon), Without<Dead>>,
    targets: Query<(Entity, &Transform, &Actor, &Health)>,
    mut hit_events: EventWriter<MeleeHit>,
) {
    for (attacker, attacker_transform, attacker_actor, mut weapon) in attackers.iter_mut() {
        if !weapon.is_hit_window() {
            continue;
        }
        let Some(damage) = weapon.active_damage() else {
            continue;
        };

        let forward = *attacker_transform.forward();
        let reach = weapon.stats.reach;

        for (target, target_transform, target_actor, health) in targets.iter() {
            if target == attacker || !health.is_alive() || !attacker_actor.is_hostile_to(target_actor) {
                continue;
            }

            let to_target = target_transform.translation - attacker_transform.translation;
            let planar = Vec3::new(to_target.x, 0.0, to_target.z);
            if planar.length() > reach {
                continue;
            }
            // Бьём только перед собой
            if planar.length_squared() > 0.0001 && planar.dot(forward) <= 0.0 {
                continue;
            }

            if weapon.register_hit(target) {
                hit_events.write(MeleeHit {
                    attacker,
                    target,
                    damage,
                });
            }
        }
    }
}
