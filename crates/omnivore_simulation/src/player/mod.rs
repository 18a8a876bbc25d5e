//! Player controller
//!
//! Input события → PlayerController / MovementController / MeleeWeapon.
//! Мертвый игрок input игнорирует.

use bevy::prelude::*;

use crate::combat::{Dead, MeleeWeapon};
use crate::components::{
    AnimTrigger, AnimatorParams, MovementController, MovementStats, Player, PlayerController,
};
use crate::SimulationSet;

pub mod events;

pub use events::PlayerInputEvent;

/// Combo index лёгкой атаки
pub const LIGHT_ATTACK_INDEX: usize = 0;
/// Combo index тяжёлой атаки
pub const HEAVY_ATTACK_INDEX: usize = 1;

/// Применить одно событие к компонентам игрока
pub fn apply_input_event(
    event: PlayerInputEvent,
    input: &mut PlayerController,
    controller: &mut MovementController,
    stats: &MovementStats,
    weapon: &mut MeleeWeapon,
    animator: &mut AnimatorParams,
) {
    match event {
        PlayerInputEvent::Move(value) => input.move_input = value,
        PlayerInputEvent::Look(value) => input.look_input = value,
        PlayerInputEvent::Sprint(value) => controller.sprinting = value > 0.0,
        PlayerInputEvent::Dodge => {
            if !controller.is_dashing() && controller.dash(input.local_move_direction(), stats) {
                animator.trigger(AnimTrigger::Dodge);
            }
        }
        PlayerInputEvent::LightAttack => {
            if !weapon.attacking() && weapon.attack(LIGHT_ATTACK_INDEX) {
                animator.trigger(AnimTrigger::LightAttack);
            }
        }
        PlayerInputEvent::HeavyAttack => {
            if !weapon.attacking() && weapon.attack(HEAVY_ATTACK_INDEX) {
                animator.trigger(AnimTrigger::Shoot);
            }
        }
    }
}

/// Система: input события → компоненты игрока
pub fn process_player_input(
    mut input_events: EventReader<PlayerInputEvent>,
    mut players: Query<
        (
            &mut PlayerController,
            &mut MovementController,
            &MovementStats,
            &mut MeleeWeapon,
            &mut AnimatorParams,
        ),
        (With<Player>, Without<Dead>),
    >,
) {
    // Нет живого игрока — события просто сгорают
    let Ok((mut input, mut controller, stats, mut weapon, mut animator)) = players.single_mut()
    else {
        input_events.clear();
        return;
    };

    for event in input_events.read() {
        apply_input_event(
            *event,
            &mut input,
            &mut controller,
            stats,
            &mut weapon,
            &mut animator,
        );
    }
}

/// Система: поворот по look input + передача move input контроллеру
pub fn apply_player_controls(
    mut players: Query<
        (&PlayerController, &mut MovementController, &mut Transform),
        (With<Player>, Without<Dead>),
    >,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (input, mut controller, mut transform) in players.iter_mut() {
        let yaw = input.yaw_delta(delta);
        if yaw != 0.0 {
            transform.rotate_y(yaw);
        }
        controller.move_local(input.local_move_direction());
    }
}

/// Player Plugin (SimulationSet::Input)
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerInputEvent>();

        app.add_systems(
            FixedUpdate,
            (process_player_input, apply_player_controls)
                .chain()
                .in_set(SimulationSet::Input),
        );
    }
}
