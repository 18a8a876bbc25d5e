//! Tests for enemy FSM tick logic.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::ai::systems::fsm::{circle_destination, run_enemy_fsm, FsmOutcome};
    use crate::ai::systems::reselection::tick_reselection;
    use crate::ai::{AIConfig, AIPhase, AIState, Behavior, EnemyAgent};
    use crate::combat::MeleeWeapon;
    use crate::components::{MovementStats, NavigationAgent};

    /// Враг со всеми коллабораторами, игрок в начале координат
    struct Harness {
        state: AIState,
        agent: EnemyAgent,
        config: AIConfig,
        stats: MovementStats,
        navigation: NavigationAgent,
        weapon: MeleeWeapon,
        rng: ChaCha8Rng,
    }

    impl Harness {
        fn new(state: AIState) -> Self {
            Self {
                state,
                agent: EnemyAgent::new(Vec3::new(0.0, 0.0, -50.0)),
                config: AIConfig::default(),
                stats: MovementStats::default(),
                navigation: NavigationAgent::default(),
                weapon: MeleeWeapon::default(),
                rng: ChaCha8Rng::seed_from_u64(42),
            }
        }

        fn attack_mode() -> Self {
            Self::new(AIState::combat())
        }

        fn tick_at(&mut self, position: Vec3) -> FsmOutcome {
            run_enemy_fsm(
                &mut self.state,
                &mut self.agent,
                &self.config,
                &self.stats,
                &mut self.navigation,
                &mut self.weapon,
                position,
                Vec3::ZERO,
                &mut self.rng,
            )
        }
    }

    fn on_x(distance: f32) -> Vec3 {
        Vec3::new(distance, 0.0, 0.0)
    }

    // --- Unaware → Searching ---

    #[test]
    fn test_unaware_exact_alert_radius_stays_unaware() {
        let mut h = Harness::new(AIState::Unaware);
        let outcome = h.tick_at(on_x(12.0));

        assert_eq!(h.state, AIState::Unaware);
        assert_eq!(outcome.transition, None);
        assert_eq!(h.agent.look_target, Some(h.agent.idle_look_point));
    }

    #[test]
    fn test_unaware_just_outside_alert_radius_stays_unaware() {
        let mut h = Harness::new(AIState::Unaware);
        h.tick_at(on_x(12.001));
        assert_eq!(h.state, AIState::Unaware);
    }

    #[test]
    fn test_unaware_just_inside_alert_radius_starts_searching() {
        let mut h = Harness::new(AIState::Unaware);
        let outcome = h.tick_at(on_x(11.999));

        assert_eq!(h.state, AIState::Searching);
        assert_eq!(outcome.transition, Some((AIPhase::Unaware, AIPhase::Searching)));
        assert_eq!(h.navigation.speed, h.stats.sprint_speed);
        assert!(h.agent.running);
    }

    // --- Searching → Combat ---

    #[test]
    fn test_searching_chases_player() {
        let mut h = Harness::new(AIState::Searching);
        h.tick_at(on_x(9.0));

        assert_eq!(h.state, AIState::Searching);
        assert_eq!(h.navigation.destination, Some(Vec3::ZERO));
        assert_eq!(h.agent.look_target, None);
    }

    #[test]
    fn test_searching_exact_combat_radius_stays_searching() {
        let mut h = Harness::new(AIState::Searching);
        h.tick_at(on_x(6.0));
        assert_eq!(h.state, AIState::Searching);
    }

    #[test]
    fn test_searching_inside_combat_radius_engages() {
        let mut h = Harness::new(AIState::Searching);
        h.agent.running = true;
        let outcome = h.tick_at(on_x(5.999));

        assert_eq!(h.state.phase(), AIPhase::Combat);
        assert_eq!(outcome.transition, Some((AIPhase::Searching, AIPhase::Combat)));
        assert!(outcome.reselected.is_some());
        assert_eq!(h.state.behavior(), outcome.reselected);
        assert!(!h.agent.running);

        // Circle → countdown запущен, Attack → нет
        match h.state.behavior() {
            Some(Behavior::Circle) => assert!(h.state.reselection_pending()),
            Some(Behavior::Attack) => assert!(!h.state.reselection_pending()),
            None => unreachable!(),
        }
    }

    // --- Combat → Searching ---

    #[test]
    fn test_combat_exact_combat_radius_leaves_combat() {
        let mut h = Harness::attack_mode();
        let outcome = h.tick_at(on_x(6.0));

        assert_eq!(h.state, AIState::Searching);
        assert_eq!(outcome.transition, Some((AIPhase::Combat, AIPhase::Searching)));
        assert_eq!(h.navigation.speed, h.stats.sprint_speed);
        assert!(h.agent.running);
    }

    #[test]
    fn test_combat_just_inside_combat_radius_stays() {
        let mut h = Harness::attack_mode();
        h.tick_at(on_x(5.999));
        assert_eq!(h.state.phase(), AIPhase::Combat);
    }

    #[test]
    fn test_leaving_combat_cancels_reselection() {
        let mut h = Harness::new(AIState::Combat {
            behavior: Behavior::Circle,
            reselect_in: Some(2.5),
        });
        let direction_before = h.agent.circle_direction;

        h.tick_at(on_x(10.0));
        assert_eq!(h.state, AIState::Searching);
        assert!(!h.state.reselection_pending());

        // Время идёт дальше интервала — запоздалого перевыбора нет
        for _ in 0..30 {
            let reselected = tick_reselection(&mut h.state, &mut h.agent, &h.config, 0.1, &mut h.rng);
            assert_eq!(reselected, None);
        }
        assert_eq!(h.state, AIState::Searching);
        assert_eq!(h.state.behavior(), None);
        assert_eq!(h.agent.circle_direction, direction_before);
    }

    // --- Combat: Attack ---

    #[test]
    fn test_attack_approaches_player_at_move_speed() {
        let mut h = Harness::attack_mode();
        h.tick_at(on_x(4.0));

        assert_eq!(h.navigation.destination, Some(Vec3::ZERO));
        assert_eq!(h.navigation.speed, h.stats.move_speed);
        assert!(!h.weapon.attacking());
        assert_eq!(h.agent.look_target, Some(Vec3::Y * h.config.look_height));
    }

    #[test]
    fn test_attack_triggers_inside_melee_range_and_freezes() {
        let mut h = Harness::attack_mode();
        let outcome = h.tick_at(on_x(1.0));

        assert!(outcome.attack_started);
        assert!(h.weapon.attacking());
        assert_eq!(h.weapon.swing.as_ref().unwrap().combo, h.config.melee_attack_index);
        assert_eq!(h.navigation.speed, 0.0);
    }

    #[test]
    fn test_attack_not_triggered_at_melee_boundary() {
        let mut h = Harness::attack_mode();
        // distance² == 2.0
        let outcome = h.tick_at(Vec3::new(1.0, 0.0, 1.0));

        assert!(!outcome.attack_started);
        assert!(!h.weapon.attacking());
    }

    #[test]
    fn test_attack_never_triggers_twice_while_attacking() {
        let mut h = Harness::attack_mode();
        assert!(h.tick_at(on_x(1.0)).attack_started);
        assert!(!h.tick_at(on_x(1.0)).attack_started);
        assert!(!h.tick_at(on_x(0.5)).attack_started);

        // Swing закончился → следующий тик снова бьёт
        h.weapon.tick(10.0);
        assert!(!h.weapon.attacking());
        assert!(h.tick_at(on_x(1.0)).attack_started);
    }

    #[test]
    fn test_dead_agent_ignores_everything() {
        let mut h = Harness::new(AIState::Dead);
        let outcome = h.tick_at(on_x(0.5));

        assert_eq!(h.state, AIState::Dead);
        assert_eq!(outcome, FsmOutcome::default());
        assert!(!h.weapon.attacking());
    }

    // --- Combat: Circle ---

    #[test]
    fn test_circle_sets_orbit_destination_and_speed() {
        let mut h = Harness::new(AIState::Combat {
            behavior: Behavior::Circle,
            reselect_in: Some(2.5),
        });
        h.tick_at(on_x(4.0));

        let expected = circle_destination(on_x(4.0), Vec3::ZERO, 1.0, &h.config);
        assert_eq!(h.navigation.destination, Some(expected));
        assert_eq!(h.navigation.speed, h.config.circle_speed);
        assert!(!h.weapon.attacking());
    }

    #[test]
    fn test_circle_frozen_while_weapon_swinging() {
        let mut h = Harness::new(AIState::Combat {
            behavior: Behavior::Circle,
            reselect_in: Some(2.5),
        });
        h.weapon.attack(0);
        h.tick_at(on_x(4.0));

        assert_eq!(h.navigation.speed, 0.0);
    }

    #[test]
    fn test_circle_directions_are_mirror_images() {
        let config = AIConfig::default();
        let enemy = Vec3::new(4.0, 0.0, 0.0);
        let player = Vec3::ZERO;

        let cw = circle_destination(enemy, player, 1.0, &config);
        let ccw = circle_destination(enemy, player, -1.0, &config);

        // Зеркально относительно оси player → enemy
        assert!((cw.x - ccw.x).abs() < 1e-5);
        assert!((cw.z + ccw.z).abs() < 1e-5);
        assert!(cw.z.abs() > 0.1);

        // Радиус сохраняется
        assert!((cw.length() - config.circle_radius).abs() < 1e-4);

        let angle = config.circle_angle_step;
        assert!((cw.x - 4.0 * angle.cos()).abs() < 1e-4);
    }

    #[test]
    fn test_circle_keeps_distance_when_radius_disabled() {
        let config = AIConfig {
            circle_radius: 0.0,
            ..default()
        };
        let enemy = Vec3::new(0.0, 0.0, 7.0);
        let destination = circle_destination(enemy, Vec3::ZERO, 1.0, &config);

        assert!((destination.length() - 7.0).abs() < 1e-4);
    }
}
