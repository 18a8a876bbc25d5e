//! Enemy AI integration test
//!
//! Полный headless App: враг замечает игрока, входит в Combat, атакует,
//! умирает и больше не меняет состояние.

use bevy::prelude::*;
use omnivore_simulation::ai::{AIPhase, AIState};
use omnivore_simulation::*;

/// Все AIStateChanged за прогон
#[derive(Resource, Default)]
struct Transitions(Vec<AIStateChanged>);

fn record_transitions(mut events: EventReader<AIStateChanged>, mut log: ResMut<Transitions>) {
    log.0.extend(events.read().cloned());
}

fn create_ai_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.init_resource::<Transitions>().add_systems(
        FixedUpdate,
        record_transitions.after(SimulationSet::Presentation),
    );
    app
}

fn spawn_pair(app: &mut App, enemy_position: Vec3) -> (Entity, Entity) {
    let config = app.world().resource::<SimulationConfig>().clone();
    let (player, enemy) = {
        let mut commands = app.world_mut().commands();
        let player = spawn_player(&mut commands, &config, Vec3::ZERO);
        let enemy = spawn_enemy(
            &mut commands,
            &config,
            enemy_position,
            enemy_position + Vec3::X,
        );
        (player, enemy)
    };
    app.world_mut().flush();
    (player, enemy)
}

fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

fn phase(app: &App, entity: Entity) -> AIPhase {
    app.world().get::<AIState>(entity).unwrap().phase()
}

#[test]
fn test_enemy_notices_and_engages_player() {
    let mut app = create_ai_app(42);
    let (_player, enemy) = spawn_pair(&mut app, Vec3::new(0.0, 0.0, 10.0));

    // 2 секунды: Searching спринтом, потом Combat
    run_ticks(&mut app, 121);

    assert_eq!(phase(&app, enemy), AIPhase::Combat);

    let transitions: Vec<(AIPhase, AIPhase)> = app
        .world()
        .resource::<Transitions>()
        .0
        .iter()
        .map(|t| (t.from, t.to))
        .collect();
    assert_eq!(
        &transitions[..2],
        &[
            (AIPhase::Unaware, AIPhase::Searching),
            (AIPhase::Searching, AIPhase::Combat),
        ]
    );

    // Враг подошёл ближе combat radius и смотрит на игрока
    let transform = app.world().get::<Transform>(enemy).unwrap();
    assert!(transform.translation.length() < 6.0);
    let to_player = (-transform.translation).with_y(0.0).normalize();
    assert!(transform.forward().dot(to_player) > 0.9);
}

#[test]
fn test_enemy_outside_alert_radius_stays_unaware() {
    let mut app = create_ai_app(42);
    let (_player, enemy) = spawn_pair(&mut app, Vec3::new(0.0, 0.0, 20.0));

    run_ticks(&mut app, 120);

    assert_eq!(phase(&app, enemy), AIPhase::Unaware);
    let transform = app.world().get::<Transform>(enemy).unwrap();
    assert_eq!(transform.translation, Vec3::new(0.0, 0.0, 20.0));
    // Смотрит в idle точку (+X)
    assert!(transform.forward().dot(Vec3::X) > 0.99);
    assert!(app.world().resource::<Transitions>().0.is_empty());
}

#[test]
fn test_enemies_idle_without_player() {
    let mut app = create_ai_app(42);
    let config = app.world().resource::<SimulationConfig>().clone();
    let enemy = spawn_enemy(
        &mut app.world_mut().commands(),
        &config,
        Vec3::new(1.0, 0.0, 1.0),
        Vec3::ZERO,
    );
    app.world_mut().flush();

    run_ticks(&mut app, 60);

    assert_eq!(phase(&app, enemy), AIPhase::Unaware);
    assert_eq!(
        app.world().get::<Transform>(enemy).unwrap().translation,
        Vec3::new(1.0, 0.0, 1.0)
    );
}

#[test]
fn test_enemy_attacks_player_in_melee_range() {
    // Бросок всегда выпадает на Attack
    let mut config = SimulationConfig::default();
    config.enemy.circle_threshold = 0.0;
    config.enemy.flip_threshold = 0.0;

    let mut app = create_headless_app_with_config(config).unwrap();
    let (player, enemy) = spawn_pair(&mut app, Vec3::new(0.0, 0.0, 1.0));

    run_ticks(&mut app, 120);

    assert_eq!(
        app.world().get::<AIState>(enemy).unwrap().behavior(),
        Some(ai::Behavior::Attack)
    );
    let health = app.world().get::<Health>(player).unwrap();
    assert!(health.current < health.max);
}

#[test]
fn test_dead_enemy_is_frozen() {
    let mut app = create_ai_app(42);
    let (player, enemy) = spawn_pair(&mut app, Vec3::new(0.0, 0.0, 4.0));

    run_ticks(&mut app, 10);
    assert_eq!(phase(&app, enemy), AIPhase::Combat);

    app.world_mut().send_event(MeleeHit {
        attacker: player,
        target: enemy,
        damage: 1000,
    });
    run_ticks(&mut app, 2);

    assert_eq!(phase(&app, enemy), AIPhase::Dead);
    assert!(app.world().get::<Dead>(enemy).is_some());
    assert_eq!(app.world().get::<Health>(enemy).unwrap().current, 0);

    let frozen = *app.world().get::<Transform>(enemy).unwrap();
    run_ticks(&mut app, 120);

    assert_eq!(phase(&app, enemy), AIPhase::Dead);
    assert_eq!(*app.world().get::<Transform>(enemy).unwrap(), frozen);
    assert!(!app.world().get::<MeleeWeapon>(enemy).unwrap().attacking());

    let transitions = &app.world().resource::<Transitions>().0;
    let deaths = transitions
        .iter()
        .filter(|t| t.entity == enemy && t.to == AIPhase::Dead)
        .count();
    assert_eq!(deaths, 1);
}

/// Номер fixed тика каждого BehaviorChanged
#[derive(Resource, Default)]
struct BehaviorLog {
    tick: u32,
    changes: Vec<(u32, BehaviorChanged)>,
}

fn record_behaviors(mut events: EventReader<BehaviorChanged>, mut log: ResMut<BehaviorLog>) {
    log.tick += 1;
    let tick = log.tick;
    log.changes.extend(events.read().cloned().map(|event| (tick, event)));
}

#[test]
fn test_circle_countdown_rerolls_after_interval() {
    // Бросок всегда выпадает на Circle без смены направления
    let mut config = SimulationConfig::default();
    config.enemy.circle_threshold = 1.0;
    config.enemy.flip_threshold = 1.0;
    let interval = config.enemy.reselect_interval;

    let mut app = create_headless_app_with_config(config).unwrap();
    app.init_resource::<BehaviorLog>().add_systems(
        FixedUpdate,
        record_behaviors.after(SimulationSet::Presentation),
    );
    let (_player, enemy) = spawn_pair(&mut app, Vec3::new(0.0, 0.0, 5.0));

    // Больше двух интервалов
    run_ticks(&mut app, 360);

    let log = app.world().resource::<BehaviorLog>();
    let ticks: Vec<u32> = log
        .changes
        .iter()
        .filter(|(_, event)| event.entity == enemy)
        .map(|(tick, _)| *tick)
        .collect();
    assert!(ticks.len() >= 2, "reselections at ticks {:?}", ticks);
    assert!(log
        .changes
        .iter()
        .all(|(_, event)| event.behavior == ai::Behavior::Circle && event.circle_direction == 1.0));

    // Countdown взводится при входе в Combat и срабатывает через reselect_interval
    let expected = (interval * 60.0).round() as u32;
    let gap = ticks[1] - ticks[0];
    assert!(
        (expected - 1..=expected + 1).contains(&gap),
        "gap {} ticks, expected ~{}",
        gap,
        expected
    );

    assert_eq!(
        app.world().get::<AIState>(enemy).unwrap().behavior(),
        Some(ai::Behavior::Circle)
    );
}
