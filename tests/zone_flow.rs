mod common;

use bevy::prelude::*;
use disco_cop::common::events::CombatEvent;
use disco_cop::plugins::enemies::{Enemy, EnemyLifeState};
use disco_cop::plugins::world::Barrier;

fn living_enemies(app: &mut App) -> Vec<Entity> {
    app.world_mut()
        .query_filtered::<(Entity, &EnemyLifeState), With<Enemy>>()
        .iter(app.world())
        .filter(|(_, life)| life.is_alive())
        .map(|(e, _)| e)
        .collect()
}

#[test]
fn first_arena_seals_spawns_and_clears() {
    let mut app = common::app_headless();
    let mut log = common::EventLog::new(&app);
    for _ in 0..2 {
        log.update(&mut app);
    }
    let player = common::place_sturdy_player(&mut app, Vec2::new(600.0, 60.0));

    let cleared = |e: &CombatEvent| matches!(e, CombatEvent::ZoneCleared { .. });
    for _ in 0..900 {
        for enemy in living_enemies(&mut app) {
            common::strike(&mut app, player, enemy, 10_000.0);
        }
        log.update(&mut app);
        if log.count(cleared) > 0 {
            break;
        }
    }

    let entered = log
        .index_of(|e| matches!(e, CombatEvent::ZoneEntered { .. }))
        .expect("zone entered");
    let cleared_at = log.index_of(cleared).expect("zone cleared");
    assert!(entered < cleared_at);
    assert_eq!(log.count(|e| matches!(e, CombatEvent::ZoneEntered { .. })), 1);
    assert_eq!(log.count(|e| matches!(e, CombatEvent::EntitySpawned { .. })), 5);
    assert_eq!(log.count(|e| matches!(e, CombatEvent::EntityDied { .. })), 5);

    for _ in 0..30 {
        log.update(&mut app);
    }
    assert_eq!(log.count(cleared), 1);
    let world = app.world_mut();
    assert_eq!(world.query::<&Barrier>().iter(world).count(), 0, "walls are down");
}
