use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::*;
use crate::common::test_utils::{queued_events, run_system_once, step_fixed};
use crate::plugins::player::PlayerSlot;
use crate::plugins::world::Barrier;

fn grunts(count: u32, delay: f32) -> WaveSpawner {
    WaveSpawner::new(Spawnable::Enemy(EnemyKind::Grunt), count, delay, Vec2::new(900.0, 40.0))
}

fn three_and_four() -> ScrollLockZone {
    ScrollLockZone::new(400.0, 1200.0, vec![grunts(3, 0.5), grunts(4, 0.25)])
}

// --------------------------------------------------------------------------------------
// Bookkeeping
// --------------------------------------------------------------------------------------

#[test]
fn spawner_emits_first_at_once_then_every_delay() {
    let mut s = grunts(3, 0.5);
    assert_eq!(s.tick(0.0), 1);
    assert_eq!(s.tick(0.25), 0);
    assert_eq!(s.tick(0.25), 1);
    // A long stall catches up without overshooting the count.
    assert_eq!(s.tick(10.0), 1);
    assert!(s.is_exhausted());
    assert_eq!(s.tick(10.0), 0);
    assert_eq!(s.spawned(), 3);
}

#[test]
fn entering_seals_exactly_once() {
    let mut z = three_and_four();
    assert_eq!(z.state(), ZoneState::Dormant);
    assert!(z.tick_spawners(1.0).is_empty(), "dormant zones do not spawn");

    assert!(z.enter());
    assert!(!z.enter());
    assert!(z.is_sealed());
}

#[test]
fn clears_only_after_all_seven_spawns_die() {
    let mut z = three_and_four();
    z.enter();

    let mut spawned = 0;
    for _ in 0..100 {
        spawned += z.tick_spawners(0.1).len();
    }
    assert_eq!(spawned, 7);
    assert_eq!(z.alive(), 7);
    assert!(z.spawners_exhausted());

    for _ in 0..6 {
        z.record_death();
        assert!(!z.try_clear());
    }
    z.record_death();
    assert!(z.try_clear());
    assert_eq!(z.state(), ZoneState::Cleared);
    assert!(!z.try_clear(), "cleared once");
}

#[test]
fn unfinished_spawners_hold_the_zone() {
    let mut z = three_and_four();
    z.enter();
    let first = z.tick_spawners(0.0).len();
    assert_eq!(first, 2);
    for _ in 0..first {
        z.record_death();
    }
    assert_eq!(z.alive(), 0);
    assert!(!z.try_clear());
}

#[test]
fn stage_ends_with_the_levels_boss() {
    let zones = stage_zones(2);
    let last = zones.last().expect("zones");
    assert_eq!(last.spawners.len(), 1);
    assert_eq!(last.spawners[0].what, Spawnable::Boss(BossKind::Arnoldo));
    assert!(zones.windows(2).all(|w| w[0].right < w[1].left));
}

#[test]
fn the_bee_gees_share_the_final_arena() {
    let zones = stage_zones(5);
    let last = zones.last().expect("zones");
    let lineup: Vec<_> = last.spawners.iter().map(|s| s.what).collect();
    assert_eq!(
        lineup,
        vec![
            Spawnable::Boss(BossKind::BarryGibb),
            Spawnable::Boss(BossKind::RobinGibb),
            Spawnable::Boss(BossKind::MauriceGibb),
        ]
    );
    for s in &last.spawners {
        assert!(last.contains(s.position.x), "{:?} spawns outside", s.what);
    }
    assert!(last.spawners[0].position.x > last.spawners[2].position.x);
}

// --------------------------------------------------------------------------------------
// Systems
// --------------------------------------------------------------------------------------

fn zone_world() -> World {
    let mut world = World::new();
    step_fixed(&mut world, 0.1);
    world.init_resource::<CombatEvents>();
    world.init_resource::<Messages<SpawnEnemyRequest>>();
    world.init_resource::<Messages<Killed>>();
    world
}

fn spawn_player_at(world: &mut World, x: f32) -> Entity {
    world
        .spawn((
            Player {
                slot: PlayerSlot(0),
                facing: 1.0,
            },
            Transform::from_xyz(x, 0.0, 0.0),
        ))
        .id()
}

fn kill(world: &mut World, entities: &[Entity]) {
    for &entity in entities {
        world.write_message(Killed {
            entity,
            position: Vec2::ZERO,
            source: None,
        });
    }
    run_system_once(world, count_zone_deaths);
    world.resource_mut::<Messages<Killed>>().clear();
    run_system_once(world, clear_zones);
}

#[test]
fn first_player_inside_seals_the_zone() {
    let mut world = zone_world();
    let zone = world.spawn(three_and_four()).id();
    spawn_player_at(&mut world, 100.0);

    run_system_once(&mut world, seal_entered_zones);
    assert!(queued_events(&world).is_empty());

    let downed = spawn_player_at(&mut world, 500.0);
    world.entity_mut(downed).insert(Downed);
    run_system_once(&mut world, seal_entered_zones);
    assert!(queued_events(&world).is_empty(), "downed players do not trigger");

    spawn_player_at(&mut world, 600.0);
    run_system_once(&mut world, seal_entered_zones);
    run_system_once(&mut world, seal_entered_zones);

    assert_eq!(queued_events(&world), vec![CombatEvent::ZoneEntered { zone }]);
    let z = world.get::<ScrollLockZone>(zone).unwrap();
    assert!(z.is_sealed());
    assert_eq!(z.barriers.len(), 2);
    for &b in &z.barriers {
        assert!(world.get::<Barrier>(b).is_some());
    }
}

#[test]
fn spawners_request_members_of_their_zone() {
    let mut world = zone_world();
    let zone = world.spawn(three_and_four()).id();
    world.get_mut::<ScrollLockZone>(zone).unwrap().enter();

    for _ in 0..20 {
        run_system_once(&mut world, run_spawners);
    }

    let msgs = world.resource::<Messages<SpawnEnemyRequest>>();
    let reqs: Vec<_> = msgs.get_cursor().read(msgs).copied().collect();
    assert_eq!(reqs.len(), 7);
    assert!(reqs.iter().all(|r| r.zone == Some(zone)));
}

#[test]
fn zone_counts_only_its_own_dead() {
    let mut world = zone_world();
    let zone = world.spawn(three_and_four()).id();
    let other = world
        .spawn(ScrollLockZone::new(2000.0, 2800.0, vec![grunts(1, 1.0)]))
        .id();
    spawn_player_at(&mut world, 500.0);
    run_system_once(&mut world, seal_entered_zones);
    for _ in 0..20 {
        run_system_once(&mut world, run_spawners);
    }

    let own: Vec<Entity> = (0..7).map(|_| world.spawn(ZoneMember(zone)).id()).collect();
    let foreign = world.spawn(ZoneMember(other)).id();
    let stray = world.spawn_empty().id();

    kill(&mut world, &own[..6]);
    kill(&mut world, &[foreign, stray]);
    assert_eq!(world.get::<ScrollLockZone>(zone).unwrap().alive(), 1);
    assert!(world.get::<ScrollLockZone>(zone).unwrap().is_sealed());

    let barriers = world.get::<ScrollLockZone>(zone).unwrap().barriers.clone();
    kill(&mut world, &own[6..]);

    let z = world.get::<ScrollLockZone>(zone).unwrap();
    assert_eq!(z.state(), ZoneState::Cleared);
    assert!(z.barriers.is_empty());
    for b in barriers {
        assert!(world.get_entity(b).is_err(), "barrier removed");
    }

    let cleared: Vec<_> = queued_events(&world)
        .into_iter()
        .filter(|e| matches!(e, CombatEvent::ZoneCleared { .. }))
        .collect();
    assert_eq!(cleared, vec![CombatEvent::ZoneCleared { zone }]);

    kill(&mut world, &own);
    assert_eq!(queued_events(&world).len(), 2, "entered + cleared, nothing more");
}
