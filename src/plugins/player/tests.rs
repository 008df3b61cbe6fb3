use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::*;
use crate::common::events::CombatEvents;
use crate::common::test_utils::{run_system_once, step_fixed};
use crate::plugins::combat::{DamageWriter, Hit, Killed, NovaQueue};
use crate::plugins::loot::{Rarity, ShieldInstance};
use crate::plugins::weapons::SavedLoadout;

#[test]
fn party_spawns_one_player_per_saved_loadout() {
    let mut world = World::new();
    let mut shield = ShieldInstance::starter();
    shield.rarity = Rarity::Rare;
    world.insert_resource(LevelLoad {
        loadouts: vec![
            SavedLoadout::default(),
            SavedLoadout {
                weapons: Vec::new(),
                shield: Some(shield.clone()),
            },
        ],
        ..default()
    });

    run_system_once(&mut world, spawn_party);

    let mut slots: Vec<_> = world
        .query::<(&Player, &Loadout, &Shield)>()
        .iter(&world)
        .map(|(p, l, _)| {
            assert!(l.active().is_some());
            p.slot
        })
        .collect();
    slots.sort();
    assert_eq!(slots, vec![PlayerSlot(0), PlayerSlot(1)]);

    let second = world
        .query::<(&Player, &Loadout)>()
        .iter(&world)
        .find(|(p, _)| p.slot == PlayerSlot(1))
        .map(|(_, l)| l.shield().cloned())
        .unwrap();
    assert_eq!(second, Some(shield));
}

#[test]
fn movement_follows_intent_and_chill() {
    let mut world = World::new();
    step_fixed(&mut world, 1.0 / 64.0);
    world.insert_resource(Tunables {
        player_speed: 100.0,
        ..default()
    });
    let mut intents = PlayerIntents::default();
    intents.set(
        PlayerSlot(0),
        PlayerIntent {
            move_axis: Vec2::new(-1.0, 0.0),
            ..default()
        },
    );
    world.insert_resource(intents);
    let mut chilled = StatusEffects::default();
    chilled.chill = 1.0;
    let e = world
        .spawn((Player { slot: PlayerSlot(0), facing: 1.0 }, LinearVelocity::ZERO, chilled))
        .id();

    run_system_once(&mut world, apply_movement);

    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, Vec2::new(-50.0, 0.0));
    assert_eq!(world.get::<Player>(e).unwrap().facing, -1.0);
}

#[test]
fn jump_only_from_rest() {
    let mut world = World::new();
    step_fixed(&mut world, 1.0 / 64.0);
    world.insert_resource(Tunables::default());
    let mut intents = PlayerIntents::default();
    intents.set(PlayerSlot(0), PlayerIntent { move_axis: Vec2::Y, ..default() });
    world.insert_resource(intents);
    let grounded = world
        .spawn((Player { slot: PlayerSlot(0), facing: 1.0 }, LinearVelocity::ZERO))
        .id();
    let falling = world
        .spawn((Player { slot: PlayerSlot(0), facing: 1.0 }, LinearVelocity(Vec2::new(0.0, -200.0))))
        .id();

    run_system_once(&mut world, apply_movement);

    let jump = Tunables::default().player_jump_speed;
    assert_eq!(world.get::<LinearVelocity>(grounded).unwrap().y, jump);
    assert_eq!(world.get::<LinearVelocity>(falling).unwrap().y, -200.0);
}

#[test]
fn knockback_outlives_the_next_movement_tick() {
    let mut world = World::new();
    step_fixed(&mut world, 1.0 / 64.0);
    world.insert_resource(Tunables::default());
    world.init_resource::<PlayerIntents>();
    world.init_resource::<CombatEvents>();
    world.init_resource::<NovaQueue>();
    world.init_resource::<Messages<Killed>>();
    let player = world
        .spawn((
            Player { slot: PlayerSlot(0), facing: 1.0 },
            Combatant::new(Faction::Party),
            Health::new(100.0),
            Transform::default(),
            LinearVelocity::ZERO,
        ))
        .id();

    // Struck from the right: pushed left.
    run_system_once(&mut world, move |mut damage: DamageWriter| {
        let hit = Hit::plain(10.0, Vec2::new(30.0, 0.0)).with_knockback(Vec2::new(140.0, 70.0));
        damage.apply(player, &hit, None);
    });
    assert_eq!(world.get::<LinearVelocity>(player).unwrap().0, Vec2::new(-140.0, 70.0));

    // No intent: movement must not zero the push before physics integrates it.
    run_system_once(&mut world, apply_movement);
    let vx = world.get::<LinearVelocity>(player).unwrap().x;
    assert!((vx - -140.0 * STAGGER_DAMPING).abs() < 1e-3, "vx = {vx}");

    // Once the window closes, intent owns `vel.x` again.
    for _ in 0..20 {
        run_system_once(&mut world, apply_movement);
    }
    assert_eq!(world.get::<LinearVelocity>(player).unwrap().x, 0.0);
    assert_eq!(world.get::<Combatant>(player).unwrap().recovering, 0.0);
}

#[test]
fn killed_players_go_down_and_a_wipe_ends_the_run() {
    let mut world = World::new();
    world.init_resource::<Messages<Killed>>();
    world.init_resource::<NextState<GameState>>();
    let a = world
        .spawn((Player { slot: PlayerSlot(0), facing: 1.0 }, LinearVelocity(Vec2::X), player_layers()))
        .id();
    let b = world
        .spawn((Player { slot: PlayerSlot(1), facing: 1.0 }, LinearVelocity::ZERO, player_layers()))
        .id();

    world.write_message(Killed { entity: a, position: Vec2::ZERO, source: None });
    run_system_once(&mut world, down_players);
    run_system_once(&mut world, check_party_wipe);

    assert!(world.get::<Downed>(a).is_some());
    assert_eq!(world.get::<LinearVelocity>(a).unwrap().0, Vec2::ZERO);
    assert!(matches!(*world.resource::<NextState<GameState>>(), NextState::Unchanged));

    world.write_message(Killed { entity: b, position: Vec2::ZERO, source: None });
    run_system_once(&mut world, down_players);
    run_system_once(&mut world, check_party_wipe);
    assert!(!matches!(*world.resource::<NextState<GameState>>(), NextState::Unchanged));
}
