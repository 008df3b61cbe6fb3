use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::*;
use crate::common::events::CombatEvent;
use crate::common::test_utils::run_system_once;

#[test]
fn inserts_resources() {
    let mut app = App::new();
    app.insert_resource(Tunables::default());
    plugin(&mut app);
    let world = app.world();
    assert!(world.get_resource::<Tunables>().is_some());
    assert!(world.get_resource::<ClearColor>().is_some());
    assert!(world.get_resource::<CombatRng>().is_some());
    assert!(world.get_resource::<CombatEvents>().is_some());
    assert!(world.get_resource::<Messages<CombatEvent>>().is_some());
}

#[test]
fn level_load_sets_difficulty_and_level() {
    let mut world = World::new();
    world.insert_resource(LevelLoad {
        difficulty: DifficultyMode::Hard,
        level: 7,
        loadouts: Vec::new(),
    });
    run_system_once(&mut world, level::apply_level_load);

    assert_eq!(world.resource::<Difficulty>().mode, DifficultyMode::Hard);
    assert_eq!(world.resource::<CurrentLevel>().0, 7);
    assert_eq!(world.resource::<LevelLoad>().party_size(), 1);
}

#[test]
fn difficulty_scales_up_with_mode() {
    let easy = Difficulty::new(DifficultyMode::Easy);
    let hard = Difficulty::new(DifficultyMode::Hard);
    assert!(easy.hp_multiplier() < Difficulty::default().hp_multiplier());
    assert!(hard.damage_multiplier() > Difficulty::default().damage_multiplier());
}

#[test]
fn events_publish_in_push_order() {
    let mut world = World::new();
    world.init_resource::<CombatEvents>();
    world.init_resource::<Messages<CombatEvent>>();
    let a = world.spawn_empty().id();
    let b = world.spawn_empty().id();
    {
        let mut q = world.resource_mut::<CombatEvents>();
        q.push(CombatEvent::ZoneEntered { zone: a });
        q.push(CombatEvent::ZoneCleared { zone: b });
    }

    run_system_once(&mut world, publish_combat_events);

    assert!(world.resource::<CombatEvents>().is_empty());
    let msgs = world.resource::<Messages<CombatEvent>>();
    let got: Vec<_> = msgs.get_cursor().read(msgs).cloned().collect();
    assert_eq!(
        got,
        vec![
            CombatEvent::ZoneEntered { zone: a },
            CombatEvent::ZoneCleared { zone: b }
        ]
    );
}

#[test]
fn tunables_parse_overrides_and_reject_bad_values() {
    let t = Tunables::from_ron("(player_speed: 300.0, leash_factor: 2.0)").unwrap();
    assert_eq!(t.player_speed, 300.0);
    assert_eq!(t.leash_factor, 2.0);
    assert_eq!(t.gravity, Tunables::default().gravity);

    assert!(matches!(
        Tunables::from_ron("(leash_factor: 0.5)"),
        Err(crate::common::tunables::TunablesError::Invalid { field: "leash_factor", .. })
    ));
    assert!(matches!(
        Tunables::from_ron("(player_speed: \"fast\")"),
        Err(crate::common::tunables::TunablesError::Parse(_))
    ));
}
