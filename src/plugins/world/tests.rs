use avian2d::prelude::*;
use bevy::prelude::*;

use super::*;
use crate::common::layers::{Layer, is_in_layer};
use crate::common::test_utils::run_system_once;

#[test]
fn stage_has_floor_ledges_and_end_walls() {
    let mut world = World::new();
    run_system_once(&mut world, spawn_stage);

    let platforms = world
        .query_filtered::<&RigidBody, With<Platform>>()
        .iter(&world)
        .filter(|rb| matches!(**rb, RigidBody::Static))
        .count();
    assert_eq!(platforms, 6);
}

#[test]
fn barriers_are_tagged_and_only_block_combatants() {
    let mut world = World::new();
    let e = run_system_once(&mut world, |mut commands: Commands| {
        spawn_barrier(&mut commands, Vec2::new(100.0, 50.0), Vec2::new(20.0, 400.0))
    });

    assert!(world.get::<Barrier>(e).is_some());
    let layers = world.get::<CollisionLayers>(e).unwrap();
    assert!(is_in_layer(layers, Layer::Barrier));
    assert!(layers.filters.has_all(Layer::Player));
    assert!(layers.filters.has_all(Layer::Enemy));
    assert!(!layers.filters.has_all(Layer::PlayerProjectile));
}
