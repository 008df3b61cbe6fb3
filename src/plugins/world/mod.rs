//! World plugin: static level geometry.
//!
//! Layout is owned elsewhere; it registers bodies through [`spawn_platform`] and
//! [`spawn_barrier`]. The default stage is a long floor with a few ledges and a
//! wall at each end.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::{barrier_layers, world_layers};
use crate::common::state::GameState;

/// Length of the default stage, starting at x = 0.
pub const STAGE_LENGTH: f32 = 3600.0;
/// Top surface of the default floor.
pub const FLOOR_Y: f32 = 0.0;
const FLOOR_THICKNESS: f32 = 40.0;
const WALL_HEIGHT: f32 = 1200.0;

/// Invisible wall that blocks combatants and that skaters bounce off.
#[derive(Component, Debug, Clone, Copy)]
pub struct Barrier;

#[derive(Component, Debug, Clone, Copy)]
pub struct Platform;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_stage);
}

/// Solid level geometry (`Layer::World`).
pub fn spawn_platform(commands: &mut Commands, center: Vec2, size: Vec2) -> Entity {
    commands
        .spawn((
            Name::new("Platform"),
            Platform,
            Sprite::from_color(Color::srgb(0.32, 0.16, 0.40), size),
            Transform::from_translation(center.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            world_layers(),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

/// Barrier-tagged geometry (`Layer::Barrier`). Only combatants collide with it.
pub fn spawn_barrier(commands: &mut Commands, center: Vec2, size: Vec2) -> Entity {
    commands
        .spawn((
            Name::new("Barrier"),
            Barrier,
            Transform::from_translation(center.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            barrier_layers(),
            CollisionEventsEnabled,
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

fn spawn_stage(mut commands: Commands) {
    spawn_platform(
        &mut commands,
        Vec2::new(STAGE_LENGTH * 0.5, FLOOR_Y - FLOOR_THICKNESS * 0.5),
        Vec2::new(STAGE_LENGTH, FLOOR_THICKNESS),
    );

    for (x, y, w) in [(700.0, 140.0, 220.0), (1500.0, 180.0, 260.0), (2300.0, 140.0, 220.0)] {
        spawn_platform(&mut commands, Vec2::new(x, FLOOR_Y + y), Vec2::new(w, 20.0));
    }

    for x in [-20.0, STAGE_LENGTH + 20.0] {
        spawn_platform(
            &mut commands,
            Vec2::new(x, FLOOR_Y + WALL_HEIGHT * 0.5),
            Vec2::new(40.0, WALL_HEIGHT),
        );
    }
}

#[cfg(test)]
mod tests;
