//! Feature plugins.

use bevy::prelude::*;

pub mod bosses;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod loot;
pub mod physics;
pub mod player;
pub mod projectiles;
pub mod weapons;
pub mod world;
pub mod zones;

// Render-only
pub mod camera;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    world::plugin(app);
    player::plugin(app);
    combat::plugin(app);
    projectiles::plugin(app);
    weapons::plugin(app);
    enemies::plugin(app);
    bosses::plugin(app);
    loot::plugin(app);
    zones::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
}
