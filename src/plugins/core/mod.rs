//! Core plugin: configuration, shared services and the outbound event queue.

pub mod difficulty;
pub mod level;

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::common::events::{CombatEvent, CombatEvents, publish_combat_events};
use crate::common::schedule::{self, CombatSet};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;

pub use difficulty::{Difficulty, DifficultyMode};
pub use level::{CurrentLevel, LevelLoad};

/// The one random stream every combat roll draws from.
#[derive(Resource, Debug)]
pub struct CombatRng(pub StdRng);

impl CombatRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for CombatRng {
    fn default() -> Self {
        Self(StdRng::from_os_rng())
    }
}

pub fn plugin(app: &mut App) {
    if !app.world().contains_resource::<Tunables>() {
        app.insert_resource(Tunables::load_or_default());
    }
    app.insert_resource(ClearColor(Color::srgb(0.08, 0.03, 0.10)))
        .init_resource::<Difficulty>()
        .init_resource::<LevelLoad>()
        .init_resource::<CurrentLevel>()
        .init_resource::<CombatRng>()
        .init_resource::<CombatEvents>()
        .add_message::<CombatEvent>();

    schedule::plugin(app);

    app.add_systems(OnEnter(GameState::InGame), level::apply_level_load)
        .add_systems(
            FixedPostUpdate,
            publish_combat_events.in_set(CombatSet::Commit),
        );
}

#[cfg(test)]
mod tests;
