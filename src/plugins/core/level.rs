use bevy::prelude::*;

use crate::plugins::weapons::SavedLoadout;

use super::difficulty::{Difficulty, DifficultyMode};

/// Values handed over by the save subsystem before a level starts.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LevelLoad {
    pub difficulty: DifficultyMode,
    pub level: u32,
    /// One entry per joined player, in slot order.
    pub loadouts: Vec<SavedLoadout>,
}

impl Default for LevelLoad {
    fn default() -> Self {
        Self {
            difficulty: DifficultyMode::Normal,
            level: 1,
            loadouts: vec![SavedLoadout::default()],
        }
    }
}

impl LevelLoad {
    /// Number of players to spawn, at least one.
    pub fn party_size(&self) -> usize {
        self.loadouts.len().clamp(1, crate::plugins::player::MAX_PLAYERS)
    }
}

/// Level number used for loot scaling.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentLevel(pub u32);

impl Default for CurrentLevel {
    fn default() -> Self {
        Self(1)
    }
}

pub(super) fn apply_level_load(load: Res<LevelLoad>, mut commands: Commands) {
    info!(
        "level {} on {:?} with {} player(s)",
        load.level,
        load.difficulty,
        load.party_size()
    );
    commands.insert_resource(Difficulty::new(load.difficulty));
    commands.insert_resource(CurrentLevel(load.level.max(1)));
}
