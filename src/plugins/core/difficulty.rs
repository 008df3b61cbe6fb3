use bevy::prelude::*;

/// Play mode picked outside the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DifficultyMode {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Scaling applied to hostiles when they spawn. Never read afterwards.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct Difficulty {
    pub mode: DifficultyMode,
}

impl Difficulty {
    pub fn new(mode: DifficultyMode) -> Self {
        Self { mode }
    }

    pub fn hp_multiplier(&self) -> f32 {
        match self.mode {
            DifficultyMode::Easy => 0.75,
            DifficultyMode::Normal => 1.0,
            DifficultyMode::Hard => 1.5,
        }
    }

    pub fn damage_multiplier(&self) -> f32 {
        match self.mode {
            DifficultyMode::Easy => 0.6,
            DifficultyMode::Normal => 1.0,
            DifficultyMode::Hard => 1.4,
        }
    }
}
