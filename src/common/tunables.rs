//! Tunable gameplay constants.
//!
//! Defaults are compiled in. A RON override at [`TUNABLES_PATH`] replaces them at
//! startup; a missing or malformed file falls back to the defaults with a log line.

use std::fs;

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

pub const TUNABLES_PATH: &str = "assets/tunables.ron";

#[derive(Debug, Error)]
pub enum TunablesError {
    #[error("could not read tunables: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse tunables: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid tunable `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

#[derive(Resource, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub gravity: f32,
    pub player_speed: f32,
    pub player_jump_speed: f32,
    /// Physics ticks between two nearest-player searches of one enemy.
    pub retarget_interval_ticks: u32,
    /// Chase gives up once the target is this many detection ranges away.
    pub leash_factor: f32,
    pub player_projectile_preload: usize,
    pub enemy_projectile_preload: usize,
    pub projectile_lifetime: f32,
    pub corpse_fade_secs: f32,
    pub pickup_radius: f32,
    /// Fraction of its base speed a boss walks at between patterns.
    pub boss_walk_factor: f32,
    pub splash_radius: f32,
    /// Chance a regular enemy drops anything at all.
    pub loot_drop_chance: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            gravity: 980.0,
            player_speed: 260.0,
            player_jump_speed: 520.0,
            retarget_interval_ticks: 10,
            leash_factor: 1.5,
            player_projectile_preload: 128,
            enemy_projectile_preload: 256,
            projectile_lifetime: 3.0,
            corpse_fade_secs: 0.35,
            pickup_radius: 28.0,
            boss_walk_factor: 0.5,
            splash_radius: 64.0,
            loot_drop_chance: 0.3,
        }
    }
}

impl Tunables {
    pub fn from_ron(text: &str) -> Result<Self, TunablesError> {
        let tunables: Self = ron::from_str(text)?;
        tunables.validate()?;
        Ok(tunables)
    }

    pub fn read(path: &str) -> Result<Self, TunablesError> {
        let text = fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    pub fn validate(&self) -> Result<(), TunablesError> {
        let positive = [
            ("pixels_per_meter", self.pixels_per_meter),
            ("player_speed", self.player_speed),
            ("leash_factor", self.leash_factor),
            ("projectile_lifetime", self.projectile_lifetime),
            ("corpse_fade_secs", self.corpse_fade_secs),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TunablesError::Invalid { field, reason: "must be positive" });
            }
        }
        if self.leash_factor < 1.0 {
            return Err(TunablesError::Invalid {
                field: "leash_factor",
                reason: "must be at least 1.0",
            });
        }
        if !(0.0..=1.0).contains(&self.loot_drop_chance) {
            return Err(TunablesError::Invalid {
                field: "loot_drop_chance",
                reason: "must be within 0..=1",
            });
        }
        if self.retarget_interval_ticks == 0 {
            return Err(TunablesError::Invalid {
                field: "retarget_interval_ticks",
                reason: "must be at least one tick",
            });
        }
        Ok(())
    }

    /// Load the override file, or fall back to defaults.
    pub fn load_or_default() -> Self {
        match Self::read(TUNABLES_PATH) {
            Ok(t) => {
                info!("loaded tunables from '{TUNABLES_PATH}'");
                t
            }
            Err(e) => {
                info!("using default tunables ({e})");
                Self::default()
            }
        }
    }
}
