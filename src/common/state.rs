//! Top-level game flow.
//!
//! `InGame` runs the combat simulation; `GameOver` is entered once every player in
//! the party is downed and freezes all combat sets.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
    GameOver,
}
