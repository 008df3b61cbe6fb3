//! Fixed-step ordering for the combat simulation.
//!
//! ```text
//! FixedUpdate:      Sense -> Think -> Spawn -> Advance
//! FixedPostUpdate:  (physics, collision events) -> Resolve -> Aftermath -> Commit
//! ```
//!
//! Reads of "nearest player" happen in `Sense` against positions the previous
//! physics step settled. Pool releases queued anywhere in the tick are only
//! committed in `Commit`.

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::GameState;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Sense,
    Think,
    Spawn,
    Advance,
    Resolve,
    Aftermath,
    Commit,
}

pub fn plugin(app: &mut App) {
    app.configure_sets(
        FixedUpdate,
        (
            CombatSet::Sense,
            CombatSet::Think,
            CombatSet::Spawn,
            CombatSet::Advance,
        )
            .chain()
            .run_if(in_state(GameState::InGame)),
    );

    app.configure_sets(
        FixedPostUpdate,
        (CombatSet::Resolve, CombatSet::Aftermath, CombatSet::Commit)
            .chain()
            .after(CollisionEventSystems)
            .run_if(in_state(GameState::InGame)),
    );
}
