//! Target selection against the previous step's settled player positions.
//!
//! `Sense` rebuilds [`TargetSnapshot`] once, before any brain thinks, so no enemy
//! sees another actor's mid-tick update. Each enemy re-runs its nearest-player
//! search only every `retarget_interval_ticks` steps and otherwise tracks the
//! player it already chose.
//!
//! ---------------------------
//! WHY A SNAPSHOT
//! ---------------------------
//! Brains run in an unspecified order inside `Think`, and player movement writes
//! velocities in the same set. Reading live transforms would let the answer depend
//! on which system ran first. The snapshot is written once in `Sense` and only
//! read afterwards, so every brain in a step agrees on where the party is. Downed
//! players are left out, which is all it takes to stop them being targeted.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::player::{Downed, Player};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedPlayer {
    pub entity: Entity,
    pub position: Vec2,
}

/// Positions of every player still in the fight.
#[derive(Resource, Debug, Default)]
pub struct TargetSnapshot {
    pub players: Vec<TrackedPlayer>,
}

impl TargetSnapshot {
    pub fn nearest(&self, at: Vec2) -> Option<&TrackedPlayer> {
        self.players
            .iter()
            .min_by(|a, b| a.position.distance_squared(at).total_cmp(&b.position.distance_squared(at)))
    }

    pub fn get(&self, entity: Entity) -> Option<&TrackedPlayer> {
        self.players.iter().find(|p| p.entity == entity)
    }

    /// The party's average position.
    pub fn centroid(&self) -> Option<Vec2> {
        if self.players.is_empty() {
            return None;
        }
        let sum: Vec2 = self.players.iter().map(|p| p.position).sum();
        Some(sum / self.players.len() as f32)
    }
}

/// Throttled target choice of one enemy or boss.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Targeting {
    pub target: Option<Entity>,
    /// Steps left before the next nearest-player search.
    pub countdown: u32,
}

pub(crate) fn snapshot_players(
    mut snapshot: ResMut<TargetSnapshot>,
    q: Query<(Entity, &Transform), (With<Player>, Without<Downed>)>,
) {
    snapshot.players.clear();
    snapshot.players.extend(q.iter().map(|(entity, tf)| TrackedPlayer {
        entity,
        position: tf.translation.truncate(),
    }));
}

pub(crate) fn acquire_targets(
    tunables: Res<Tunables>,
    snapshot: Res<TargetSnapshot>,
    mut q: Query<(&Transform, &mut Targeting)>,
) {
    for (tf, mut targeting) in &mut q {
        let lost = targeting.target.is_some_and(|e| snapshot.get(e).is_none());
        if targeting.countdown > 0 && !lost {
            targeting.countdown -= 1;
            continue;
        }
        targeting.target = snapshot.nearest(tf.translation.truncate()).map(|p| p.entity);
        targeting.countdown = tunables.retarget_interval_ticks.saturating_sub(1);
    }
}
