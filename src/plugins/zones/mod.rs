//! Zones plugin: scroll-lock arenas and their wave spawners.
//!
//! ```text
//! OnEnter(InGame)  spawn_stage_zones
//! FixedUpdate
//!   Think          seal_entered_zones -> run_spawners
//! FixedPostUpdate
//!   Aftermath      count_zone_deaths -> clear_zones
//! ```
//!
//! Spawns leave as `SpawnEnemyRequest`s tagged with the zone; the spawned entity
//! carries [`ZoneMember`] so only its own zone hears about its death.

pub mod zone;

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::events::{CombatEvent, CombatEvents};
use crate::common::schedule::CombatSet;
use crate::common::state::GameState;
use crate::plugins::bosses::BossKind;
use crate::plugins::combat::Killed;
use crate::plugins::core::LevelLoad;
use crate::plugins::enemies::{EnemyKind, SpawnEnemyRequest, Spawnable};
use crate::plugins::player::{Downed, Player};
use crate::plugins::world::{FLOOR_Y, spawn_barrier};

pub use zone::{ScrollLockZone, WaveSpawner, ZoneState};

const BARRIER_SIZE: Vec2 = Vec2::new(16.0, 800.0);

/// The zone whose clear condition counts this entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneMember(pub Entity);

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_stage_zones);
    app.add_systems(
        FixedUpdate,
        (seal_entered_zones, run_spawners)
            .chain()
            .in_set(CombatSet::Think),
    );
    app.add_systems(
        FixedPostUpdate,
        (count_zone_deaths, clear_zones)
            .chain()
            .in_set(CombatSet::Aftermath),
    );
}

pub fn spawn_zone(commands: &mut Commands, zone: ScrollLockZone) -> Entity {
    commands
        .spawn((
            Name::new(format!("Zone[{}..{}]", zone.left, zone.right)),
            zone,
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

/// The default stage: two enemy arenas and the level's headliners.
pub fn stage_zones(level: u32) -> Vec<ScrollLockZone> {
    let ground = |x: f32| Vec2::new(x, FLOOR_Y + 40.0);
    let enemy = |kind| Spawnable::Enemy(kind);
    vec![
        ScrollLockZone::new(
            400.0,
            1200.0,
            vec![
                WaveSpawner::new(enemy(EnemyKind::Grunt), 3, 1.5, ground(1100.0)),
                WaveSpawner::new(enemy(EnemyKind::Shooter), 2, 2.5, ground(1150.0)),
            ],
        ),
        ScrollLockZone::new(
            1500.0,
            2300.0,
            vec![
                WaveSpawner::new(enemy(EnemyKind::RollerSkater), 2, 2.0, ground(2200.0)),
                WaveSpawner::new(enemy(EnemyKind::Flyer), 2, 3.0, Vec2::new(2000.0, FLOOR_Y + 220.0)),
                WaveSpawner::new(enemy(EnemyKind::Bouncer), 1, 0.0, ground(2250.0)),
            ],
        ),
        ScrollLockZone::new(
            2700.0,
            3500.0,
            BossKind::lineup(level)
                .iter()
                .enumerate()
                .map(|(i, &kind)| {
                    WaveSpawner::new(Spawnable::Boss(kind), 1, 0.0, ground(3300.0 - 160.0 * i as f32))
                })
                .collect(),
        ),
    ]
}

fn spawn_stage_zones(mut commands: Commands, load: Res<LevelLoad>) {
    for zone in stage_zones(load.level) {
        spawn_zone(&mut commands, zone);
    }
}

pub(crate) fn seal_entered_zones(
    mut commands: Commands,
    mut events: ResMut<CombatEvents>,
    q_players: Query<&Transform, (With<Player>, Without<Downed>)>,
    mut q_zones: Query<(Entity, &mut ScrollLockZone)>,
) {
    for (e, mut zone) in &mut q_zones {
        if zone.state() != ZoneState::Dormant {
            continue;
        }
        if !q_players.iter().any(|tf| zone.contains(tf.translation.x)) {
            continue;
        }
        if !zone.enter() {
            continue;
        }
        let y = FLOOR_Y + BARRIER_SIZE.y * 0.5;
        let (left, right) = (zone.left, zone.right);
        zone.barriers = vec![
            spawn_barrier(&mut commands, Vec2::new(left - BARRIER_SIZE.x * 0.5, y), BARRIER_SIZE),
            spawn_barrier(&mut commands, Vec2::new(right + BARRIER_SIZE.x * 0.5, y), BARRIER_SIZE),
        ];
        info!("zone {e} sealed [{left}, {right}]");
        events.push(CombatEvent::ZoneEntered { zone: e });
    }
}

pub(crate) fn run_spawners(
    time: Res<Time<Fixed>>,
    mut requests: MessageWriter<SpawnEnemyRequest>,
    mut q_zones: Query<(Entity, &mut ScrollLockZone)>,
) {
    let dt = time.delta_secs();
    for (e, mut zone) in &mut q_zones {
        if !zone.is_sealed() {
            continue;
        }
        requests.write_batch(zone.tick_spawners(dt).into_iter().map(|(what, position)| {
            SpawnEnemyRequest {
                what,
                position,
                zone: Some(e),
            }
        }));
    }
}

pub(crate) fn count_zone_deaths(
    mut killed: MessageReader<Killed>,
    q_members: Query<&ZoneMember>,
    mut q_zones: Query<&mut ScrollLockZone>,
) {
    for k in killed.read() {
        let Ok(member) = q_members.get(k.entity) else {
            continue;
        };
        if let Ok(mut zone) = q_zones.get_mut(member.0) {
            zone.record_death();
        }
    }
}

pub(crate) fn clear_zones(
    mut commands: Commands,
    mut events: ResMut<CombatEvents>,
    mut q_zones: Query<(Entity, &mut ScrollLockZone)>,
) {
    for (e, mut zone) in &mut q_zones {
        if !zone.try_clear() {
            continue;
        }
        for barrier in zone.barriers.drain(..) {
            commands.entity(barrier).try_despawn();
        }
        info!("zone {e} cleared");
        events.push(CombatEvent::ZoneCleared { zone: e });
    }
}

#[cfg(test)]
mod tests;
