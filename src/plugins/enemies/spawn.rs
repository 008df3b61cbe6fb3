//! Enemy spawning. Requests come from zone spawners (or tests); bosses are picked up
//! by the bosses plugin from the same message.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::events::{CombatEvent, CombatEvents};
use crate::common::layers::enemy_layers;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::bosses::BossKind;
use crate::plugins::combat::{Combatant, Faction, Health, StatusEffects};
use crate::plugins::core::Difficulty;
use crate::plugins::loot::LootTable;
use crate::plugins::zones::ZoneMember;

use super::archetypes::EnemyKind;
use super::lifecycle::EnemyLifeState;
use super::machine::{EnemyMachine, EnemyStats};
use super::targeting::Targeting;
use super::{Brain, Enemy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spawnable {
    Enemy(EnemyKind),
    Boss(BossKind),
}

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct SpawnEnemyRequest {
    pub what: Spawnable,
    pub position: Vec2,
    /// Zone whose clear condition counts this spawn.
    pub zone: Option<Entity>,
}

/// `stats` with difficulty applied.
pub fn scaled_stats(kind: EnemyKind, difficulty: &Difficulty) -> EnemyStats {
    let mut stats = kind.stats();
    stats.max_health *= difficulty.hp_multiplier();
    stats.damage *= difficulty.damage_multiplier();
    stats
}

pub fn spawn_enemy(
    commands: &mut Commands,
    kind: EnemyKind,
    position: Vec2,
    difficulty: &Difficulty,
    leash_factor: f32,
) -> Entity {
    let stats = scaled_stats(kind, difficulty);
    let behavior = kind.behavior();
    let flies = behavior.flies();

    let mut e = commands.spawn((
        Name::new(kind.name()),
        Enemy { kind },
        Combatant::new(Faction::Hostile),
        Health::new(stats.max_health),
        StatusEffects::default(),
        Brain {
            machine: EnemyMachine::new(leash_factor),
            behavior,
            facing: -1.0,
        },
        Targeting::default(),
        EnemyLifeState::Alive,
        LootTable::Regular,
        stats,
        Sprite::from_color(kind.color(), stats.size),
        Transform::from_translation(position.extend(1.0)),
        (
            RigidBody::Dynamic,
            Collider::rectangle(stats.size.x, stats.size.y),
            LockedAxes::ROTATION_LOCKED,
            enemy_layers(),
            LinearVelocity::ZERO,
            CollisionEventsEnabled,
        ),
        DespawnOnExit(GameState::InGame),
    ));
    if flies {
        e.insert(GravityScale(0.0));
    }
    e.id()
}

pub(crate) fn spawn_enemies(
    mut commands: Commands,
    mut requests: MessageReader<SpawnEnemyRequest>,
    difficulty: Res<Difficulty>,
    tunables: Res<Tunables>,
    mut events: ResMut<CombatEvents>,
) {
    for req in requests.read() {
        let Spawnable::Enemy(kind) = req.what else {
            continue;
        };
        let e = spawn_enemy(&mut commands, kind, req.position, &difficulty, tunables.leash_factor);
        if let Some(zone) = req.zone {
            commands.entity(e).insert(ZoneMember(zone));
        }
        debug!("spawned {} at {}", kind.name(), req.position);
        events.push(CombatEvent::EntitySpawned {
            entity: e,
            position: req.position,
        });
    }
}
