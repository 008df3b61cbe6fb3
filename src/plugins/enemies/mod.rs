//! Enemies plugin: archetype brains on a shared state machine.
//!
//! ```text
//! FixedUpdate
//!   Sense      snapshot_players, acquire_targets (throttled)
//!   Think      think_enemies: hurt on hit, machine tick, attacks -> messages
//!   Spawn      spawn_enemies
//! FixedPostUpdate
//!   Resolve    bounce_off_barriers
//!   Aftermath  enemy_death_trigger -> enemy_death_progress
//! PostUpdate
//!   despawn_marked
//! ```
//!
//! A brain never reads another actor's live transform: targets come from the
//! snapshot built in `Sense`, and everything an attack produces leaves as a
//! `SpawnProjectileRequest` or `MeleeStrike` message.

pub mod archetypes;
pub mod lifecycle;
pub mod machine;
pub mod spawn;
pub mod targeting;

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::common::schedule::CombatSet;
use crate::common::state::GameState;
use crate::plugins::combat::{Combatant, Faction, MeleeStrike, StatusEffects};
use crate::plugins::projectiles::SpawnProjectileRequest;
use crate::plugins::world::Barrier;

pub use archetypes::EnemyKind;
pub use lifecycle::{EnemyLifeState, PendingDespawn};
pub use machine::{ActionSink, Body, EnemyBehavior, EnemyMachine, EnemyState, EnemyStats, Sight, Strike, Tick};
pub use spawn::{SpawnEnemyRequest, Spawnable, spawn_enemy};
pub use targeting::{TargetSnapshot, Targeting, TrackedPlayer};

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enemy {
    pub kind: EnemyKind,
}

/// Machine plus the archetype strategy driving it.
#[derive(Component)]
pub struct Brain {
    pub machine: EnemyMachine,
    pub behavior: Box<dyn EnemyBehavior>,
    /// -1 or 1.
    pub facing: f32,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<TargetSnapshot>()
        .add_message::<SpawnEnemyRequest>();

    app.add_systems(
        FixedUpdate,
        (
            (targeting::snapshot_players, targeting::acquire_targets)
                .chain()
                .in_set(CombatSet::Sense),
            think_enemies.in_set(CombatSet::Think),
            spawn::spawn_enemies.in_set(CombatSet::Spawn),
        ),
    );

    app.add_systems(
        FixedPostUpdate,
        (
            bounce_off_barriers.in_set(CombatSet::Resolve),
            (lifecycle::enemy_death_trigger, lifecycle::enemy_death_progress)
                .chain()
                .in_set(CombatSet::Aftermath),
        ),
    );

    app.add_systems(
        PostUpdate,
        lifecycle::despawn_marked.run_if(in_state(GameState::InGame)),
    );
}

pub(crate) fn think_enemies(
    time: Res<Time<Fixed>>,
    snapshot: Res<TargetSnapshot>,
    mut shots: MessageWriter<SpawnProjectileRequest>,
    mut strikes: MessageWriter<MeleeStrike>,
    mut q: Query<(
        Entity,
        &mut Brain,
        &EnemyStats,
        &Targeting,
        &Transform,
        &mut LinearVelocity,
        &mut Combatant,
        Option<&StatusEffects>,
    )>,
) {
    let dt = time.delta_secs();
    let mut sink = ActionSink::default();

    for (e, brain, stats, targeting, tf, mut vel, mut combatant, status) in &mut q {
        let brain = brain.into_inner();
        let mut body = Body {
            position: tf.translation.truncate(),
            velocity: vel.0,
            facing: brain.facing,
        };

        if combatant.take_hit() {
            brain
                .machine
                .hurt(brain.behavior.as_mut(), &mut body, stats.hurt_duration);
        }

        let sight = Sight {
            target: targeting
                .target
                .and_then(|t| snapshot.get(t))
                .map(|p| p.position),
        };
        let mut tick = Tick {
            dt,
            sight,
            stats,
            speed_scale: status.map_or(1.0, StatusEffects::speed_scale),
            patrol_dir: 0.0,
            actions: &mut sink,
        };
        brain.machine.tick(brain.behavior.as_mut(), &mut body, &mut tick);

        vel.0 = body.velocity;
        brain.facing = body.facing;

        shots.write_batch(sink.shots.drain(..));
        strikes.write_batch(sink.strikes.drain(..).map(|s| MeleeStrike {
            attacker: e,
            faction: Faction::Hostile,
            center: s.center,
            radius: s.radius,
            hit: s.hit,
        }));
    }
}

fn bounce_off_barriers(
    mut started: MessageReader<CollisionStart>,
    q_barriers: Query<(), With<Barrier>>,
    mut q: Query<(&mut Brain, &Transform, &mut LinearVelocity)>,
) {
    for ev in started.read() {
        let a = ev.body1.unwrap_or(ev.collider1);
        let b = ev.body2.unwrap_or(ev.collider2);
        let other = if q_barriers.contains(b) {
            a
        } else if q_barriers.contains(a) {
            b
        } else {
            continue;
        };

        let Ok((brain, tf, mut vel)) = q.get_mut(other) else {
            continue;
        };
        let brain = brain.into_inner();
        if brain.machine.is_dead() {
            continue;
        }
        let mut body = Body {
            position: tf.translation.truncate(),
            velocity: vel.0,
            facing: brain.facing,
        };
        brain.behavior.on_barrier_contact(&mut body);
        vel.0 = body.velocity;
        brain.facing = body.facing;
    }
}
