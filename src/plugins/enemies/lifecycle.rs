//! Corpse lifecycle shared by enemies and bosses.
//!
//! `Alive -> Dying -> Dead`. The trigger runs once per `Killed`, stops all
//! interaction immediately and starts a fade. Despawning is only marked during the
//! fixed step and carried out in `PostUpdate`.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::common::layers::{Layer, non_interacting};
use crate::common::tunables::Tunables;
use crate::plugins::combat::Killed;

use super::Brain;
use super::machine::Body;

#[derive(Component, Debug, Clone, PartialEq)]
pub enum EnemyLifeState {
    Alive,
    Dying { timer: Timer },
    Dead,
}

impl EnemyLifeState {
    #[inline]
    pub fn is_alive(&self) -> bool {
        matches!(self, EnemyLifeState::Alive)
    }
}

/// Remove in `PostUpdate`.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

pub(crate) fn enemy_death_trigger(
    tunables: Res<Tunables>,
    mut killed: MessageReader<Killed>,
    mut q: Query<
        (
            &mut EnemyLifeState,
            &mut CollisionLayers,
            &mut LinearVelocity,
            &Transform,
            Option<&mut Brain>,
            Option<&mut Sprite>,
        ),
        Without<PendingDespawn>,
    >,
) {
    for k in killed.read() {
        let Ok((mut life, mut layers, mut vel, tf, brain, sprite)) = q.get_mut(k.entity) else {
            continue;
        };
        if !life.is_alive() {
            continue;
        }

        if let Some(brain) = brain {
            let brain = brain.into_inner();
            let mut body = Body {
                position: tf.translation.truncate(),
                velocity: vel.0,
                facing: brain.facing,
            };
            brain.machine.kill(brain.behavior.as_mut(), &mut body);
        }

        vel.0 = Vec2::ZERO;
        *layers = non_interacting(Layer::Enemy);
        *life = EnemyLifeState::Dying {
            timer: Timer::from_seconds(tunables.corpse_fade_secs, TimerMode::Once),
        };
        if let Some(mut sprite) = sprite {
            sprite.color = Color::srgba(0.8, 0.8, 0.8, 1.0);
        }
    }
}

pub(crate) fn enemy_death_progress(
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut q: Query<
        (
            Entity,
            &mut EnemyLifeState,
            &mut Transform,
            &mut LinearVelocity,
            Option<&mut Sprite>,
        ),
        Without<PendingDespawn>,
    >,
) {
    for (e, mut life, mut tf, mut vel, sprite) in &mut q {
        let EnemyLifeState::Dying { timer } = &mut *life else {
            continue;
        };
        timer.tick(time.delta());
        vel.0 = Vec2::ZERO;

        let t = timer.fraction();
        tf.scale = Vec3::splat(1.0 - t);
        if let Some(mut sprite) = sprite {
            let mut c = sprite.color.to_srgba();
            c.alpha = 1.0 - t;
            sprite.color = c.into();
        }

        if timer.is_finished() {
            *life = EnemyLifeState::Dead;
            commands.entity(e).insert(PendingDespawn);
        }
    }
}

pub(crate) fn despawn_marked(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
