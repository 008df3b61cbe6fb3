//! Projectile contact resolution.
//!
//! Runs after avian has written `CollisionStart` for this step. A projectile resolves
//! at most one contact: the first marks it `spent` and queues its release, so any
//! other contact reported in the same step is ignored.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use rand::Rng;

use crate::common::element::Element;
use crate::common::layers::{Layer, is_in_layer};
use crate::common::tunables::Tunables;
use crate::plugins::combat::{DamageWriter, Faction, Hit};
use crate::plugins::core::CombatRng;

use super::components::Projectile;
use super::pool::{EntityPool, PoolMember};

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget {
            collider: ev.collider1,
            body: ev.body1,
        },
        CollisionTarget {
            collider: ev.collider2,
            body: ev.body2,
        },
    )
}

pub fn process_projectile_collisions(
    mut started: MessageReader<CollisionStart>,
    q_layers: Query<&CollisionLayers>,
    mut q_projectiles: Query<(&PoolMember, &mut Projectile, &Transform)>,
    mut pool: ResMut<EntityPool>,
    mut damage: DamageWriter,
    mut rng: ResMut<CombatRng>,
    tunables: Res<Tunables>,
) {
    for ev in started.read() {
        let (t1, t2) = targets(ev);

        let p1 = q_projectiles.contains(t1.collider);
        let p2 = q_projectiles.contains(t2.collider);
        if !(p1 ^ p2) {
            continue;
        }
        let (shot, other) = if p1 { (t1, t2) } else { (t2, t1) };

        let Ok(other_layers) = q_layers.get(other.collider) else {
            continue;
        };
        let Ok((member, mut projectile, tf)) = q_projectiles.get_mut(shot.collider) else {
            continue;
        };
        if projectile.spent || !pool.is_live(&member.0) {
            continue;
        }

        if is_in_layer(other_layers, Layer::World) || is_in_layer(other_layers, Layer::Barrier) {
            projectile.spent = true;
            pool.release(member.0);
            continue;
        }

        let victims = if projectile.is_hostile() { Layer::Player } else { Layer::Enemy };
        if !is_in_layer(other_layers, victims) {
            continue;
        }

        let target = other.gameplay_owner();
        let origin = tf.translation.truncate() - projectile.direction * 8.0;
        let mut hit = Hit::plain(projectile.damage, origin)
            .with_element(projectile.element)
            .with_knockback(Vec2::new(projectile.knockback, projectile.knockback * 0.25));
        if projectile.crit {
            hit = hit.with_crit(projectile.crit_multiplier);
        }

        projectile.spent = true;
        pool.release(member.0);

        let Some(outcome) = damage.apply(target, &hit, projectile.owner) else {
            continue;
        };

        let payload = projectile.elemental;
        if projectile.element == Element::None || payload.chance <= 0.0 {
            continue;
        }
        if rng.0.random::<f32>() >= payload.chance {
            continue;
        }
        if projectile.element == Element::Explosive {
            let victims_faction = if projectile.is_hostile() { Faction::Party } else { Faction::Hostile };
            let center = damage.position(target).unwrap_or(origin);
            let splash = Hit::plain(payload.damage, center)
                .with_element(Element::Explosive)
                .with_knockback(Vec2::new(projectile.knockback, projectile.knockback * 0.5));
            damage.apply_radial(
                center,
                tunables.splash_radius,
                victims_faction,
                &splash,
                Some(target),
                projectile.owner,
            );
        } else if !outcome.died {
            damage.apply_status(target, projectile.element, &payload);
        }
    }
}
