use avian2d::prelude::*;
use bevy::prelude::*;

use crate::plugins::enemies::TargetSnapshot;

use super::components::Projectile;
use super::pool::{EntityPool, PoolMember};

/// Age live projectiles, release expired ones and steer homing shots.
pub fn advance_projectiles(
    time: Res<Time<Fixed>>,
    snapshot: Res<TargetSnapshot>,
    mut pool: ResMut<EntityPool>,
    mut q: Query<(&PoolMember, &mut Projectile, &Transform, &mut LinearVelocity)>,
) {
    let dt = time.delta_secs();
    for (member, mut projectile, tf, mut vel) in &mut q {
        if projectile.spent || !pool.is_live(&member.0) {
            continue;
        }
        if projectile.age(dt) {
            projectile.spent = true;
            pool.release(member.0);
            continue;
        }
        if projectile.homing.is_some() && projectile.is_hostile() {
            let at = tf.translation.truncate();
            if let Some(target) = snapshot.nearest(at) {
                projectile.steer_toward(at, target.position, dt);
                vel.0 = projectile.velocity();
            }
        }
    }
}
