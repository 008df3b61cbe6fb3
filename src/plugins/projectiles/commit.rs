//! Return commit: the only place pooled projectiles are deactivated.
//!
//! Inactive projectiles are hidden, still, and collide with nothing. Writing that
//! here, after every collision of the step has been resolved, keeps releases from
//! changing collision flags while other systems still iterate this step's contacts.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::non_interacting;

use super::allocator::membership;
use super::components::Projectile;
use super::pool::{EntityPool, PoolMember};

pub fn return_to_pool_commit(
    mut pool: ResMut<EntityPool>,
    mut q: Query<(
        &PoolMember,
        &mut Projectile,
        &mut Visibility,
        &mut LinearVelocity,
        &mut CollisionLayers,
    )>,
) {
    for e in pool.take_pending() {
        if let Ok((member, mut projectile, mut vis, mut vel, mut layers)) = q.get_mut(e) {
            *projectile = Projectile::default();
            *vis = Visibility::Hidden;
            vel.0 = Vec2::ZERO;
            *layers = non_interacting(membership(member.0.pool));
        }
        pool.recycle(e);
    }
}
