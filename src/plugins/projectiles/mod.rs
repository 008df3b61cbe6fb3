//! Projectiles plugin: message-driven spawning over a pooled allocator.
//!
//! ```text
//! FixedUpdate
//!   Think    weapons / enemies / bosses write SpawnProjectileRequest
//!   Spawn    allocate_projectiles: EntityPool::acquire + component writes
//!   Advance  advance_projectiles: lifetime expiry, homing
//! FixedPostUpdate
//!   (avian) CollisionStart
//!   Resolve  process_projectile_collisions: damage, mark spent, EntityPool::release
//!   Commit   return_to_pool_commit: deactivate + recycle
//! ```
//!
//! Releases only queue. The commit step is the single writer of the inactive state.

pub mod allocator;
pub mod collision;
pub mod commit;
pub mod components;
pub mod flight;
pub mod messages;
pub mod pool;

use bevy::prelude::*;

use crate::common::schedule::CombatSet;
use crate::plugins::combat::detonate_novas;

pub use components::Projectile;
pub use messages::SpawnProjectileRequest;
pub use pool::{EntityPool, PoolId, PoolMember, PooledHandle, SlotState};

pub fn plugin(app: &mut App) {
    app.init_resource::<EntityPool>()
        .add_message::<SpawnProjectileRequest>()
        .add_systems(Startup, allocator::init_projectile_pools);

    app.add_systems(
        FixedUpdate,
        (
            allocator::allocate_projectiles.in_set(CombatSet::Spawn),
            flight::advance_projectiles.in_set(CombatSet::Advance),
        ),
    );

    app.add_systems(
        FixedPostUpdate,
        (
            collision::process_projectile_collisions
                .in_set(CombatSet::Resolve)
                .before(detonate_novas),
            commit::return_to_pool_commit.in_set(CombatSet::Commit),
        ),
    );
}
