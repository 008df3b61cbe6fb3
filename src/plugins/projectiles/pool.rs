//! Generic pooled allocator for short-lived combat entities.
//!
//! The pool owns the bookkeeping only: which entity belongs to which pool, whether
//! it is leased, and its generation. Component values are written by the owner of
//! each pool (allocator on lease, commit on return).
//!
//! ```text
//!   acquire ──> Active ──release──> PendingRelease ──recycle (Commit)──> Inactive
//!      ^                                                                  │
//!      └──────────────────────────── free list ───────────────────────────┘
//! ```
//!
//! `release` never touches the entity; the physical deactivation happens when the
//! commit step drains [`EntityPool::take_pending`] at the end of the tick.
//!
//! ---------------------------
//! WHY RELEASE IS DEFERRED
//! ---------------------------
//! A projectile can hit two bodies in the same step, and the collision pass may
//! still hold queued work for it after the first hit released it. If release
//! parked the entity at once, the slot could be handed out again in that same
//! tick and the late work would land on the new lease. `PendingRelease` keeps the
//! slot out of the free list until Commit, and a second `release` of the same
//! lease is a no-op.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

// -----------------------------------------------------------------------------
// Handles and slots
// -----------------------------------------------------------------------------

/// Names a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolId(pub &'static str);

/// Spawns one inactive instance for a pool.
pub type PoolFactory = Box<dyn Fn(&mut Commands) -> Entity + Send + Sync>;

/// Lease on a pooled entity. Stale once the entity has been recycled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PooledHandle {
    pub entity: Entity,
    pub pool: PoolId,
    pub generation: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Inactive,
    Active,
    PendingRelease,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    pool: PoolId,
    generation: u32,
    state: SlotState,
}

/// Lease attached to a live pooled entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolMember(pub PooledHandle);

// -----------------------------------------------------------------------------
// The pool
// -----------------------------------------------------------------------------

#[derive(Resource, Default)]
pub struct EntityPool {
    factories: HashMap<PoolId, PoolFactory>,
    free: HashMap<PoolId, Vec<Entity>>,
    slots: HashMap<Entity, Slot>,
    pending: Vec<Entity>,
}

impl EntityPool {
    /// Register (or replace) the factory used to grow `pool`.
    pub fn register(&mut self, pool: PoolId, factory: PoolFactory) {
        self.factories.insert(pool, factory);
        self.free.entry(pool).or_default();
    }

    #[inline]
    pub fn is_registered(&self, pool: PoolId) -> bool {
        self.factories.contains_key(&pool)
    }

    /// Register `factory` and spawn `count` inactive instances up front.
    pub fn preload(&mut self, commands: &mut Commands, pool: PoolId, factory: PoolFactory, count: usize) {
        self.register(pool, factory);
        for _ in 0..count {
            if let Some(e) = self.grow(commands, pool) {
                self.free.entry(pool).or_default().push(e);
            }
        }
        debug!("pool '{}' preloaded with {count}", pool.0);
    }

    fn grow(&mut self, commands: &mut Commands, pool: PoolId) -> Option<Entity> {
        let factory = self.factories.get(&pool)?;
        let e = factory(commands);
        self.slots.insert(
            e,
            Slot {
                pool,
                generation: 0,
                state: SlotState::Inactive,
            },
        );
        Some(e)
    }

    /// Lease an inactive instance, growing the pool by one when none is free.
    ///
    /// `None` only when `pool` has no registered factory.
    pub fn acquire(&mut self, commands: &mut Commands, pool: PoolId) -> Option<PooledHandle> {
        if !self.is_registered(pool) {
            warn!("acquire from unregistered pool '{}'", pool.0);
            return None;
        }

        let entity = match self.free.get_mut(&pool).and_then(Vec::pop) {
            Some(e) => e,
            None => {
                let e = self.grow(commands, pool)?;
                debug!("pool '{}' grew to {}", pool.0, self.len(pool));
                e
            }
        };

        let slot = self.slots.get_mut(&entity)?;
        debug_assert_eq!(slot.state, SlotState::Inactive);
        slot.state = SlotState::Active;
        Some(PooledHandle {
            entity,
            pool,
            generation: slot.generation,
        })
    }

    /// Queue `handle` for return. Stale or repeated releases are ignored.
    ///
    /// Returns `true` only for the release that took effect.
    pub fn release(&mut self, handle: PooledHandle) -> bool {
        let Some(slot) = self.slots.get_mut(&handle.entity) else {
            return false;
        };
        if slot.generation != handle.generation || slot.state != SlotState::Active {
            return false;
        }
        slot.state = SlotState::PendingRelease;
        self.pending.push(handle.entity);
        true
    }

    pub fn state(&self, entity: Entity) -> Option<SlotState> {
        self.slots.get(&entity).map(|s| s.state)
    }

    /// Whether `handle` still names an active lease.
    pub fn is_live(&self, handle: &PooledHandle) -> bool {
        self.slots
            .get(&handle.entity)
            .is_some_and(|s| s.generation == handle.generation && s.state == SlotState::Active)
    }

    /// Entities released this tick, for the commit step to deactivate.
    pub fn take_pending(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.pending)
    }

    /// Finish a return: bump the generation and put the entity back on its free list.
    pub fn recycle(&mut self, entity: Entity) {
        let Some(slot) = self.slots.get_mut(&entity) else {
            return;
        };
        if slot.state != SlotState::PendingRelease {
            return;
        }
        slot.state = SlotState::Inactive;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.entry(slot.pool).or_default().push(entity);
    }

    /// Instances owned by `pool`, leased or not.
    pub fn len(&self, pool: PoolId) -> usize {
        self.slots.values().filter(|s| s.pool == pool).count()
    }

    pub fn free_count(&self, pool: PoolId) -> usize {
        self.free.get(&pool).map_or(0, Vec::len)
    }

    pub fn active_count(&self, pool: PoolId) -> usize {
        self.slots
            .values()
            .filter(|s| s.pool == pool && s.state == SlotState::Active)
            .count()
    }
}
