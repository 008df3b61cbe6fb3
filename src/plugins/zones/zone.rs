//! Zone bookkeeping, free of ECS access.

use bevy::prelude::*;

use crate::plugins::enemies::Spawnable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoneState {
    /// Waiting for the first player.
    #[default]
    Dormant,
    /// Players are locked in; spawners run.
    Sealed,
    Cleared,
}

/// Emits `count` spawns, the first on activation and then one every `delay` seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveSpawner {
    pub what: Spawnable,
    pub count: u32,
    pub delay: f32,
    pub position: Vec2,
    spawned: u32,
    timer: f32,
}

impl WaveSpawner {
    pub fn new(what: Spawnable, count: u32, delay: f32, position: Vec2) -> Self {
        Self {
            what,
            count,
            delay,
            position,
            spawned: 0,
            timer: 0.0,
        }
    }

    #[inline]
    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.spawned >= self.count
    }

    /// Number of spawns due after `dt` more seconds.
    pub fn tick(&mut self, dt: f32) -> u32 {
        let mut due = 0;
        self.timer -= dt;
        while !self.is_exhausted() && self.timer <= 0.0 {
            self.spawned += 1;
            due += 1;
            self.timer += self.delay.max(f32::EPSILON);
        }
        due
    }
}

/// Arena between `left` and `right` that traps the party until its waves are dead.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ScrollLockZone {
    pub left: f32,
    pub right: f32,
    state: ZoneState,
    pub spawners: Vec<WaveSpawner>,
    /// Spawned members not yet reported dead.
    alive: u32,
    /// Walls put up while sealed.
    pub barriers: Vec<Entity>,
}

impl ScrollLockZone {
    pub fn new(left: f32, right: f32, spawners: Vec<WaveSpawner>) -> Self {
        Self {
            left: left.min(right),
            right: left.max(right),
            state: ZoneState::Dormant,
            spawners,
            alive: 0,
            barriers: Vec::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> ZoneState {
        self.state
    }

    #[inline]
    pub fn is_sealed(&self) -> bool {
        self.state == ZoneState::Sealed
    }

    #[inline]
    pub fn alive(&self) -> u32 {
        self.alive
    }

    pub fn contains(&self, x: f32) -> bool {
        (self.left..=self.right).contains(&x)
    }

    /// Seal on first entry. `true` only for the call that sealed it.
    pub fn enter(&mut self) -> bool {
        if self.state != ZoneState::Dormant {
            return false;
        }
        self.state = ZoneState::Sealed;
        true
    }

    /// Spawns due this tick. Each one counts as alive until its death is recorded.
    pub fn tick_spawners(&mut self, dt: f32) -> Vec<(Spawnable, Vec2)> {
        let mut due = Vec::new();
        if !self.is_sealed() {
            return due;
        }
        for s in &mut self.spawners {
            for _ in 0..s.tick(dt) {
                due.push((s.what, s.position));
            }
        }
        self.alive += due.len() as u32;
        due
    }

    pub fn record_death(&mut self) {
        self.alive = self.alive.saturating_sub(1);
    }

    pub fn spawners_exhausted(&self) -> bool {
        self.spawners.iter().all(WaveSpawner::is_exhausted)
    }

    /// Unseal once every spawner is done and every member is dead.
    /// `true` only for the call that cleared it.
    pub fn try_clear(&mut self) -> bool {
        if !self.is_sealed() || self.alive > 0 || !self.spawners_exhausted() {
            return false;
        }
        self.state = ZoneState::Cleared;
        true
    }
}
