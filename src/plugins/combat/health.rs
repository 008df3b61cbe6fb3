use bevy::prelude::*;

/// Hit points of one combatant.
///
/// Only `take_damage` and `heal` mutate it, so `0 <= current <= max` always holds and
/// the alive-to-dead transition is observed exactly once.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Health {
    current: f32,
    max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        let max = max.max(1.0);
        Self { current: max, max }
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    #[inline]
    pub fn fraction(&self) -> f32 {
        self.current / self.max
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    /// Returns `true` only on the call that takes health from above zero to zero.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if amount <= 0.0 || self.is_dead() {
            return false;
        }
        self.current = (self.current - amount).max(0.0);
        self.current == 0.0
    }

    /// No effect on the dead.
    pub fn heal(&mut self, amount: f32) {
        if amount <= 0.0 || self.is_dead() {
            return;
        }
        self.current = (self.current + amount).min(self.max);
    }
}
