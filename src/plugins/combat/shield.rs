use bevy::prelude::*;

use crate::common::element::{Element, Resistances};
use crate::plugins::loot::ShieldInstance;

/// Radial burst released when a shield breaks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nova {
    pub element: Element,
    pub damage: f32,
    pub radius: f32,
}

/// What one absorption did to the shield.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Absorption {
    pub reduced: f32,
    pub absorbed: f32,
    pub overflow: f32,
    pub broke: bool,
}

/// Rechargeable damage buffer in front of [`Health`](super::Health).
///
/// `current` only falls through [`Shield::absorb`] and only rises through
/// [`Shield::tick_recharge`], which stays idle until `recharge_delay` seconds pass
/// without a hit.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Shield {
    pub current: f32,
    pub capacity: f32,
    pub resistances: Resistances,
    pub flat_reduction: f32,
    pub recharge_delay: f32,
    pub recharge_rate: f32,
    recharge_wait: f32,
    pub nova: Option<Nova>,
}

impl Shield {
    pub fn new(capacity: f32) -> Self {
        Self {
            current: capacity,
            capacity,
            resistances: Resistances::default(),
            flat_reduction: 0.0,
            recharge_delay: 3.0,
            recharge_rate: capacity * 0.25,
            recharge_wait: 0.0,
            nova: None,
        }
    }

    pub fn from_instance(instance: &ShieldInstance) -> Self {
        Self {
            current: instance.capacity,
            capacity: instance.capacity,
            resistances: instance.resistances,
            flat_reduction: instance.flat_reduction,
            recharge_delay: instance.recharge_delay,
            recharge_rate: instance.recharge_rate,
            recharge_wait: 0.0,
            nova: instance.nova,
        }
    }

    pub fn with_resistance(mut self, element: Element, value: f32) -> Self {
        self.resistances.set(element, value);
        self
    }

    pub fn with_flat_reduction(mut self, value: f32) -> Self {
        self.flat_reduction = value.clamp(0.0, 1.0);
        self
    }

    pub fn with_nova(mut self, nova: Nova) -> Self {
        self.nova = Some(nova);
        self
    }

    #[inline]
    pub fn is_up(&self) -> bool {
        self.current > 0.0
    }

    #[inline]
    pub fn recharge_wait(&self) -> f32 {
        self.recharge_wait
    }

    /// Restart the recharge delay.
    #[inline]
    pub fn hold_recharge(&mut self) {
        self.recharge_wait = self.recharge_delay;
    }

    /// Absorb `amount` of `element` damage; the rest is returned as overflow.
    ///
    /// Resistance and flat reduction multiply independently.
    pub fn absorb(&mut self, amount: f32, element: Element) -> Absorption {
        if amount <= 0.0 || !self.is_up() {
            return Absorption {
                overflow: amount.max(0.0),
                ..default()
            };
        }

        let resistance = self.resistances.get(element);
        let reduced = amount * (1.0 - resistance) * (1.0 - self.flat_reduction.clamp(0.0, 1.0));
        let absorbed = reduced.min(self.current);
        self.current = (self.current - absorbed).max(0.0);
        self.hold_recharge();

        Absorption {
            reduced,
            absorbed,
            overflow: reduced - absorbed,
            broke: self.current == 0.0,
        }
    }

    pub fn tick_recharge(&mut self, dt: f32) {
        if self.recharge_wait > 0.0 {
            self.recharge_wait = (self.recharge_wait - dt).max(0.0);
            return;
        }
        if self.current < self.capacity {
            self.current = (self.current + self.recharge_rate * dt).min(self.capacity);
        }
    }
}
