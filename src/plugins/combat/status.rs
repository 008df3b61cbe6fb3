//! Elemental status effects applied by hits that roll their elemental chance.

use bevy::prelude::*;

use crate::common::element::{Element, ElementalPayload};

/// Seconds between two damage-over-time ticks.
pub const DOT_INTERVAL: f32 = 0.5;
/// Movement multiplier while chilled.
pub const CHILL_SPEED_SCALE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOverTime {
    pub dps: f32,
    pub ticks_left: u32,
    next_tick: f32,
}

/// Tolerance for accumulated step drift when checking a tick boundary.
const TICK_EPS: f32 = 1e-4;

fn ticks_for(duration: f32) -> u32 {
    (duration / DOT_INTERVAL).round().max(1.0) as u32
}

impl DamageOverTime {
    fn new(dps: f32, duration: f32) -> Self {
        Self {
            dps,
            ticks_left: ticks_for(duration),
            next_tick: DOT_INTERVAL,
        }
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.ticks_left == 0
    }

    /// Damage due this step, if a tick boundary was crossed.
    fn tick(&mut self, dt: f32) -> Option<f32> {
        if self.is_expired() {
            return None;
        }
        self.next_tick -= dt;
        if self.next_tick > TICK_EPS {
            return None;
        }
        self.next_tick += DOT_INTERVAL;
        self.ticks_left -= 1;
        Some(self.dps * DOT_INTERVAL)
    }
}

/// Statuses currently affecting a combatant. Reapplying refreshes the stronger one.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct StatusEffects {
    pub burn: Option<DamageOverTime>,
    pub shock: Option<DamageOverTime>,
    pub chill: f32,
}

/// One damage tick a status produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusTick {
    pub element: Element,
    pub amount: f32,
}

impl StatusEffects {
    /// Apply the lingering part of `element`. Explosive has none; it splashes instead.
    pub fn apply(&mut self, element: Element, payload: &ElementalPayload) {
        match element {
            Element::Fire => refresh(&mut self.burn, payload),
            Element::Electric => refresh(&mut self.shock, payload),
            Element::Ice => self.chill = self.chill.max(payload.duration),
            Element::None | Element::Explosive => {}
        }
    }

    #[inline]
    pub fn is_chilled(&self) -> bool {
        self.chill > 0.0
    }

    pub fn speed_scale(&self) -> f32 {
        if self.is_chilled() { CHILL_SPEED_SCALE } else { 1.0 }
    }

    /// Advance timers; returns the damage ticks due this step (at most two).
    pub fn tick(&mut self, dt: f32) -> [Option<StatusTick>; 2] {
        self.chill = (self.chill - dt).max(0.0);
        let burn = tick_slot(&mut self.burn, dt, Element::Fire);
        let shock = tick_slot(&mut self.shock, dt, Element::Electric);
        [burn, shock]
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn refresh(slot: &mut Option<DamageOverTime>, payload: &ElementalPayload) {
    match slot {
        Some(dot) if dot.dps >= payload.damage => {
            dot.ticks_left = dot.ticks_left.max(ticks_for(payload.duration));
        }
        _ => *slot = Some(DamageOverTime::new(payload.damage, payload.duration)),
    }
}

fn tick_slot(slot: &mut Option<DamageOverTime>, dt: f32, element: Element) -> Option<StatusTick> {
    let dot = slot.as_mut()?;
    let amount = dot.tick(dt);
    if dot.is_expired() {
        *slot = None;
    }
    amount.map(|amount| StatusTick { element, amount })
}
