//! Damage resolution.
//!
//! [`resolve`] composes crit, shield absorption, elemental resistance, flat
//! reduction and knockback into one [`DamageOutcome`]. It touches nothing but its
//! arguments, so identical inputs always produce identical outcomes.

use bevy::prelude::*;

use crate::common::element::Element;

use super::health::Health;
use super::shield::{Nova, Shield};

/// Horizontal displacement under which the source counts as "on top of" the target.
const SAME_SPOT: f32 = 1e-3;

/// One incoming hit, before any defence is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub amount: f32,
    pub element: Element,
    pub crit: bool,
    pub crit_multiplier: f32,
    /// Magnitude of the push; the horizontal sign is decided from `origin`.
    pub knockback: Vec2,
    /// Where the damage came from.
    pub origin: Vec2,
}

impl Hit {
    pub fn plain(amount: f32, origin: Vec2) -> Self {
        Self {
            amount,
            element: Element::None,
            crit: false,
            crit_multiplier: 1.0,
            knockback: Vec2::ZERO,
            origin,
        }
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    pub fn with_crit(mut self, multiplier: f32) -> Self {
        self.crit = true;
        self.crit_multiplier = multiplier;
        self
    }

    pub fn with_knockback(mut self, knockback: Vec2) -> Self {
        self.knockback = knockback;
        self
    }

    /// Damage after the crit multiplier.
    #[inline]
    pub fn scaled_amount(&self) -> f32 {
        if self.crit {
            self.amount * self.crit_multiplier
        } else {
            self.amount
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DamageOutcome {
    pub to_health: f32,
    pub absorbed: f32,
    pub shield_broken: bool,
    /// True only when this hit took the target from alive to dead.
    pub died: bool,
    /// Velocity change to apply to the target.
    pub knockback: Vec2,
    /// Burst to release at the target position.
    pub nova: Option<Nova>,
}

impl DamageOutcome {
    /// Total damage the target soaked, shield and health combined.
    #[inline]
    pub fn dealt(&self) -> f32 {
        self.to_health + self.absorbed
    }

    #[inline]
    pub fn is_noop(&self) -> bool {
        self.dealt() <= 0.0 && self.knockback == Vec2::ZERO && !self.shield_broken
    }
}

/// Push away from `origin`. No push when the source sits on the target.
pub fn knockback_away(knockback: Vec2, origin: Vec2, target: Vec2) -> Vec2 {
    let dx = target.x - origin.x;
    if dx.abs() < SAME_SPOT {
        return Vec2::ZERO;
    }
    Vec2::new(knockback.x.abs() * dx.signum(), knockback.y)
}

pub fn resolve(
    shield: Option<&mut Shield>,
    health: &mut Health,
    hit: &Hit,
    target: Vec2,
) -> DamageOutcome {
    if hit.amount <= 0.0 || health.is_dead() {
        return DamageOutcome::default();
    }

    let amount = hit.scaled_amount();
    let mut out = DamageOutcome::default();

    let overflow = match shield {
        Some(shield) if shield.is_up() => {
            let a = shield.absorb(amount, hit.element);
            out.absorbed = a.absorbed;
            if a.broke {
                out.shield_broken = true;
                out.nova = shield.nova;
            }
            a.overflow
        }
        Some(shield) => {
            // A downed shield still waits out its delay after every hit.
            shield.hold_recharge();
            amount
        }
        None => amount,
    };

    let before = health.current();
    out.died = health.take_damage(overflow);
    out.to_health = before - health.current();
    out.knockback = knockback_away(hit.knockback, hit.origin, target);
    out
}
