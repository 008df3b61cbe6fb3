//! Buffered spawn requests.
//!
//! Producers (weapons, enemy attacks, boss patterns) only write intent. The
//! allocator is the single consumer and the only code that leases from the pool.

use bevy::prelude::*;

use crate::common::element::{Element, ElementalPayload};
use crate::plugins::player::PlayerSlot;

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct SpawnProjectileRequest {
    pub origin: Vec2,
    pub direction: Vec2,
    pub speed: f32,
    pub damage: f32,
    pub element: Element,
    pub elemental: ElementalPayload,
    pub knockback: f32,
    pub crit: bool,
    pub crit_multiplier: f32,
    /// `None` for hostile fire.
    pub owner: Option<PlayerSlot>,
    pub homing: Option<f32>,
    /// Overrides the default lifetime.
    pub lifetime: Option<f32>,
}

impl SpawnProjectileRequest {
    /// Plain hostile shot.
    pub fn hostile(origin: Vec2, direction: Vec2, speed: f32, damage: f32) -> Self {
        Self {
            origin,
            direction,
            speed,
            damage,
            element: Element::None,
            elemental: ElementalPayload::default(),
            knockback: 40.0,
            crit: false,
            crit_multiplier: 1.0,
            owner: None,
            homing: None,
            lifetime: None,
        }
    }

    pub fn with_element(mut self, element: Element, elemental: ElementalPayload) -> Self {
        self.element = element;
        self.elemental = elemental;
        self
    }

    pub fn with_knockback(mut self, knockback: f32) -> Self {
        self.knockback = knockback;
        self
    }

    pub fn with_homing(mut self, turn_rate: f32) -> Self {
        self.homing = Some(turn_rate);
        self
    }

    pub fn with_lifetime(mut self, seconds: f32) -> Self {
        self.lifetime = Some(seconds);
        self
    }
}
