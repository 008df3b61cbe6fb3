use bevy::prelude::*;

use crate::common::element::{Element, ElementalPayload};
use crate::plugins::player::PlayerSlot;

use super::messages::SpawnProjectileRequest;

/// Flight and hit data of a leased projectile.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Projectile {
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
    pub elapsed: f32,
    pub max_lifetime: f32,
    /// Radians per second toward the nearest player.
    pub homing: Option<f32>,
    /// Set on the first resolved contact; later contacts this tick are ignored.
    pub spent: bool,
}

impl Default for Projectile {
    fn default() -> Self {
        Self {
            direction: Vec2::X,
            speed: 0.0,
            damage: 0.0,
            element: Element::None,
            elemental: ElementalPayload::default(),
            knockback: 0.0,
            crit: false,
            crit_multiplier: 1.0,
            owner: None,
            elapsed: 0.0,
            max_lifetime: 0.0,
            homing: None,
            spent: false,
        }
    }
}

impl Projectile {
    pub fn from_request(req: &SpawnProjectileRequest, default_lifetime: f32) -> Self {
        Self {
            direction: req.direction.try_normalize().unwrap_or(Vec2::X),
            speed: req.speed,
            damage: req.damage,
            element: req.element,
            elemental: req.elemental,
            knockback: req.knockback,
            crit: req.crit,
            crit_multiplier: req.crit_multiplier,
            owner: req.owner,
            elapsed: 0.0,
            max_lifetime: req.lifetime.unwrap_or(default_lifetime),
            homing: req.homing,
            spent: false,
        }
    }

    #[inline]
    pub fn is_hostile(&self) -> bool {
        self.owner.is_none()
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.direction * self.speed
    }

    /// Advance the clock; `true` once the lifetime has run out.
    pub fn age(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.elapsed >= self.max_lifetime
    }

    /// Turn toward `target` by at most `rate * dt` radians.
    pub fn steer_toward(&mut self, from: Vec2, target: Vec2, dt: f32) {
        let Some(rate) = self.homing else {
            return;
        };
        let Some(want) = (target - from).try_normalize() else {
            return;
        };
        let angle = self.direction.angle_to(want);
        let max = rate * dt;
        self.direction = Vec2::from_angle(angle.clamp(-max, max)).rotate(self.direction);
    }
}
