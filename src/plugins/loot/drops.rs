//! Drop rolls: regular kills may miss, boss kills never do.

use rand::Rng;

use super::rarity::Rarity;
use super::shield::{ShieldInstance, generate_shield};
use super::weapon::{Forced, WeaponInstance, generate_weapon};

/// Share of regular drops that are weapons rather than shields.
const WEAPON_SHARE: f32 = 0.75;

#[derive(Debug, Clone, PartialEq)]
pub enum LootDescriptor {
    Weapon(WeaponInstance),
    Shield(ShieldInstance),
}

impl LootDescriptor {
    pub fn name(&self) -> &str {
        match self {
            LootDescriptor::Weapon(w) => &w.name,
            LootDescriptor::Shield(s) => &s.name,
        }
    }

    pub fn rarity(&self) -> Rarity {
        match self {
            LootDescriptor::Weapon(w) => w.rarity,
            LootDescriptor::Shield(s) => s.rarity,
        }
    }
}

/// Regular drop: nothing with probability `1 - drop_chance`.
pub fn roll_drop<R: Rng + ?Sized>(level: u32, drop_chance: f32, rng: &mut R) -> Option<LootDescriptor> {
    if rng.random::<f32>() >= drop_chance {
        return None;
    }
    Some(if rng.random::<f32>() < WEAPON_SHARE {
        LootDescriptor::Weapon(generate_weapon(level, Forced::default(), rng))
    } else {
        LootDescriptor::Shield(generate_shield(level, None, rng))
    })
}

/// Boss drop: an Epic-or-better weapon and a Rare-or-better shield, always.
pub fn boss_drop<R: Rng + ?Sized>(level: u32, rng: &mut R) -> [LootDescriptor; 2] {
    let weapon_rarity = Rarity::roll_at_least(Rarity::Epic, rng);
    let shield_rarity = Rarity::roll_at_least(Rarity::Rare, rng);
    [
        LootDescriptor::Weapon(generate_weapon(level, Forced::rarity(weapon_rarity), rng)),
        LootDescriptor::Shield(generate_shield(level, Some(shield_rarity), rng)),
    ]
}
