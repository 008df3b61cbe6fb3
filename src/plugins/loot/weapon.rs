//! Weapon archetypes and the weapon generator.

use rand::Rng;

use crate::common::element::{Element, ElementalPayload};

use super::manufacturer::Manufacturer;
use super::rarity::Rarity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaponKind {
    Pistol,
    Smg,
    Shotgun,
    Rifle,
    Launcher,
}

/// Unscaled stats of a weapon archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseWeapon {
    pub damage: f32,
    pub fire_rate: f32,
    pub magazine: f32,
    pub accuracy: f32,
    pub reload_time: f32,
    pub projectile_speed: f32,
    pub pellets: u8,
    pub knockback: f32,
    pub crit_chance: f32,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 5] = [
        WeaponKind::Pistol,
        WeaponKind::Smg,
        WeaponKind::Shotgun,
        WeaponKind::Rifle,
        WeaponKind::Launcher,
    ];

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn noun(self) -> &'static str {
        match self {
            WeaponKind::Pistol => "Pistol",
            WeaponKind::Smg => "SMG",
            WeaponKind::Shotgun => "Shotgun",
            WeaponKind::Rifle => "Rifle",
            WeaponKind::Launcher => "Launcher",
        }
    }

    pub fn base(self) -> BaseWeapon {
        match self {
            WeaponKind::Pistol => BaseWeapon {
                damage: 12.0,
                fire_rate: 4.0,
                magazine: 12.0,
                accuracy: 0.9,
                reload_time: 1.2,
                projectile_speed: 700.0,
                pellets: 1,
                knockback: 60.0,
                crit_chance: 0.08,
            },
            WeaponKind::Smg => BaseWeapon {
                damage: 6.0,
                fire_rate: 11.0,
                magazine: 36.0,
                accuracy: 0.7,
                reload_time: 1.6,
                projectile_speed: 650.0,
                pellets: 1,
                knockback: 25.0,
                crit_chance: 0.05,
            },
            WeaponKind::Shotgun => BaseWeapon {
                damage: 7.0,
                fire_rate: 1.3,
                magazine: 6.0,
                accuracy: 0.5,
                reload_time: 2.0,
                projectile_speed: 560.0,
                pellets: 6,
                knockback: 90.0,
                crit_chance: 0.04,
            },
            WeaponKind::Rifle => BaseWeapon {
                damage: 22.0,
                fire_rate: 2.2,
                magazine: 8.0,
                accuracy: 0.97,
                reload_time: 1.8,
                projectile_speed: 950.0,
                pellets: 1,
                knockback: 80.0,
                crit_chance: 0.15,
            },
            WeaponKind::Launcher => BaseWeapon {
                damage: 40.0,
                fire_rate: 0.8,
                magazine: 3.0,
                accuracy: 0.85,
                reload_time: 2.6,
                projectile_speed: 420.0,
                pellets: 1,
                knockback: 220.0,
                crit_chance: 0.02,
            },
        }
    }
}

/// Fully rolled weapon. Never changes after generation; holders swap whole instances.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponInstance {
    pub name: String,
    pub kind: WeaponKind,
    pub rarity: Rarity,
    pub manufacturer: Manufacturer,
    pub level: u32,
    pub damage: f32,
    pub fire_rate: f32,
    pub magazine: u32,
    /// 0 = wild spray, 1 = laser.
    pub accuracy: f32,
    pub reload_time: f32,
    pub projectile_speed: f32,
    pub pellets: u8,
    pub knockback: f32,
    pub crit_chance: f32,
    pub crit_multiplier: f32,
    pub element: Element,
    pub elemental: ElementalPayload,
}

impl WeaponInstance {
    /// Widest spread, in radians, of a weapon with zero accuracy.
    pub const MAX_SPREAD: f32 = 0.6;

    /// Half-angle of the cone shots leave in.
    pub fn spread(&self) -> f32 {
        (1.0 - self.accuracy).clamp(0.0, 1.0) * Self::MAX_SPREAD
    }

    /// Unrolled common pistol handed to players without a saved loadout.
    pub fn starter() -> Self {
        let base = WeaponKind::Pistol.base();
        let manufacturer = Manufacturer::PlatformHeelWorks;
        Self {
            name: compose_name(&[manufacturer.name(), WeaponKind::Pistol.noun()]),
            kind: WeaponKind::Pistol,
            rarity: Rarity::Common,
            manufacturer,
            level: 1,
            damage: base.damage,
            fire_rate: base.fire_rate,
            magazine: base.magazine as u32,
            accuracy: base.accuracy,
            reload_time: base.reload_time,
            projectile_speed: base.projectile_speed,
            pellets: base.pellets,
            knockback: base.knockback,
            crit_chance: base.crit_chance,
            crit_multiplier: 2.0,
            element: Element::None,
            elemental: ElementalPayload::default(),
        }
    }
}

/// Stat growth per level above the first.
pub fn level_scale(level: u32) -> f32 {
    1.0 + 0.12 * (level.max(1) - 1) as f32
}

#[inline]
pub(super) fn variance<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(0.9..1.1)
}

/// Space-joined non-empty fragments.
pub(super) fn compose_name(fragments: &[&str]) -> String {
    fragments
        .iter()
        .filter(|f| !f.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// What to force on a generated item. Anything left `None` is rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Forced {
    pub rarity: Option<Rarity>,
    pub kind: Option<WeaponKind>,
}

impl Forced {
    pub fn rarity(rarity: Rarity) -> Self {
        Self {
            rarity: Some(rarity),
            kind: None,
        }
    }

    /// From raw indices. Out-of-range values fall back to rolling.
    pub fn from_raw(rarity: Option<u8>, kind: Option<u8>) -> Self {
        Self {
            rarity: rarity.and_then(Rarity::from_index),
            kind: kind.and_then(WeaponKind::from_index),
        }
    }
}

/// Generate a weapon for `level`.
///
/// Every rolled stat is `base * level_scale * rarity * manufacturer * variance`, each
/// term drawn once per stat. Accuracy takes the same product and is then clamped
/// into `0.05..=0.99`. Reload uses the product as a speed, so the time is
/// `base / product`.
pub fn generate_weapon<R: Rng + ?Sized>(level: u32, forced: Forced, rng: &mut R) -> WeaponInstance {
    let level = level.max(1);
    let rarity = forced.rarity.unwrap_or_else(|| Rarity::roll(rng));
    let manufacturer = Manufacturer::roll(rng);
    let kind = forced.kind.unwrap_or_else(|| manufacturer.roll_kind(rng));

    let base = kind.base();
    let m = manufacturer.profile();
    let tier = level_scale(level) * rarity.multiplier();

    let damage = base.damage * tier * m.damage * variance(rng);
    let fire_rate = base.fire_rate * tier * m.fire_rate * variance(rng);
    let magazine = (base.magazine * tier * m.magazine * variance(rng)).round().max(1.0) as u32;
    let accuracy = (base.accuracy * tier * m.accuracy * variance(rng)).clamp(0.05, 0.99);
    let reload_time = base.reload_time / (tier * m.reload_speed * variance(rng));

    let element = if rng.random::<f32>() < rarity.element_chance() {
        manufacturer.roll_element(rng)
    } else {
        Element::None
    };
    let elemental = if element == Element::None {
        ElementalPayload::default()
    } else {
        ElementalPayload {
            damage: damage * 0.3,
            chance: 0.2 + 0.1 * rarity.index() as f32,
            duration: 3.0,
        }
    };

    let name = compose_name(&[
        element.name_fragment(),
        rarity.name_fragment(),
        manufacturer.name(),
        kind.noun(),
    ]);

    WeaponInstance {
        name,
        kind,
        rarity,
        manufacturer,
        level,
        damage,
        fire_rate,
        magazine,
        accuracy,
        reload_time,
        projectile_speed: base.projectile_speed,
        pellets: base.pellets,
        knockback: base.knockback,
        crit_chance: (base.crit_chance + m.crit_bonus).min(0.75),
        crit_multiplier: 2.0 + 0.1 * rarity.index() as f32,
        element,
        elemental,
    }
}
