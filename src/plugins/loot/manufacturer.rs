//! Manufacturer profiles: multiplicative stat modifiers plus element/type bias.

use rand::Rng;

use crate::common::element::Element;

use super::weapon::WeaponKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Manufacturer {
    BoogieArms,
    Groovetron,
    Funkadelic,
    MirrorballMunitions,
    PlatformHeelWorks,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManufacturerProfile {
    pub name: &'static str,
    pub damage: f32,
    pub fire_rate: f32,
    pub magazine: f32,
    pub accuracy: f32,
    pub reload_speed: f32,
    pub crit_bonus: f32,
    pub shield_capacity: f32,
    pub shield_recharge: f32,
    pub favored_elements: &'static [Element],
    pub favored_kinds: &'static [WeaponKind],
}

const BOOGIE_ARMS: ManufacturerProfile = ManufacturerProfile {
    name: "Boogie Arms",
    damage: 1.2,
    fire_rate: 0.85,
    magazine: 0.9,
    accuracy: 1.0,
    reload_speed: 0.95,
    crit_bonus: 0.0,
    shield_capacity: 1.15,
    shield_recharge: 0.9,
    favored_elements: &[Element::Fire, Element::Explosive],
    favored_kinds: &[WeaponKind::Shotgun, WeaponKind::Launcher],
};

const GROOVETRON: ManufacturerProfile = ManufacturerProfile {
    name: "Groovetron",
    damage: 0.9,
    fire_rate: 1.25,
    magazine: 1.2,
    accuracy: 0.95,
    reload_speed: 1.1,
    crit_bonus: 0.0,
    shield_capacity: 0.95,
    shield_recharge: 1.25,
    favored_elements: &[Element::Electric],
    favored_kinds: &[WeaponKind::Smg, WeaponKind::Pistol],
};

const FUNKADELIC: ManufacturerProfile = ManufacturerProfile {
    name: "Funkadelic",
    damage: 1.0,
    fire_rate: 1.0,
    magazine: 1.0,
    accuracy: 1.15,
    reload_speed: 1.0,
    crit_bonus: 0.08,
    shield_capacity: 1.0,
    shield_recharge: 1.1,
    favored_elements: &[Element::Ice],
    favored_kinds: &[WeaponKind::Rifle],
};

const MIRRORBALL_MUNITIONS: ManufacturerProfile = ManufacturerProfile {
    name: "Mirrorball Munitions",
    damage: 1.05,
    fire_rate: 0.95,
    magazine: 1.4,
    accuracy: 0.9,
    reload_speed: 0.85,
    crit_bonus: 0.0,
    shield_capacity: 1.25,
    shield_recharge: 0.8,
    favored_elements: &[Element::Explosive, Element::Electric],
    favored_kinds: &[WeaponKind::Launcher, WeaponKind::Smg],
};

const PLATFORM_HEEL_WORKS: ManufacturerProfile = ManufacturerProfile {
    name: "Platform Heel Works",
    damage: 1.0,
    fire_rate: 1.05,
    magazine: 1.0,
    accuracy: 1.05,
    reload_speed: 1.05,
    crit_bonus: 0.05,
    shield_capacity: 1.05,
    shield_recharge: 1.05,
    favored_elements: &[],
    favored_kinds: &[WeaponKind::Pistol, WeaponKind::Rifle],
};

/// Chance a roll that can be biased lands on a favoured option.
pub const FAVOR_BIAS: f32 = 0.6;

impl Manufacturer {
    pub const ALL: [Manufacturer; 5] = [
        Manufacturer::BoogieArms,
        Manufacturer::Groovetron,
        Manufacturer::Funkadelic,
        Manufacturer::MirrorballMunitions,
        Manufacturer::PlatformHeelWorks,
    ];

    pub fn profile(self) -> &'static ManufacturerProfile {
        match self {
            Manufacturer::BoogieArms => &BOOGIE_ARMS,
            Manufacturer::Groovetron => &GROOVETRON,
            Manufacturer::Funkadelic => &FUNKADELIC,
            Manufacturer::MirrorballMunitions => &MIRRORBALL_MUNITIONS,
            Manufacturer::PlatformHeelWorks => &PLATFORM_HEEL_WORKS,
        }
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.profile().name
    }

    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Affix element, leaning toward the favoured ones.
    pub fn roll_element<R: Rng + ?Sized>(self, rng: &mut R) -> Element {
        let favored = self.profile().favored_elements;
        if !favored.is_empty() && rng.random::<f32>() < FAVOR_BIAS {
            return favored[rng.random_range(0..favored.len())];
        }
        Element::AFFIXES[rng.random_range(0..Element::AFFIXES.len())]
    }

    /// Base weapon type, leaning toward the favoured ones.
    pub fn roll_kind<R: Rng + ?Sized>(self, rng: &mut R) -> WeaponKind {
        let favored = self.profile().favored_kinds;
        if !favored.is_empty() && rng.random::<f32>() < FAVOR_BIAS {
            return favored[rng.random_range(0..favored.len())];
        }
        WeaponKind::ALL[rng.random_range(0..WeaponKind::ALL.len())]
    }
}
