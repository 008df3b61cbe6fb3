//! Shield generator.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::common::element::{Element, Resistances};
use crate::plugins::combat::Nova;

use super::manufacturer::Manufacturer;
use super::rarity::Rarity;
use super::weapon::{compose_name, level_scale, variance};

const BASE_CAPACITY: f32 = 60.0;
const BASE_RECHARGE_DELAY: f32 = 3.0;
const BASE_RECHARGE_RATE: f32 = 18.0;
const MAX_RESISTANCE: f32 = 0.75;

/// Fully rolled shield. Never changes after generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ShieldInstance {
    pub name: String,
    pub rarity: Rarity,
    pub manufacturer: Manufacturer,
    pub level: u32,
    pub capacity: f32,
    pub recharge_delay: f32,
    pub recharge_rate: f32,
    pub flat_reduction: f32,
    pub resistances: Resistances,
    pub nova: Option<Nova>,
}

impl ShieldInstance {
    pub fn starter() -> Self {
        let manufacturer = Manufacturer::PlatformHeelWorks;
        Self {
            name: compose_name(&[manufacturer.name(), "Shield"]),
            rarity: Rarity::Common,
            manufacturer,
            level: 1,
            capacity: BASE_CAPACITY,
            recharge_delay: BASE_RECHARGE_DELAY,
            recharge_rate: BASE_RECHARGE_RATE,
            flat_reduction: 0.0,
            resistances: Resistances::default(),
            nova: None,
        }
    }
}

/// Inclusive range of elemental resistances a tier may roll.
pub fn resistance_count_range(rarity: Rarity) -> (usize, usize) {
    match rarity {
        Rarity::Common | Rarity::Uncommon => (0, 1),
        Rarity::Rare => (1, 2),
        Rarity::Epic => (1, 3),
        Rarity::Legendary => (2, 4),
    }
}

pub fn nova_chance(rarity: Rarity) -> f32 {
    match rarity {
        Rarity::Common | Rarity::Uncommon => 0.0,
        Rarity::Rare => 0.15,
        Rarity::Epic => 0.3,
        Rarity::Legendary => 0.5,
    }
}

pub fn generate_shield<R: Rng + ?Sized>(
    level: u32,
    forced: Option<Rarity>,
    rng: &mut R,
) -> ShieldInstance {
    let level = level.max(1);
    let rarity = forced.unwrap_or_else(|| Rarity::roll(rng));
    let manufacturer = Manufacturer::roll(rng);
    let m = manufacturer.profile();
    let r = rarity.multiplier();

    let capacity = BASE_CAPACITY * level_scale(level) * r * m.shield_capacity * variance(rng);
    let recharge_rate = BASE_RECHARGE_RATE * level_scale(level) * r * m.shield_recharge * variance(rng);
    let recharge_delay = BASE_RECHARGE_DELAY / (m.shield_recharge * variance(rng));
    let flat_reduction = rng.random_range(0.0..=0.04) * rarity.index() as f32;

    let (lo, hi) = resistance_count_range(rarity);
    let count = rng.random_range(lo..=hi);
    let mut pool = Element::AFFIXES;
    pool.shuffle(rng);
    let mut resistances = Resistances::default();
    for &element in pool.iter().take(count) {
        let magnitude = (rng.random_range(0.1..0.25) * r).min(MAX_RESISTANCE);
        resistances.set(element, magnitude);
    }

    let nova = (rng.random::<f32>() < nova_chance(rarity)).then(|| Nova {
        element: manufacturer.roll_element(rng),
        damage: capacity * 0.5,
        radius: 96.0,
    });

    let headline = resistances
        .iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(e, _)| e.name_fragment())
        .unwrap_or("");
    let name = compose_name(&[
        headline,
        rarity.name_fragment(),
        manufacturer.name(),
        if nova.is_some() { "Nova Shield" } else { "Shield" },
    ]);

    ShieldInstance {
        name,
        rarity,
        manufacturer,
        level,
        capacity,
        recharge_delay,
        recharge_rate,
        flat_reduction,
        resistances,
        nova,
    }
}
